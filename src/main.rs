use anyhow::Context;
use clap::Parser;
use ovd_match::batch::{self, BatchOptions, BatchSummary, RowOutcome};
use ovd_match::cli::{self, Cli, Commands};
use ovd_match::config::Config;
use ovd_match::{error, remarks, scanner, sheet};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// JSON出力用（ワークブック単位）
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WorkbookDump {
    file_name: String,
    summary: BatchSummary,
    rows: Vec<RowOutcome>,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Match { input, output, json, final_remarks, recursive, overrides } => {
            println!("🏠 ovd-match - 住所照合\n");

            let mut config = config;
            overrides.apply(&mut config);
            let matcher = config.build_matcher()?;

            // 1. ワークブックスキャン
            println!("[1/3] ワークブックをスキャン中...");
            let workbooks = scanner::scan_workbooks(&input, recursive)?;
            if workbooks.is_empty() {
                return Err(error::OvdMatchError::NoWorkbooksFound(input.display().to_string()).into());
            }
            println!("✔ {}件のワークブックを検出\n", workbooks.len());

            // 2. 照合・書き出し
            println!(
                "[2/3] 照合中... (採用閾値: {}, 判定閾値: {}, ストップワード: {}語)",
                matcher.policy().inclusion_threshold(),
                matcher.policy().decision_threshold(),
                matcher.stopwords().len()
            );
            let multiple = workbooks.len() > 1;
            let options = BatchOptions { show_progress: true };
            let mut dumps = Vec::with_capacity(workbooks.len());

            for workbook in &workbooks {
                if cli.verbose {
                    println!("  {}", workbook.path.display());
                }

                let mut table = sheet::read_table(&workbook.path)
                    .with_context(|| format!("読み込みに失敗: {}", workbook.path.display()))?;
                let report = batch::process_table(&mut table, &matcher, &options)
                    .with_context(|| format!("照合に失敗: {}", workbook.path.display()))?;

                if final_remarks {
                    remarks::apply_final_remarks(&mut table)
                        .with_context(|| format!("備考付与に失敗: {}", workbook.path.display()))?;
                }

                let output_path = scanner::output_path_for(workbook, output.as_deref(), multiple);
                sheet::write_table(&table, &output_path)
                    .with_context(|| format!("書き出しに失敗: {}", output_path.display()))?;

                println!(
                    "✔ {}: {}/{}件一致（抽出住所なし {}件） → {}",
                    workbook.file_name,
                    report.summary.matched_rows,
                    report.summary.total_rows,
                    report.summary.missing_text_rows,
                    output_path.display()
                );

                dumps.push(WorkbookDump {
                    file_name: workbook.file_name.clone(),
                    summary: report.summary,
                    rows: report.outcomes,
                });
            }
            println!();

            // 3. JSON保存
            if let Some(json_path) = json {
                println!("[3/3] 結果をJSONで保存中...");
                let content = serde_json::to_string_pretty(&dumps)?;
                std::fs::write(&json_path, content)?;
                println!("✔ 結果を保存: {}", json_path.display());
            } else {
                println!("[3/3] JSON出力なし（--json で指定）");
            }

            println!("\n✅ 照合完了");
        }

        Commands::Check { address, fields, explain, overrides } => {
            let mut config = config;
            overrides.apply(&mut config);
            let matcher = config.build_matcher()?;

            let record = cli::record_from_args(&fields)?;
            let extracted = if address.trim().is_empty() { None } else { Some(address.as_str()) };

            let json = if explain {
                serde_json::to_string_pretty(&matcher.explain(&record, extracted))?
            } else {
                serde_json::to_string_pretty(&matcher.match_record(&record, extracted))?
            };
            println!("{}", json);
        }

        Commands::Remarks { input, output } => {
            println!("📝 ovd-match - 最終判定\n");

            let mut table = sheet::read_table(&input)
                .with_context(|| format!("読み込みに失敗: {}", input.display()))?;
            let summary = remarks::apply_final_remarks(&mut table)?;

            let output_path = output.unwrap_or_else(|| input.clone());
            sheet::write_table(&table, &output_path)?;

            println!(
                "✔ {}件中 全体一致 {}件 / 確認済み {}件",
                summary.total_rows, summary.overall_matched, summary.verified
            );
            if summary.unparsed_scores > 0 {
                println!("  ⚠ 数値でないスコア {}件を0として扱いました", summary.unparsed_scores);
            }
            println!("✔ 結果を保存: {}", output_path.display());
        }

        Commands::Config { show, set_inclusion_threshold, set_decision_threshold, set_stopwords, reset } => {
            let mut config = if reset { Config::default() } else { config };
            let changed = reset
                || set_inclusion_threshold.is_some()
                || set_decision_threshold.is_some()
                || set_stopwords.is_some();

            if let Some(value) = set_inclusion_threshold {
                config.inclusion_threshold = value;
            }
            if let Some(value) = set_decision_threshold {
                config.decision_threshold = value;
            }
            if let Some(path) = set_stopwords {
                config.stopwords_path = Some(path);
            }

            if changed {
                // 保存前に検証
                config.build_matcher()?;
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  採用閾値: {}", config.inclusion_threshold);
                println!("  判定閾値: {}", config.decision_threshold);
                match (&config.stopwords_path, &config.stopword_preset) {
                    (Some(path), _) => println!("  ストップワード: {}", path.display()),
                    (None, Some(preset)) => println!("  ストップワード: プリセット {}", preset),
                    (None, None) => println!("  ストップワード: 組み込み（インド住所）"),
                }
            }
        }
    }

    Ok(())
}
