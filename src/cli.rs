use clap::{Parser, Subcommand};
use crate::config::Config;
use crate::error::{OvdMatchError, Result};
use ovd_match_common::{AddressField, StructuredRecord};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ovd-match")]
#[command(about = "OVD住所照合ツール（申告住所と抽出住所テキストの一致判定）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// 照合ポリシーの上書き指定
#[derive(clap::Args, Debug, Clone, Default)]
pub struct MatchOverrides {
    /// カスタムストップワードファイル（JSON配列）
    #[arg(long)]
    pub stopwords: Option<PathBuf>,

    /// ストップワードプリセット (indian/none)
    #[arg(long)]
    pub preset: Option<String>,

    /// 平均に採用するフィールドスコアの下限（0-100）
    #[arg(long)]
    pub inclusion_threshold: Option<f64>,

    /// 一致と判定する総合スコアの下限（0-100）
    #[arg(long)]
    pub decision_threshold: Option<f64>,
}

impl MatchOverrides {
    /// 設定ファイルの値をコマンドライン指定で上書き
    pub fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.stopwords {
            config.stopwords_path = Some(path.clone());
        }
        if let Some(preset) = &self.preset {
            // プリセットのみ指定された場合は設定ファイル側のストップワードファイルを使わない
            if self.stopwords.is_none() {
                config.stopwords_path = None;
            }
            config.stopword_preset = Some(preset.clone());
        }
        if let Some(value) = self.inclusion_threshold {
            config.inclusion_threshold = value;
        }
        if let Some(value) = self.decision_threshold {
            config.decision_threshold = value;
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// ワークブック（またはフォルダ内の全ワークブック）を一括照合
    Match {
        /// 入力ワークブックまたはフォルダ
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル/フォルダ（省略時は上書き）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 照合結果をJSONでも保存
        #[arg(long)]
        json: Option<PathBuf>,

        /// 照合後に最終判定・備考列も付与する
        #[arg(long)]
        final_remarks: bool,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,

        #[command(flatten)]
        overrides: MatchOverrides,
    },

    /// 1レコードを照合して結果をJSONで表示
    Check {
        /// 抽出住所テキスト
        #[arg(short, long, default_value = "")]
        address: String,

        /// フィールド値（"City=Mumbai" 形式、複数指定可）
        #[arg(short, long = "field")]
        fields: Vec<String>,

        /// 正規化結果・最良一致トークンも表示
        #[arg(long)]
        explain: bool,

        #[command(flatten)]
        overrides: MatchOverrides,
    },

    /// 最終判定・備考列のみ付与（UID Match Score 列が必要）
    Remarks {
        /// 入力ワークブック
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル（省略時は上書き）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 採用閾値を設定
        #[arg(long)]
        set_inclusion_threshold: Option<f64>,

        /// 判定閾値を設定
        #[arg(long)]
        set_decision_threshold: Option<f64>,

        /// ストップワードファイルを設定
        #[arg(long)]
        set_stopwords: Option<PathBuf>,

        /// 既定値に戻す
        #[arg(long)]
        reset: bool,
    },
}

/// "列名=値" をフィールドと値に分解
pub fn parse_field_arg(arg: &str) -> Result<(AddressField, String)> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| OvdMatchError::InvalidFieldArg(arg.to_string()))?;
    let field: AddressField = name.parse()?;
    Ok((field, value.to_string()))
}

/// フィールド指定一覧から構造化住所を組み立てる
pub fn record_from_args(args: &[String]) -> Result<StructuredRecord> {
    let mut record = StructuredRecord::new();
    for arg in args {
        let (field, value) = parse_field_arg(arg)?;
        record.insert(field, value);
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_arg() {
        let (field, value) = parse_field_arg("City=Mumbai").unwrap();
        assert_eq!(field, AddressField::City);
        assert_eq!(value, "Mumbai");

        let (field, value) = parse_field_arg("house flat number=12/B=C").unwrap();
        assert_eq!(field, AddressField::HouseFlatNumber);
        assert_eq!(value, "12/B=C");
    }

    #[test]
    fn test_parse_field_arg_invalid() {
        assert!(matches!(parse_field_arg("Mumbai"), Err(OvdMatchError::InvalidFieldArg(_))));
        assert!(matches!(parse_field_arg("Flat=12"), Err(OvdMatchError::Common(_))));
    }

    #[test]
    fn test_record_from_args() {
        let args = vec!["City=Mumbai".to_string(), "PINCODE=400001".to_string()];
        let record = record_from_args(&args).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get(AddressField::Pincode), Some("400001"));
    }

    #[test]
    fn test_overrides_apply() {
        let mut config = Config {
            stopwords_path: Some(PathBuf::from("words.json")),
            ..Default::default()
        };
        let overrides = MatchOverrides {
            preset: Some("none".into()),
            inclusion_threshold: Some(60.0),
            ..Default::default()
        };
        overrides.apply(&mut config);

        assert_eq!(config.stopwords_path, None);
        assert_eq!(config.stopword_preset.as_deref(), Some("none"));
        assert_eq!(config.inclusion_threshold, 60.0);
        assert_eq!(config.decision_threshold, 70.0);
    }

    #[test]
    fn test_cli_parses_match() {
        let cli = Cli::try_parse_from([
            "ovd-match", "match", "in.xlsx", "--decision-threshold", "80", "--final-remarks",
        ])
        .unwrap();
        match cli.command {
            Commands::Match { input, overrides, final_remarks, .. } => {
                assert_eq!(input, PathBuf::from("in.xlsx"));
                assert_eq!(overrides.decision_threshold, Some(80.0));
                assert!(final_remarks);
            }
            _ => panic!("expected match command"),
        }
    }
}
