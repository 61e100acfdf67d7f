//! 一括照合モジュール
//!
//! 表の各行から構造化住所と抽出住所を取り出して照合し、
//! スコア列と判定列を書き戻す。行ごとの照合は独立しているので並列に実行する。

use crate::error::{OvdMatchError, Result};
use crate::sheet::{Cell, Table};
use indicatif::{ProgressBar, ProgressStyle};
use ovd_match_common::{AddressField, AddressMatcher, MatchResult, StructuredRecord};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

/// 行識別子の列名
pub const SR_NO_COLUMN: &str = "SrNo";
/// 抽出住所テキストの列名
pub const EXTRACTED_ADDRESS_COLUMN: &str = "Address Extracted From OVD";
/// 最終判定の列名
pub const FINAL_MATCH_COLUMN: &str = "Final Address Match";
/// 総合スコアの列名
pub const FINAL_SCORE_COLUMN: &str = "Final Address Match Score";

/// 一括照合オプション
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// 進捗バーを表示する
    pub show_progress: bool,
}

/// 1行分の照合結果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowOutcome {
    pub sr_no: String,
    /// 抽出住所が空だった
    pub missing_text: bool,
    pub result: MatchResult,
}

/// 一括照合の統計情報
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// 処理した行数
    pub total_rows: usize,
    /// 一致と判定した行数
    pub matched_rows: usize,
    /// 抽出住所が空だった行数
    pub missing_text_rows: usize,
}

/// 一括照合の結果
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// 照合に使ったフィールド列
    pub fields: Vec<AddressField>,
    pub outcomes: Vec<RowOutcome>,
    pub summary: BatchSummary,
}

/// 表に含まれるフィールド列（宣言順）
pub fn detect_fields(table: &Table) -> Vec<(AddressField, usize)> {
    AddressField::ALL
        .iter()
        .filter_map(|field| table.column_index(field.column_name()).map(|idx| (*field, idx)))
        .collect()
}

/// 表の1行から構造化住所を組み立てる
pub fn record_from_row(table: &Table, row: usize, fields: &[(AddressField, usize)]) -> StructuredRecord {
    fields
        .iter()
        .map(|(field, col)| (*field, table.cell(row, *col).as_text()))
        .collect()
}

/// 表全体を照合し、結果列を追加する
///
/// # Arguments
/// * `table` - 入力表（結果列が追加・上書きされる）
/// * `matcher` - 照合エンジン
/// * `options` - 一括照合オプション
pub fn process_table(
    table: &mut Table,
    matcher: &AddressMatcher,
    options: &BatchOptions,
) -> Result<BatchReport> {
    let address_col = table
        .column_index(EXTRACTED_ADDRESS_COLUMN)
        .ok_or_else(|| OvdMatchError::MissingColumn(EXTRACTED_ADDRESS_COLUMN.to_string()))?;

    let fields = detect_fields(table);
    if fields.is_empty() {
        let names: Vec<&str> = AddressField::ALL.iter().map(|f| f.column_name()).collect();
        return Err(OvdMatchError::MissingColumn(names.join(" / ")));
    }
    let sr_no_col = table.column_index(SR_NO_COLUMN);

    debug!(
        fields = fields.len(),
        rows = table.len(),
        "matching table"
    );

    let progress = if options.show_progress {
        let pb = ProgressBar::new(table.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len} 行")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let source: &Table = table;
    let outcomes: Vec<RowOutcome> = (0..source.len())
        .into_par_iter()
        .map(|row| {
            let record = record_from_row(source, row, &fields);
            let extracted = source.cell(row, address_col).as_text();
            let missing_text = extracted.trim().is_empty();

            let result = if missing_text {
                matcher.match_record(&record, None)
            } else {
                matcher.match_record(&record, Some(&extracted))
            };

            let sr_no = match sr_no_col {
                Some(col) => source.cell(row, col).as_text(),
                None => (row + 1).to_string(),
            };

            progress.inc(1);
            RowOutcome {
                sr_no,
                missing_text,
                result,
            }
        })
        .collect();
    progress.finish_and_clear();

    for (field, _) in &fields {
        let values = outcomes
            .iter()
            .map(|o| Cell::Number(o.result.score(*field).unwrap_or(0.0)))
            .collect();
        table.set_score_column(&field.score_column_name(), values);
    }
    table.set_column(
        FINAL_MATCH_COLUMN,
        outcomes.iter().map(|o| Cell::Bool(o.result.final_match)).collect(),
    );
    table.set_score_column(
        FINAL_SCORE_COLUMN,
        outcomes.iter().map(|o| Cell::Number(o.result.overall_score)).collect(),
    );

    let summary = BatchSummary {
        total_rows: outcomes.len(),
        matched_rows: outcomes.iter().filter(|o| o.result.final_match).count(),
        missing_text_rows: outcomes.iter().filter(|o| o.missing_text).count(),
    };

    info!(
        total = summary.total_rows,
        matched = summary.matched_rows,
        missing_text = summary.missing_text_rows,
        "table matched"
    );

    Ok(BatchReport {
        fields: fields.into_iter().map(|(f, _)| f).collect(),
        outcomes,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn sample_table() -> Table {
        let headers = vec![
            "SrNo", "House Flat Number", "City", "PINCODE", "Address Extracted From OVD",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        let mut table = Table::new("Sheet1", headers);
        table.rows.push(vec![
            Cell::Number(1.0),
            text("12"),
            text("Mumbai"),
            Cell::Number(400001.0),
            text("Flat No 12 Mumbai 400001 India"),
        ]);
        table.rows.push(vec![
            Cell::Number(2.0),
            text("7"),
            text("Pune"),
            Cell::Number(411001.0),
            Cell::Empty,
        ]);
        table.rows.push(vec![
            Cell::Number(3.0),
            text("12"),
            text("Mumbai"),
            Cell::Number(400001.0),
            text("Flat No 12 Mumbai 400002 India"),
        ]);
        table
    }

    #[test]
    fn test_process_table_appends_columns() {
        let mut table = sample_table();
        let report = process_table(&mut table, &AddressMatcher::default(), &BatchOptions::default()).unwrap();

        assert_eq!(
            report.fields,
            vec![AddressField::HouseFlatNumber, AddressField::City, AddressField::Pincode]
        );
        let city_col = table.column_index("City Match Score").unwrap();
        let match_col = table.column_index(FINAL_MATCH_COLUMN).unwrap();
        let score_col = table.column_index(FINAL_SCORE_COLUMN).unwrap();

        assert_eq!(table.cell(0, city_col), &Cell::Number(100.0));
        assert_eq!(table.cell(0, match_col), &Cell::Bool(true));
        assert_eq!(table.cell(0, score_col), &Cell::Number(100.0));

        assert_eq!(table.cell(1, city_col), &Cell::Number(0.0));
        assert_eq!(table.cell(1, match_col), &Cell::Bool(false));
        assert_eq!(table.cell(1, score_col), &Cell::Number(0.0));

        assert_eq!(table.cell(2, match_col), &Cell::Bool(false));
    }

    #[test]
    fn test_process_table_summary_and_order() {
        let mut table = sample_table();
        let report = process_table(&mut table, &AddressMatcher::default(), &BatchOptions::default()).unwrap();

        assert_eq!(
            report.summary,
            BatchSummary {
                total_rows: 3,
                matched_rows: 1,
                missing_text_rows: 1,
            }
        );
        let sr_nos: Vec<&str> = report.outcomes.iter().map(|o| o.sr_no.as_str()).collect();
        assert_eq!(sr_nos, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_only_written_scores_use_score_format() {
        let mut table = sample_table();
        process_table(&mut table, &AddressMatcher::default(), &BatchOptions::default()).unwrap();

        let pin_col = table.column_index("PINCODE").unwrap();
        let city_score_col = table.column_index("City Match Score").unwrap();
        let final_score_col = table.column_index(FINAL_SCORE_COLUMN).unwrap();
        let final_match_col = table.column_index(FINAL_MATCH_COLUMN).unwrap();

        assert!(!table.is_score_column(pin_col));
        assert!(table.is_score_column(city_score_col));
        assert!(table.is_score_column(final_score_col));
        assert!(!table.is_score_column(final_match_col));
    }

    #[test]
    fn test_rerun_overwrites_existing_columns() {
        let mut table = sample_table();
        let matcher = AddressMatcher::default();
        process_table(&mut table, &matcher, &BatchOptions::default()).unwrap();
        let width = table.headers.len();
        process_table(&mut table, &matcher, &BatchOptions::default()).unwrap();
        assert_eq!(table.headers.len(), width);
    }

    #[test]
    fn test_missing_address_column() {
        let mut table = Table::new("Sheet1", vec!["SrNo".into(), "City".into()]);
        let result = process_table(&mut table, &AddressMatcher::default(), &BatchOptions::default());
        assert!(matches!(result, Err(OvdMatchError::MissingColumn(_))));
    }

    #[test]
    fn test_missing_field_columns() {
        let mut table = Table::new("Sheet1", vec![EXTRACTED_ADDRESS_COLUMN.into()]);
        let result = process_table(&mut table, &AddressMatcher::default(), &BatchOptions::default());
        assert!(matches!(result, Err(OvdMatchError::MissingColumn(_))));
    }

    #[test]
    fn test_record_from_row_coerces_numbers() {
        let table = sample_table();
        let fields = detect_fields(&table);
        let record = record_from_row(&table, 0, &fields);
        assert_eq!(record.get(AddressField::Pincode), Some("400001"));
        assert_eq!(record.get(AddressField::City), Some("Mumbai"));
        assert_eq!(record.get(AddressField::State), None);
    }
}
