//! 最終判定・備考の付与
//!
//! UID照合スコアと住所照合の総合スコアから、レコード全体の判定と備考文を作る。
//! 備考のルールは上から順に評価し、後に当てはまったものが前のものを上書きする。

use crate::batch::FINAL_SCORE_COLUMN;
use crate::error::{OvdMatchError, Result};
use crate::sheet::{Cell, Table};
use tracing::warn;

/// UID照合スコアの列名
pub const UID_SCORE_COLUMN: &str = "UID Match Score";
/// 全体判定の列名
pub const OVERALL_MATCH_COLUMN: &str = "Overall Match";
/// 備考の列名
pub const FINAL_REMARKS_COLUMN: &str = "Final Remarks";

/// 全体判定に必要な平均スコアの下限（これを超えること）
const OVERALL_MATCH_THRESHOLD: f64 = 90.0;

/// 備考
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remark {
    Verified,
    FieldsMissing,
    NotAadhaar,
}

impl Remark {
    pub fn message(&self) -> &'static str {
        match self {
            Remark::Verified => "Aadhar Card Verified Successfully .",
            Remark::FieldsMissing => "Fields missing .Couldn't Verify Your aadhar card.",
            Remark::NotAadhaar => "The Image is not aadhar card.",
        }
    }
}

/// 全体スコア（住所スコアは2回数える）
pub fn overall_score(uid_score: f64, address_score: f64) -> f64 {
    (uid_score + address_score + address_score) / 3.0
}

pub fn overall_match(uid_score: f64, address_score: f64) -> bool {
    overall_score(uid_score, address_score) > OVERALL_MATCH_THRESHOLD
}

/// 備考を決める
///
/// 境界が重なっている条件（> 80 と >= 90、< 80 と < 85）はそのまま評価する。
pub fn final_remark(uid_score: f64, address_score: f64) -> Option<Remark> {
    let mut remark = None;
    if uid_score == 100.0 && address_score > 80.0 && address_score >= 90.0 {
        remark = Some(Remark::Verified);
    }
    if uid_score < 100.0 || address_score < 80.0 || address_score < 85.0 {
        remark = Some(Remark::FieldsMissing);
    }
    if uid_score == 0.0 && address_score == 0.0 {
        remark = Some(Remark::NotAadhaar);
    }
    remark
}

/// 備考付与の統計情報
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemarksSummary {
    pub total_rows: usize,
    pub overall_matched: usize,
    pub verified: usize,
    /// スコアが数値として読めなかった行数（0点扱い）
    pub unparsed_scores: usize,
}

/// 表に全体判定列と備考列を追加する
pub fn apply_final_remarks(table: &mut Table) -> Result<RemarksSummary> {
    let uid_col = table
        .column_index(UID_SCORE_COLUMN)
        .ok_or_else(|| OvdMatchError::MissingColumn(UID_SCORE_COLUMN.to_string()))?;
    let address_col = table
        .column_index(FINAL_SCORE_COLUMN)
        .ok_or_else(|| OvdMatchError::MissingColumn(FINAL_SCORE_COLUMN.to_string()))?;

    let mut summary = RemarksSummary {
        total_rows: table.len(),
        ..Default::default()
    };
    let mut overall = Vec::with_capacity(table.len());
    let mut remarks = Vec::with_capacity(table.len());

    for row in 0..table.len() {
        let uid = read_score(table.cell(row, uid_col), &mut summary, row);
        let address = read_score(table.cell(row, address_col), &mut summary, row);

        let matched = overall_match(uid, address);
        let remark = final_remark(uid, address);
        if matched {
            summary.overall_matched += 1;
        }
        if remark == Some(Remark::Verified) {
            summary.verified += 1;
        }

        overall.push(Cell::Bool(matched));
        remarks.push(match remark {
            Some(r) => Cell::Text(r.message().to_string()),
            None => Cell::Empty,
        });
    }

    table.set_column(OVERALL_MATCH_COLUMN, overall);
    table.set_column(FINAL_REMARKS_COLUMN, remarks);
    Ok(summary)
}

fn read_score(cell: &Cell, summary: &mut RemarksSummary, row: usize) -> f64 {
    match cell.as_f64() {
        Some(score) if score.is_finite() => score,
        _ => {
            warn!(row = row + 1, value = %cell.as_text(), "score is not numeric, treated as 0");
            summary.unparsed_scores += 1;
            0.0
        }
    }
}
