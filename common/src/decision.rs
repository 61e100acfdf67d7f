//! 総合スコアと最終判定
//!
//! - 採用閾値以上のフィールドスコアだけを平均して総合スコアとする
//! - 総合スコアが判定閾値以上、かつPINコード一致で「一致」

use crate::error::{Error, Result};
use crate::types::FieldScoreMap;
use serde::Serialize;

/// 既定の採用閾値
pub const DEFAULT_INCLUSION_THRESHOLD: f64 = 70.0;
/// 既定の判定閾値
pub const DEFAULT_DECISION_THRESHOLD: f64 = 70.0;

/// 判定ポリシー
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPolicy {
    inclusion_threshold: f64,
    decision_threshold: f64,
}

impl MatchPolicy {
    /// 閾値を検証して構築（0〜100の有限値のみ）
    pub fn new(inclusion_threshold: f64, decision_threshold: f64) -> Result<Self> {
        validate_threshold("inclusion_threshold", inclusion_threshold)?;
        validate_threshold("decision_threshold", decision_threshold)?;
        Ok(Self {
            inclusion_threshold,
            decision_threshold,
        })
    }

    pub fn inclusion_threshold(&self) -> f64 {
        self.inclusion_threshold
    }

    pub fn decision_threshold(&self) -> f64 {
        self.decision_threshold
    }

    /// 総合スコア（丸め前）と最終判定
    pub fn decide(&self, field_scores: &FieldScoreMap, pincode_matched: bool) -> Decision {
        let included: Vec<f64> = field_scores
            .values()
            .copied()
            .filter(|score| *score >= self.inclusion_threshold)
            .collect();

        let overall_score = if included.is_empty() {
            0.0
        } else {
            included.iter().sum::<f64>() / included.len() as f64
        };

        Decision {
            overall_score,
            included_fields: included.len(),
            final_match: overall_score >= self.decision_threshold && pincode_matched,
        }
    }
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            inclusion_threshold: DEFAULT_INCLUSION_THRESHOLD,
            decision_threshold: DEFAULT_DECISION_THRESHOLD,
        }
    }
}

fn validate_threshold(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(Error::Config(format!(
            "{} は 0〜100 の範囲で指定してください: {}",
            name, value
        )));
    }
    Ok(())
}

/// 判定結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    /// 採用フィールドの平均（丸め前）
    pub overall_score: f64,
    /// 平均に採用したフィールド数
    pub included_fields: usize,
    pub final_match: bool,
}

/// 既定ポリシーでの判定
pub fn decide(field_scores: &FieldScoreMap, pincode_matched: bool) -> Decision {
    MatchPolicy::default().decide(field_scores, pincode_matched)
}
