//! 住所照合エンジン
//!
//! 構造化住所 + 抽出住所テキスト → 正規化 → フィールド照合 → PINコード照合
//! → 総合判定、を1レコードずつ行う。状態を持たないので複数スレッドから共有できる。

use crate::decision::MatchPolicy;
use crate::field_matcher::{best_token, score_fields};
use crate::normalize::{normalize, normalize_opt, tokenize};
use crate::pincode::{extract_pincode, pincode_match};
use crate::stopwords::StopwordSet;
use crate::types::{round2, AddressField, MatchResult, StructuredRecord};
use serde::Serialize;
use tracing::trace;

/// 照合エンジン（不変）
#[derive(Debug, Clone, Default)]
pub struct AddressMatcher {
    stopwords: StopwordSet,
    policy: MatchPolicy,
}

impl AddressMatcher {
    pub fn new(stopwords: StopwordSet, policy: MatchPolicy) -> Self {
        Self { stopwords, policy }
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// 1レコードを照合する
    ///
    /// 抽出住所が無い・空の場合も含め、常に結果を返す。
    pub fn match_record(&self, record: &StructuredRecord, extracted: Option<&str>) -> MatchResult {
        let normalized_address = normalize_opt(extracted, &self.stopwords);
        let tokens = tokenize(&normalized_address);

        let normalized_fields: Vec<(AddressField, String)> = record
            .iter()
            .map(|(field, value)| (field, normalize(value, &self.stopwords)))
            .collect();

        let field_scores = score_fields(
            normalized_fields.iter().map(|(field, value)| (*field, value.as_str())),
            &tokens,
        );

        let input_pincode = record.get(AddressField::Pincode).unwrap_or("");
        let pincode_matched = pincode_match(input_pincode, &normalized_address);

        let decision = self.policy.decide(&field_scores, pincode_matched);

        trace!(
            tokens = tokens.len(),
            pincode_matched,
            included = decision.included_fields,
            overall = decision.overall_score,
            "record matched"
        );

        MatchResult {
            field_scores,
            overall_score: round2(decision.overall_score),
            final_match: decision.final_match,
        }
    }

    /// 照合の途中経過を含めて返す（診断用）
    pub fn explain(&self, record: &StructuredRecord, extracted: Option<&str>) -> MatchTrace {
        let normalized_address = normalize_opt(extracted, &self.stopwords);
        let tokens = tokenize(&normalized_address);

        let fields = record
            .iter()
            .map(|(field, value)| {
                let normalized = normalize(value, &self.stopwords);
                let best = best_token(&normalized, &tokens);
                FieldTrace {
                    field,
                    normalized,
                    best_token: best.token.map(str::to_string),
                    score: round2(best.ratio * 100.0),
                }
            })
            .collect();

        let extracted_pincode = extract_pincode(&normalized_address).map(str::to_string);
        let result = self.match_record(record, extracted);

        MatchTrace {
            policy: self.policy,
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
            normalized_address,
            extracted_pincode,
            fields,
            result,
        }
    }
}

/// 照合の途中経過
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchTrace {
    /// 判定に使った閾値
    pub policy: MatchPolicy,
    pub normalized_address: String,
    pub tokens: Vec<String>,
    pub extracted_pincode: Option<String>,
    pub fields: Vec<FieldTrace>,
    pub result: MatchResult,
}

/// フィールド単位の途中経過
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTrace {
    pub field: AddressField,
    pub normalized: String,
    pub best_token: Option<String>,
    pub score: f64,
}
