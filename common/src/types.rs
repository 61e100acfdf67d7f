//! 照合データの型定義
//!
//! CLIとバッチ処理で共有される型:
//! - StructuredRecord: 申告された構造化住所（1行分）
//! - FieldScoreMap: フィールドごとの一致スコア（0〜100）
//! - MatchResult: 1レコード分の最終照合結果

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 構造化住所のフィールド
///
/// 宣言順がそのまま出力列の順序になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AddressField {
    #[serde(rename = "House Flat Number")]
    HouseFlatNumber,
    #[serde(rename = "Street Road Name")]
    StreetRoadName,
    #[serde(rename = "Town")]
    Town,
    #[serde(rename = "City")]
    City,
    #[serde(rename = "Floor Number")]
    FloorNumber,
    #[serde(rename = "Country")]
    Country,
    #[serde(rename = "PINCODE")]
    Pincode,
    #[serde(rename = "Premise Building Name")]
    PremiseBuildingName,
    #[serde(rename = "Landmark")]
    Landmark,
    #[serde(rename = "State")]
    State,
}

impl AddressField {
    /// 全フィールド（宣言順）
    pub const ALL: [AddressField; 10] = [
        AddressField::HouseFlatNumber,
        AddressField::StreetRoadName,
        AddressField::Town,
        AddressField::City,
        AddressField::FloorNumber,
        AddressField::Country,
        AddressField::Pincode,
        AddressField::PremiseBuildingName,
        AddressField::Landmark,
        AddressField::State,
    ];

    /// スプレッドシート上の列名
    pub fn column_name(&self) -> &'static str {
        match self {
            AddressField::HouseFlatNumber => "House Flat Number",
            AddressField::StreetRoadName => "Street Road Name",
            AddressField::Town => "Town",
            AddressField::City => "City",
            AddressField::FloorNumber => "Floor Number",
            AddressField::Country => "Country",
            AddressField::Pincode => "PINCODE",
            AddressField::PremiseBuildingName => "Premise Building Name",
            AddressField::Landmark => "Landmark",
            AddressField::State => "State",
        }
    }

    /// スコア出力列名（例: "City Match Score"）
    pub fn score_column_name(&self) -> String {
        format!("{} Match Score", self.column_name())
    }
}

impl std::fmt::Display for AddressField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

impl std::str::FromStr for AddressField {
    type Err = Error;

    /// 列名から変換（大文字小文字・空白・アンダースコアを無視）
    fn from_str(s: &str) -> Result<Self> {
        let key = fold_key(s);
        AddressField::ALL
            .iter()
            .copied()
            .find(|field| fold_key(field.column_name()) == key)
            .ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

fn fold_key(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// 申告された構造化住所（1行分）
///
/// 照合中は変更しない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructuredRecord {
    fields: BTreeMap<AddressField, String>,
}

impl StructuredRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// ビルダー形式でフィールドを追加
    pub fn with(mut self, field: AddressField, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: AddressField, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    pub fn get(&self, field: AddressField) -> Option<&str> {
        self.fields.get(&field).map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (AddressField, &str)> {
        self.fields.iter().map(|(field, value)| (*field, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(AddressField, String)> for StructuredRecord {
    fn from_iter<I: IntoIterator<Item = (AddressField, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// フィールドごとの一致スコア（0〜100、小数2桁）
pub type FieldScoreMap = BTreeMap<AddressField, f64>;

/// 1レコード分の照合結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// フィールド別スコア（閾値に関係なく全フィールド分）
    pub field_scores: FieldScoreMap,
    /// 閾値以上のフィールドの平均（小数2桁）
    pub overall_score: f64,
    /// 最終判定
    pub final_match: bool,
}

impl MatchResult {
    pub fn score(&self, field: AddressField) -> Option<f64> {
        self.field_scores.get(&field).copied()
    }
}

/// 小数2桁に丸める
///
/// 浮動小数点数の厳密な2進値を基準に丸め、ちょうど中間の値は偶数側に寄せる
/// （0.125 → 0.12、0.375 → 0.38）。
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.2}", value).parse().unwrap_or(value)
}
