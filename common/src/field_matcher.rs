//! フィールド照合
//!
//! 各フィールドについて、抽出住所のトークンのうち最も類似度の高いものを探し、
//! その類似度を 0〜100 のスコアとして記録する。閾値判定はここでは行わない。

use crate::similarity::similarity;
use crate::types::{round2, AddressField, FieldScoreMap};

/// 最良一致トークン
#[derive(Debug, Clone, PartialEq)]
pub struct BestToken<'a> {
    pub token: Option<&'a str>,
    /// 0.0〜1.0
    pub ratio: f64,
}

/// トークン列から値に最も近いものを探す（全探索）
///
/// 同率の場合は先に現れたトークンを採用する。トークンが無ければ比率 0。
pub fn best_token<'a>(value: &str, tokens: &[&'a str]) -> BestToken<'a> {
    let mut best = BestToken { token: None, ratio: 0.0 };
    for token in tokens {
        let ratio = similarity(token, value);
        if ratio > best.ratio {
            best = BestToken { token: Some(*token), ratio };
        }
    }
    best
}

/// 正規化済みフィールド値とトークン列からフィールド別スコアを計算
///
/// 入力にある全フィールドがスコアを持つ（0点でも省略しない）。
pub fn score_fields<'f, I>(normalized_fields: I, tokens: &[&str]) -> FieldScoreMap
where
    I: IntoIterator<Item = (AddressField, &'f str)>,
{
    normalized_fields
        .into_iter()
        .map(|(field, value)| {
            let best = best_token(value, tokens);
            (field, round2(best.ratio * 100.0))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_tokens_score_100() {
        let tokens = vec!["Flat", "No", "12", "Mumbai", "400001", "India"];
        let fields = vec![
            (AddressField::HouseFlatNumber, "12"),
            (AddressField::City, "Mumbai"),
            (AddressField::Pincode, "400001"),
        ];

        let scores = score_fields(fields, &tokens);
        assert_eq!(scores[&AddressField::HouseFlatNumber], 100.0);
        assert_eq!(scores[&AddressField::City], 100.0);
        assert_eq!(scores[&AddressField::Pincode], 100.0);
    }

    #[test]
    fn test_no_tokens_scores_zero() {
        let tokens: Vec<&str> = vec![];
        let fields = vec![(AddressField::City, "Mumbai"), (AddressField::State, "")];

        let scores = score_fields(fields, &tokens);
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[&AddressField::City], 0.0);
        assert_eq!(scores[&AddressField::State], 0.0);
    }

    #[test]
    fn test_every_field_present_even_when_low() {
        let tokens = vec!["Pune"];
        let fields = vec![(AddressField::City, "Mumbai"), (AddressField::Landmark, "Temple")];

        let scores = score_fields(fields, &tokens);
        assert_eq!(scores.len(), 2);
        assert!(scores.contains_key(&AddressField::Landmark));
    }

    #[test]
    fn test_fuzzy_score_rounded() {
        let tokens = vec!["Mumbay"];
        let scores = score_fields(vec![(AddressField::City, "Mumbai")], &tokens);
        assert_eq!(scores[&AddressField::City], 83.33);
    }

    #[test]
    fn test_multi_word_field_against_single_tokens() {
        // 複数語のフィールドは単一トークンとしか比較されない
        let tokens = vec!["Andheri", "East"];
        let scores = score_fields(vec![(AddressField::Town, "Andheri East")], &tokens);
        assert_eq!(scores[&AddressField::Town], 73.68);
    }

    #[test]
    fn test_best_token_first_wins_on_tie() {
        let tokens = vec!["Mumbay", "Mumbaj", "Pune"];
        let best = best_token("Mumbai", &tokens);
        assert_eq!(best.token, Some("Mumbay"));
    }

    #[test]
    fn test_best_token_empty_value() {
        let tokens = vec!["Mumbai"];
        let best = best_token("", &tokens);
        assert_eq!(best.token, None);
        assert_eq!(best.ratio, 0.0);
    }
}
