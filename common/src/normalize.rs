//! 住所文字列の正規化
//!
//! 1. ストップワード除去（単語境界・大文字小文字無視・設定順）
//! 2. ラテン文字・ASCII数字・空白以外の文字を除去
//! 3. 連続空白を1つに畳み、前後の空白を除去
//!
//! 出力の大文字小文字は保持する。

use crate::stopwords::StopwordSet;
use regex::Regex;

/// 住所文字列を正規化する
pub fn normalize(text: &str, stopwords: &StopwordSet) -> String {
    lazy_static::lazy_static! {
        static ref NON_ALNUM_RE: Regex = Regex::new(r"[^a-zA-Z0-9\s]").unwrap();
        static ref SPACES_RE: Regex = Regex::new(r"\s+").unwrap();
    }

    let stripped = stopwords.strip(text);
    let cleaned = NON_ALNUM_RE.replace_all(&stripped, "");
    SPACES_RE.replace_all(&cleaned, " ").trim().to_string()
}

/// 値が欠落している場合は空文字列を返す
pub fn normalize_opt(text: Option<&str>, stopwords: &StopwordSet) -> String {
    match text {
        Some(text) => normalize(text, stopwords),
        None => String::new(),
    }
}

/// 正規化済み文字列を空白で分割したトークン列
pub fn tokenize(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}
