//! 住所ストップワードモジュール
//!
//! 照合前に住所文字列から取り除く語（"Rd", "Lane", "S/o" など）を管理する。
//! 語の一覧は設定データとして扱い、プリセット・JSONファイルから差し替えられる。

use crate::error::{Error, Result};
use regex::Regex;

/// インド住所向けの組み込みストップワード（適用順）
pub const INDIAN_STOPWORDS: &[&str] = &[
    "PO-", "PO", "Marg", "Peeth", "Veedhi", "Rd", "Lane", "NR",
    "Beside", "Opposite", "OPP", "Behind", "near", "Enclave",
    "Township", "Society", "Soc", "Towers", "Block", "S/o", "C/o",
    "D/o", "W/o",
];

/// コンパイル済みストップワード集合
///
/// 構築後は不変。各語は大文字小文字を区別しない単語境界一致の正規表現になる。
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: Vec<String>,
    patterns: Vec<Regex>,
}

impl StopwordSet {
    /// 語の一覧からコンパイル（順序は保持）
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        let mut patterns = Vec::with_capacity(words.len());

        for word in &words {
            if word.trim().is_empty() {
                return Err(Error::Config("ストップワードに空の語が含まれています".into()));
            }
            let pattern = format!(r"(?i)\b{}\b", regex::escape(word));
            let re = Regex::new(&pattern)
                .map_err(|e| Error::Config(format!("ストップワード「{}」の正規表現エラー: {}", word, e)))?;
            patterns.push(re);
        }

        Ok(Self { words, patterns })
    }

    /// 組み込みのインド住所用リスト
    pub fn indian_default() -> Self {
        lazy_static::lazy_static! {
            static ref INDIAN_DEFAULT: StopwordSet =
                StopwordSet::new(INDIAN_STOPWORDS.iter().copied()).unwrap();
        }
        INDIAN_DEFAULT.clone()
    }

    /// 空の集合（ストップワード除去なし）
    pub fn empty() -> Self {
        Self {
            words: Vec::new(),
            patterns: Vec::new(),
        }
    }

    /// 組み込みプリセットを取得
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "indian" | "india" | "default" => Some(Self::indian_default()),
            "none" | "empty" => Some(Self::empty()),
            _ => None,
        }
    }

    /// JSONファイル（文字列配列）から読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列（文字列配列）から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let words: Vec<String> = serde_json::from_str(json)?;
        Self::new(words)
    }

    /// 語の一覧（適用順）
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// 全ストップワードを順に除去する
    pub fn strip(&self, text: &str) -> String {
        let mut result = text.to_string();
        for re in &self.patterns {
            if re.is_match(&result) {
                result = re.replace_all(&result, "").into_owned();
            }
        }
        result
    }
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::indian_default()
    }
}
