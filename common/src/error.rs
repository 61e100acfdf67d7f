//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// 照合処理そのものはエラーを返さない。ここに現れるのは設定の不備のみ。
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
