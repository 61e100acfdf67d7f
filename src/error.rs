use thiserror::Error;

#[derive(Error, Debug)]
pub enum OvdMatchError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("ワークブックが見つかりません: {0}")]
    NoWorkbooksFound(String),

    #[error("スプレッドシート読み込みエラー: {0}")]
    SheetRead(#[from] calamine::Error),

    #[error("ワークシートが空です: {0}")]
    EmptySheet(String),

    #[error("必須列がありません: {0}")]
    MissingColumn(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(#[from] rust_xlsxwriter::XlsxError),

    #[error("フィールド指定が不正です（\"列名=値\" 形式）: {0}")]
    InvalidFieldArg(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] ovd_match_common::Error),
}

pub type Result<T> = std::result::Result<T, OvdMatchError>;
