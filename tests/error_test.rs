//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use ovd_match::batch::{self, BatchOptions};
use ovd_match::error::OvdMatchError;
use ovd_match::sheet::{self, Cell, Table};
use ovd_match::{cli, remarks, scanner};
use ovd_match_common::AddressMatcher;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_workbooks(Path::new("/nonexistent/path/12345"), false);
    assert!(matches!(result, Err(OvdMatchError::FolderNotFound(_))));
}

/// ワークブックのないフォルダをスキャンした場合
#[test]
fn test_scan_folder_no_workbooks() {
    let dir = tempdir().expect("Failed to create temp dir");

    std::fs::write(dir.path().join("test.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("data.csv"), "a,b").unwrap();

    // 空でもエラーではなく空のVecを返す
    let result = scanner::scan_workbooks(dir.path(), true);
    assert!(result.unwrap().is_empty());
}

/// 存在しないワークブックを読み込んだ場合
#[test]
fn test_read_missing_workbook() {
    let result = sheet::read_table(Path::new("/nonexistent/input.xlsx"));
    assert!(matches!(result, Err(OvdMatchError::FileNotFound(_))));
}

/// ワークブックでないファイルを読み込んだ場合
#[test]
fn test_read_broken_workbook() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, "not a zip file").unwrap();

    let result = sheet::read_table(&path);
    assert!(matches!(result, Err(OvdMatchError::SheetRead(_))));
}

/// 抽出住所列がない表を照合した場合
#[test]
fn test_process_without_address_column() {
    let mut table = Table::new("Sheet1", vec!["City".to_string()]);
    table.rows.push(vec![Cell::Text("Mumbai".into())]);

    let result = batch::process_table(&mut table, &AddressMatcher::default(), &BatchOptions::default());
    match result {
        Err(OvdMatchError::MissingColumn(name)) => assert_eq!(name, batch::EXTRACTED_ADDRESS_COLUMN),
        other => panic!("expected MissingColumn, got {:?}", other.map(|r| r.summary)),
    }
}

/// UIDスコア列がない表に備考を付与した場合
#[test]
fn test_remarks_without_uid_column() {
    let mut table = Table::new("Sheet1", vec![batch::FINAL_SCORE_COLUMN.to_string()]);
    let result = remarks::apply_final_remarks(&mut table);
    assert!(matches!(result, Err(OvdMatchError::MissingColumn(_))));
}

/// 不正なフィールド指定
#[test]
fn test_invalid_field_args() {
    let args = vec!["City=Mumbai".to_string(), "Mumbai".to_string()];
    assert!(matches!(cli::record_from_args(&args), Err(OvdMatchError::InvalidFieldArg(_))));

    let args = vec!["Landmark=Near Mall".to_string()];
    assert!(matches!(cli::record_from_args(&args), Err(OvdMatchError::Common(_))));
}

/// OvdMatchErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        OvdMatchError::Config("テスト設定エラー".to_string()),
        OvdMatchError::FileNotFound("input.xlsx".to_string()),
        OvdMatchError::FolderNotFound("/path/to/folder".to_string()),
        OvdMatchError::NoWorkbooksFound("フォルダ".to_string()),
        OvdMatchError::EmptySheet("input.xlsx".to_string()),
        OvdMatchError::MissingColumn("PINCODE".to_string()),
        OvdMatchError::InvalidFieldArg("Mumbai".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空");
    }
}

/// 共通クレートのエラーはそのままのメッセージで伝わる
#[test]
fn test_common_error_is_transparent() {
    let inner = ovd_match_common::Error::UnknownField("Landmark".to_string());
    let expected = inner.to_string();
    let err: OvdMatchError = inner.into();
    assert_eq!(err.to_string(), expected);
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: OvdMatchError = io_err.into();
    assert!(matches!(err, OvdMatchError::Io(_)));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
    let err: OvdMatchError = json_err.into();
    assert!(matches!(err, OvdMatchError::JsonParse(_)));
}
