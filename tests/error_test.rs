//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use recipe_tag_rust::error::RecipeTagError;
use recipe_tag_rust::exporter;
use recipe_tag_rust::matcher::Table;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = exporter::scan_folder(Path::new("/nonexistent/path/12345"), false);
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, RecipeTagError::FolderNotFound(_)));
}

/// 空のフォルダをスキャンした場合
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = exporter::scan_folder(dir.path(), false);

    // 空フォルダはエラーではなく空のVecを返す
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// 存在しないCSVを読んだ場合
#[test]
fn test_table_from_missing_csv() {
    let result = Table::from_csv_path(Path::new("/nonexistent/metadata.csv"));
    assert!(matches!(result, Err(RecipeTagError::FileNotFound(_))));
}

/// RecipeTagErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        RecipeTagError::Config("テスト設定エラー".to_string()),
        RecipeTagError::FileNotFound("test.csv".to_string()),
        RecipeTagError::FolderNotFound("/path/to/folder".to_string()),
        RecipeTagError::EmptyCsv("empty.csv".to_string()),
        RecipeTagError::ExifTool("exiftool実行失敗".to_string()),
        RecipeTagError::Table("カラム数不一致".to_string()),
        RecipeTagError::Prompt("入力中断".to_string()),
        RecipeTagError::NoImagesFound("フォルダ".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// MissingColumnのメッセージにカラム名とパスが含まれる
#[test]
fn test_missing_column_message() {
    let err = RecipeTagError::MissingColumn {
        column: "SourceFile".to_string(),
        path: "metadata.csv".to_string(),
    };
    let display = format!("{}", err);

    assert!(display.contains("SourceFile"));
    assert!(display.contains("metadata.csv"));
}

/// エラーのDebug実装確認
#[test]
fn test_error_debug() {
    let err = RecipeTagError::Config("テスト".to_string());
    let debug = format!("{:?}", err);

    assert!(debug.contains("Config"));
    assert!(debug.contains("テスト"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: RecipeTagError = io_err.into();

    assert!(matches!(err, RecipeTagError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: RecipeTagError = json_err.into();

    assert!(matches!(err, RecipeTagError::JsonParse(_)));
}

/// CSVエンジンのエラーがそのまま伝播する
#[test]
fn test_csv_error_conversion() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("ragged.csv");
    std::fs::write(&path, "A,B\n1,2,3\n").unwrap();

    let err = Table::from_csv_path(&path).unwrap_err();

    assert!(matches!(err, RecipeTagError::Csv(_)));
    // エンジンの診断メッセージが失われていない
    let display = format!("{}", err);
    assert!(display.contains("CSV"));
}
