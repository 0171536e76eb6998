use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecipeTagError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("CSVが空です（ヘッダ行が必要）: {0}")]
    EmptyCsv(String),

    #[error("必須カラム {column} がありません: {path}")]
    MissingColumn { column: String, path: String },

    #[error("CSV処理エラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("表操作エラー: {0}")]
    Table(String),

    #[error("exiftool実行エラー: {0}")]
    ExifTool(String),

    #[error("対話入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),
}

pub type Result<T> = std::result::Result<T, RecipeTagError>;
