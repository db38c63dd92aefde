use thiserror::Error;

#[derive(Error, Debug)]
#[allow(dead_code)]
pub enum AlkanaUploadError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("Excelファイルとして読み込めません: {0}")]
    Parse(String),

    #[error("対応していない拡張子です: {0}（対応形式: .xlsx / .xls / .xlsm）")]
    UnsupportedExtension(String),

    #[error("ファイルサイズが上限を超えています: {0}")]
    FileTooLarge(String),

    #[error("対象期間が指定されていません。`--period YYYY-MM` で指定してください")]
    MissingPeriod,

    #[error("対象期間が不正です: {0}")]
    InvalidPeriod(String),

    #[error("日付が不正です: {0}")]
    InvalidDate(String),

    #[error("対話入力エラー: {0}")]
    Prompt(String),

    #[error("APIエラー: {0}")]
    Api(String),

    #[error("アップロード処理が失敗しました: {0}")]
    UploadFailed(String),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AlkanaUploadError>;
