use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageSearchError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像形式を判定できません: {0}")]
    UnsupportedImage(String),

    #[error("検索に失敗しました: {0}")]
    SearchFailed(String),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API呼び出しエラー: {0}")]
    Api(#[from] image_search_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(String),
}

pub type Result<T> = std::result::Result<T, ImageSearchError>;
