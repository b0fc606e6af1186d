//! アップロードする画像ファイル
//!
//! 形式チェックは拡張子からMIMEタイプを決めるだけで、中身は検証しない。

use crate::error::{ImageSearchError, Result};
use image::ImageFormat;
use image_search_common::PreviewHandle;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ImageFile {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ImageSearchError::FileNotFound(path.display().to_string()));
        }

        let mime_type = detect_mime_type(path)?;
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            mime_type,
            bytes,
        })
    }
}

/// 拡張子から画像のMIMEタイプを決める
pub fn detect_mime_type(path: &Path) -> Result<&'static str> {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .map_err(|_| ImageSearchError::UnsupportedImage(path.display().to_string()))
}

/// ターミナル用のプレビュー（ローカルパスを表示するだけ）
pub struct LocalPreview(String);

impl LocalPreview {
    pub fn new(path: &Path) -> Self {
        Self(path.display().to_string())
    }
}

impl PreviewHandle for LocalPreview {
    fn url(&self) -> &str {
        &self.0
    }
}
