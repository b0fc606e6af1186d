//! 検索バックエンドのHTTPクライアント（reqwest）
//!
//! - POST /search/        multipart: file, top_k
//! - GET  /products/{id}  任意のJSON
//! - POST /add/           multipart: file（?image_path=...）

use crate::error::Result;
use crate::upload::ImageFile;
use image_search_common::{Endpoints, Error, SearchApi, SearchResponse};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// /add/ のレスポンス
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddImageResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub image_id: Option<String>,
}

pub struct HttpClient {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl HttpClient {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// 画像を検索インデックスに登録
    pub async fn add_image(&self, file: &ImageFile, image_path: Option<&str>) -> Result<AddImageResponse> {
        let url = self.endpoints.add_endpoint();
        let form = Form::new().part("file", file_part(file)?);

        let mut request = self.http.post(&url).multipart(form);
        if let Some(path) = image_path {
            request = request.query(&[("image_path", path)]);
        }

        tracing::debug!(url = %url, file = %file.file_name, "POST add");
        let response = check_status(request.send().await?)?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl SearchApi for HttpClient {
    type File = ImageFile;

    async fn search(&self, file: &ImageFile, top_k: u32) -> image_search_common::Result<SearchResponse> {
        let url = self.endpoints.search_endpoint();
        let form = Form::new()
            .part("file", file_part(file).map_err(transport)?)
            .text("top_k", top_k.to_string());

        tracing::debug!(url = %url, file = %file.file_name, top_k, "POST search");
        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        let response = check_status(response)?;
        let text = response.text().await.map_err(transport)?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn product_detail(&self, item_id: &str) -> image_search_common::Result<Value> {
        let url = self.endpoints.product_endpoint(item_id);

        tracing::debug!(url = %url, "GET product");
        let response = self.http.get(&url).send().await.map_err(transport)?;
        let response = check_status(response)?;
        let text = response.text().await.map_err(transport)?;
        Ok(serde_json::from_str(&text)?)
    }
}

fn file_part(file: &ImageFile) -> reqwest::Result<Part> {
    Part::bytes(file.bytes.clone())
        .file_name(file.file_name.clone())
        .mime_str(file.mime_type)
}

fn check_status(response: reqwest::Response) -> image_search_common::Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(Error::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}

fn transport(e: reqwest::Error) -> Error {
    Error::Transport(e.to_string())
}
