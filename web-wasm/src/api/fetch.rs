//! fetch APIによる検索バックエンド呼び出し

use image_search_common::{Endpoints, Error, Result, SearchApi, SearchResponse};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, RequestMode, Response};

/// ブラウザ上のAPIクライアント
#[derive(Clone)]
pub struct FetchClient {
    endpoints: Endpoints,
}

impl FetchClient {
    pub fn new(endpoints: Endpoints) -> Self {
        Self { endpoints }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

impl SearchApi for FetchClient {
    type File = File;

    async fn search(&self, file: &File, top_k: u32) -> Result<SearchResponse> {
        let url = self.endpoints.search_endpoint();

        let result: Result<SearchResponse> = async {
            let form = FormData::new().map_err(js_error)?;
            form.append_with_blob_and_filename("file", file, &file.name())
                .map_err(js_error)?;
            form.append_with_str("top_k", &top_k.to_string())
                .map_err(js_error)?;

            let text = fetch_text("POST", &url, Some(form.as_ref())).await?;
            Ok(serde_json::from_str(&text)?)
        }
        .await;

        if let Err(e) = &result {
            gloo::console::error!(format!("Search error: {}", e));
        }
        result
    }

    async fn product_detail(&self, item_id: &str) -> Result<Value> {
        let url = self.endpoints.product_endpoint(item_id);

        let result: Result<Value> = async {
            let text = fetch_text("GET", &url, None).await?;
            Ok(serde_json::from_str(&text)?)
        }
        .await;

        if let Err(e) = &result {
            gloo::console::warn!(format!("Product fetch error: {}", e));
        }
        result
    }
}

async fn fetch_text(method: &str, url: &str, body: Option<&JsValue>) -> Result<String> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = body {
        opts.set_body(body);
    }

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;

    let window = web_sys::window()
        .ok_or_else(|| Error::Transport("window is not available".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let resp: Response = resp_value.dyn_into().map_err(js_error)?;

    if !resp.ok() {
        return Err(Error::Status {
            status: resp.status(),
            url: url.to_string(),
        });
    }

    let text = JsFuture::from(resp.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    text.as_string()
        .ok_or_else(|| Error::Transport("response body is not text".to_string()))
}

/// JS側の例外を通信エラーに変換
fn js_error(value: JsValue) -> Error {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value));
    Error::Transport(message)
}
