//! 接続先設定
//!
//! ビルド時の環境変数で上書きできる（`trunk build` 実行時に指定）。

use image_search_common::endpoints::{IMAGE_URL_ENV, PRODUCT_URL_ENV, SEARCH_URL_ENV};
use image_search_common::Endpoints;

/// ビルド時に埋め込まれた接続先
pub fn endpoints() -> Endpoints {
    let endpoints = Endpoints::default().with_overrides(build_time_value);
    match endpoints.validate() {
        Ok(()) => endpoints,
        Err(e) => {
            gloo::console::warn!(format!("{}; using defaults", e));
            Endpoints::default()
        }
    }
}

fn build_time_value(key: &str) -> Option<String> {
    let value = match key {
        SEARCH_URL_ENV => option_env!("IMAGE_SEARCH_SEARCH_URL"),
        PRODUCT_URL_ENV => option_env!("IMAGE_SEARCH_PRODUCT_URL"),
        IMAGE_URL_ENV => option_env!("IMAGE_SEARCH_IMAGE_URL"),
        _ => None,
    };
    value.map(str::to_string)
}
