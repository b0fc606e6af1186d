//! 接続先ベースURLの設定
//!
//! 検索API・商品API・画像サーバはそれぞれ別ホストで動くことがあるため、
//! ベースURLを3つ持つ。環境変数があればそちらを優先する。

use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};

pub const SEARCH_URL_ENV: &str = "IMAGE_SEARCH_SEARCH_URL";
pub const PRODUCT_URL_ENV: &str = "IMAGE_SEARCH_PRODUCT_URL";
pub const IMAGE_URL_ENV: &str = "IMAGE_SEARCH_IMAGE_URL";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub search_url: String,
    pub product_url: String,
    pub image_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_BASE_URL.to_string(),
            product_url: DEFAULT_BASE_URL.to_string(),
            image_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// 環境変数（またはそれに相当するlookup）で上書き
    ///
    /// 空文字の値は無視する。
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = pick(SEARCH_URL_ENV) {
            self.search_url = url;
        }
        if let Some(url) = pick(PRODUCT_URL_ENV) {
            self.product_url = url;
        }
        if let Some(url) = pick(IMAGE_URL_ENV) {
            self.image_url = url;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("search_url", &self.search_url),
            ("product_url", &self.product_url),
            ("image_url", &self.image_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::Config(format!("{} must be an http(s) URL: {:?}", name, url)));
            }
        }
        Ok(())
    }

    /// `POST /search/`
    pub fn search_endpoint(&self) -> String {
        join_url(&self.search_url, "search/")
    }

    /// `POST /add/`
    pub fn add_endpoint(&self) -> String {
        join_url(&self.search_url, "add/")
    }

    /// `GET /products/{item_id}`
    pub fn product_endpoint(&self, item_id: &str) -> String {
        join_url(&self.product_url, &format!("products/{}", item_id))
    }

    /// `GET /images/{image_path}`
    pub fn image_endpoint(&self, image_path: &str) -> String {
        join_url(
            &self.image_url,
            &format!("images/{}", image_path.trim_start_matches('/')),
        )
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
