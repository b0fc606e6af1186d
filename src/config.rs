use crate::error::{ImageSearchError, Result};
use image_search_common::Endpoints;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(flatten)]
    pub endpoints: Endpoints,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ImageSearchError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("image-search").join("config.json"))
    }

    /// 実際に使う接続先（環境変数を優先）
    pub fn endpoints(&self) -> Result<Endpoints> {
        let endpoints = self
            .endpoints
            .clone()
            .with_overrides(|key| std::env::var(key).ok());
        endpoints.validate()?;
        Ok(endpoints)
    }

    /// 指定されたURLだけ更新
    pub fn set_urls(
        &mut self,
        search_url: Option<String>,
        product_url: Option<String>,
        image_url: Option<String>,
    ) -> Result<bool> {
        let mut next = self.endpoints.clone();
        if let Some(url) = search_url {
            next.search_url = url;
        }
        if let Some(url) = product_url {
            next.product_url = url;
        }
        if let Some(url) = image_url {
            next.image_url = url;
        }
        next.validate()?;

        let changed = next != self.endpoints;
        self.endpoints = next;
        Ok(changed)
    }
}
