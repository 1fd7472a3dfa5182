//! Configuration for storefront clients.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::product_list::DEFAULT_PAGE_SIZE;
use crate::types::{Category, SortType};

/// Environment variable overriding `Config::api_base_url`.
pub const API_URL_ENV: &str = "STOREFRONT_API_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("page_size must be at least 1")]
    InvalidPageSize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub sort_type: SortType,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            page_size: default_page_size(),
            category: Category::default(),
            sort_type: SortType::default(),
        }
    }
}

impl Config {
    /// Apply `STOREFRONT_API_URL` if it is set and non-empty.
    pub fn apply_env(&mut self) {
        self.apply_api_url(std::env::var(API_URL_ENV).ok());
    }

    fn apply_api_url(&mut self, value: Option<String>) {
        if let Some(url) = value.filter(|url| !url.trim().is_empty()) {
            tracing::debug!("{} overrides api_base_url with {}", API_URL_ENV, url);
            self.api_base_url = url;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }
        Ok(())
    }
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Load and validate a JSON configuration file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}
