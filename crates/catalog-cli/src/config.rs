use std::path::PathBuf;

use catalog::DEFAULT_PAGE_SIZE;
use catalog_http::{DEFAULT_CONCURRENCY, FetchStrategy, HttpSourceConfig};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the configured API URL.
pub const API_URL_ENV: &str = "CATALOG_API_URL";

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    /// First page of the character list. Defaults to the public API.
    #[serde(default)]
    pub api_url: Option<String>,
    /// Items in the first page of the display window, and per "load more".
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub strategy: FetchStrategy,
    /// Pages fetched in parallel with the `pages` strategy.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            page_size: DEFAULT_PAGE_SIZE,
            strategy: FetchStrategy::default(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl AppConfig {
    /// Apply environment overrides, looking variables up through `lookup`.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.is_empty()) {
            self.api_url = Some(url);
        }
        self
    }

    pub fn source_config(&self) -> HttpSourceConfig {
        HttpSourceConfig {
            base_url: self.api_url.clone(),
            strategy: self.strategy,
            concurrency: self.concurrency,
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

/// Config file path: `~/.config/character-catalog/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("character-catalog").join("config.toml"))
}

/// Load config from file, falling back to defaults if missing, then apply env overrides.
pub fn load_config() -> AppConfig {
    let mut config = AppConfig::default();

    if let Some(path) = config_path()
        && let Ok(contents) = std::fs::read_to_string(&path)
    {
        match toml::from_str::<AppConfig>(&contents) {
            Ok(parsed) => config = parsed,
            Err(e) => tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to parse config, using defaults"
            ),
        }
    }

    config.with_env(|key| std::env::var(key).ok())
}
