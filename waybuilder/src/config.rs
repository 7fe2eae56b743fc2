//! Application configuration file.
//!
//! The configuration is a small JSON document:
//!
//! ```json
//! {
//!   "api_key": "...",
//!   "api_url": "https://api.rasp.yandex.net",
//!   "api_version": "v3.0",
//!   "point_list_path": "data/points.json"
//! }
//! ```
//!
//! Everything except `api_key` has a default. The `RASP_API_KEY`
//! environment variable, when set, takes precedence over the file's key.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::{CacheConfig, DEFAULT_CAPACITY, DEFAULT_TTL};
use crate::rasp::{DEFAULT_BASE_URL, DEFAULT_LANG, DEFAULT_VERSION, RaspConfig};
use crate::resolve::{DEFAULT_MAX_RESULTS, ResolverConfig};

/// Environment variable overriding `api_key`.
pub const API_KEY_ENV: &str = "RASP_API_KEY";

fn default_api_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_version() -> String {
    DEFAULT_VERSION.to_string()
}

fn default_api_lang() -> String {
    DEFAULT_LANG.to_string()
}

fn default_point_list_path() -> PathBuf {
    PathBuf::from("points.json")
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

/// Errors that can occur when loading or saving the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_api_lang")]
    pub api_lang: String,

    /// Where `scan points` results are stored.
    #[serde(default = "default_point_list_path")]
    pub point_list_path: PathBuf,

    /// Maximum number of cached route searches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_capacity: Option<usize>,

    /// Lifetime of a cached route search, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_ttl_secs: Option<u64>,

    /// Suggestions offered per point kind when a name is ambiguous.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<usize>,

    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

impl AppConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Load the configuration from a file, applying environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        Ok(config.with_api_key_override(std::env::var(API_KEY_ENV).ok()))
    }

    /// Parse a configuration from a JSON string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration back as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Replace the key with `key` if it is set and not blank.
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.api_key = key;
        }
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_capacity == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "cache_capacity",
                reason: "must be at least 1".to_string(),
            });
        }

        if self.max_results == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "max_results",
                reason: "must be at least 1".to_string(),
            });
        }

        if self.cache_ttl_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "cache_ttl_secs",
                reason: "must be at least 1".to_string(),
            });
        }

        if self.api_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_url",
                reason: "must not be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn rasp_config(&self) -> RaspConfig {
        RaspConfig::new(&self.api_key)
            .with_base_url(&self.api_url)
            .with_version(&self.api_version)
            .with_lang(&self.api_lang)
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::default()
            .with_capacity(
                self.cache_capacity
                    .and_then(NonZeroUsize::new)
                    .unwrap_or(DEFAULT_CAPACITY),
            )
            .with_ttl(self.cache_ttl_secs.map_or(DEFAULT_TTL, Duration::from_secs))
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig::new(self.max_results.unwrap_or(DEFAULT_MAX_RESULTS))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_api_url(),
            api_version: default_api_version(),
            api_lang: default_api_lang(),
            point_list_path: default_point_list_path(),
            cache_capacity: None,
            cache_ttl_secs: None,
            max_results: None,
            log_dir: default_log_dir(),
        }
    }
}
