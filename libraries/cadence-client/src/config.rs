//! Client configuration
//!
//! Loaded from an optional `cadence.toml`, then overridden by `CADENCE_*`
//! environment variables (`CADENCE_BASE_URL`, `CADENCE_TIMEOUT_MS`).

use crate::error::{ApiError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

const CONFIG_FILE: &str = "cadence.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientConfig {
    /// API base URL, also used for media and cover URLs
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ClientConfig {
    /// Configuration for `base_url` with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: default_timeout_ms(),
        }
    }

    /// Load configuration from `cadence.toml` (if present) and environment
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load configuration from `path` (if present) and environment
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut settings = config::Config::builder();

        if path.exists() {
            settings = settings.add_source(config::File::from(path));
        }

        // Override with environment variables (prefixed with CADENCE_)
        settings = settings.add_source(
            config::Environment::with_prefix("CADENCE").try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ApiError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(ApiError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ApiError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        if self.timeout_ms == 0 {
            return Err(ApiError::Config("timeout_ms must be greater than 0".into()));
        }

        Ok(())
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(default_base_url())
    }
}

// Default values
fn default_base_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8081");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: ClientConfig = serde_json::from_str(r#"{"timeout_ms": 5000}"#).unwrap();
        assert_eq!(config.base_url, "http://localhost:8081");
        assert_eq!(config.timeout_ms, 5000);
    }

    #[test]
    fn file_values_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cadence.toml");
        std::fs::write(
            &path,
            "base_url = \"https://music.example.com\"\ntimeout_ms = 1500\n",
        )
        .unwrap();

        let config = ClientConfig::load_from(&path).unwrap();

        assert_eq!(config.base_url, "https://music.example.com");
        assert_eq!(config.timeout_ms, 1500);
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(matches!(
            ClientConfig::new("").validate(),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            ClientConfig::new("ftp://example.com").validate(),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            ClientConfig::new("example.com").validate(),
            Err(ApiError::InvalidUrl(_))
        ));

        let mut config = ClientConfig::default();
        config.timeout_ms = 0;
        assert!(matches!(config.validate(), Err(ApiError::Config(_))));
    }
}
