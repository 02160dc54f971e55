use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("api_base must be an http(s) URL, got {0:?}")]
    ApiBase(String),
    #[error("timeout_ms must be greater than zero")]
    ZeroTimeout,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub listen: SocketAddr,
    pub api_base: String, // host serving /api/search
    pub timeout_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([0, 0, 0, 0], 3000)),
            api_base: "http://127.0.0.1:8080".into(),
            timeout_ms: 10_000,
        }
    }
}

impl SearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(text)?;
        if !(config.api_base.starts_with("http://") || config.api_base.starts_with("https://")) {
            return Err(ConfigError::ApiBase(config.api_base));
        }
        if config.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(config)
    }
}

/// Loads `$WEBID_SEARCH_CONFIG` (or `search.yaml`), falling back to defaults
pub async fn load_config() -> SearchConfig {
    let path = std::env::var("WEBID_SEARCH_CONFIG").unwrap_or_else(|_| "search.yaml".into());
    load_config_from(Path::new(&path)).await
}

pub async fn load_config_from(path: &Path) -> SearchConfig {
    if !path.exists() {
        info!("no {} found, using default configuration", path.display());
        return SearchConfig::default();
    }
    let txt = fs::read_to_string(path).await.unwrap_or_default();
    SearchConfig::parse(&txt).unwrap_or_else(|e| {
        warn!("invalid configuration in {}: {e}, using defaults", path.display());
        SearchConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::parse("").unwrap();
        assert_eq!(config.listen.port(), 3000);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_parse_and_validate() {
        let config = SearchConfig::parse("listen: 127.0.0.1:4000\napi_base: https://search.example\n").unwrap();
        assert_eq!(config.listen, "127.0.0.1:4000".parse().unwrap());
        assert_eq!(config.api_base, "https://search.example");

        assert!(matches!(SearchConfig::parse("api_base: ftp://x"), Err(ConfigError::ApiBase(_))));
        assert!(matches!(SearchConfig::parse("timeout_ms: 0"), Err(ConfigError::ZeroTimeout)));
    }

    #[tokio::test]
    async fn test_invalid_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search.yaml");
        std::fs::write(&path, "listen: nowhere").unwrap();

        let config = load_config_from(&path).await;
        assert_eq!(config.api_base, SearchConfig::default().api_base);
    }
}
