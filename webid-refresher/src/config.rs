use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{info, warn};

pub const DEFAULT_DATA_FILE: &str = "data/webids.json";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

pub const DEFAULT_SOURCES: &[&str] = &[
    "https://www.w3.org/People/Berners-Lee/card#i",
    "https://timbl.inrupt.net/profile/card#me",
];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("timeout_ms must be greater than zero")]
    ZeroTimeout,
    #[error("source #{0} is empty")]
    EmptySource(usize),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefresherConfig {
    pub data_file: PathBuf,
    pub timeout_ms: u64,
    pub sources: Vec<String>, // probed in this order
}

impl Default for RefresherConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl RefresherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if let Some(index) = self.sources.iter().position(|s| s.trim().is_empty()) {
            return Err(ConfigError::EmptySource(index));
        }
        Ok(())
    }
}

/// Loads `$WEBID_REFRESHER_CONFIG` (or `refresher.yaml`), falling back to defaults.
/// `WEBID_DATA_FILE` overrides the snapshot path either way.
pub async fn load_config() -> RefresherConfig {
    let path = std::env::var("WEBID_REFRESHER_CONFIG").unwrap_or_else(|_| "refresher.yaml".into());
    let mut config = load_config_from(Path::new(&path)).await;

    if let Ok(data_file) = std::env::var("WEBID_DATA_FILE") {
        if !data_file.trim().is_empty() {
            config.data_file = PathBuf::from(data_file);
        }
    }
    config
}

pub async fn load_config_from(path: &Path) -> RefresherConfig {
    if !path.exists() {
        info!("no {} found, using default configuration", path.display());
        return RefresherConfig::default();
    }

    let text = match fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) => {
            warn!("cannot read {}: {e}, using default configuration", path.display());
            return RefresherConfig::default();
        }
    };

    RefresherConfig::parse(&text).unwrap_or_else(|e| {
        warn!("invalid configuration in {}: {e}, using defaults", path.display());
        RefresherConfig::default()
    })
}
