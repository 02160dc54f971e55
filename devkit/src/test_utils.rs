/*!
Test harness for the refresher and the search page

Bundles what most integration tests need:
- logging initialised once for test output
- a scratch directory for snapshot files
- helpers to read back what was written
*/

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestHarness {
    dir: TempDir,
}

impl TestHarness {
    pub fn new() -> Result<Self> {
        env_logger::builder().is_test(true).try_init().ok();
        let dir = tempfile::tempdir().context("failed to create scratch directory")?;
        log::info!("🧪 Scratch directory at {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Snapshot path nested under a directory that does not exist yet
    pub fn data_file(&self) -> PathBuf {
        self.dir.path().join("data").join("webids.json")
    }

    pub fn write_file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(path)
    }

    pub fn read_json(&self, path: &Path) -> Result<Value> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_round_trips_json() {
        let harness = TestHarness::new().unwrap();
        assert!(!harness.data_file().exists());

        let path = harness.write_file("nested/file.json", r#"{"ok": true}"#).unwrap();
        let value = harness.read_json(&path).unwrap();
        assert_eq!(value["ok"], true);
    }
}
