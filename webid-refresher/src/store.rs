//! Snapshot persistence on the local filesystem

use crate::models::{LoadedSnapshot, Snapshot, SnapshotOrigin};
use crate::RefresherError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the previous snapshot. Never fails: a missing or unreadable
    /// file yields an empty snapshot stamped now, with the reason in `origin`.
    pub async fn load_existing(&self) -> LoadedSnapshot {
        let origin = match fs::read_to_string(&self.path).await {
            Ok(content) => match serde_json::from_str::<Snapshot>(&content) {
                Ok(snapshot) => {
                    debug!(path = %self.path.display(), entries = snapshot.entries.len(), "loaded existing snapshot");
                    return LoadedSnapshot { snapshot, origin: SnapshotOrigin::Disk };
                }
                Err(e) => SnapshotOrigin::Unreadable(e.to_string()),
            },
            Err(e) if e.kind() == ErrorKind::NotFound => SnapshotOrigin::Missing,
            Err(e) => SnapshotOrigin::Unreadable(e.to_string()),
        };

        if let SnapshotOrigin::Unreadable(reason) = &origin {
            warn!(path = %self.path.display(), "error loading existing data: {reason}");
        }

        LoadedSnapshot {
            snapshot: Snapshot::empty(),
            origin,
        }
    }

    /// Replaces the file with `snapshot`, creating parent directories first
    pub async fn save(&self, snapshot: &Snapshot) -> Result<(), RefresherError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| RefresherError::CreateDir { path: parent.to_path_buf(), source })?;
        }

        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, json)
            .await
            .map_err(|source| RefresherError::Write { path: self.path.clone(), source })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entry, EntryStatus};
    use chrono::Utc;
    use webid_devkit::{snapshot_json, TestHarness};

    #[tokio::test]
    async fn test_missing_file_gives_empty_snapshot() {
        let harness = TestHarness::new().unwrap();
        let before = Utc::now();

        let loaded = SnapshotStore::new(harness.data_file()).load_existing().await;

        assert_eq!(loaded.origin, SnapshotOrigin::Missing);
        assert!(loaded.snapshot.entries.is_empty());
        assert!(loaded.snapshot.last_crawl >= before);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported_not_raised() {
        let harness = TestHarness::new().unwrap();
        let path = harness.write_file("data/webids.json", "{ not json").unwrap();

        let loaded = SnapshotStore::new(path).load_existing().await;

        assert!(matches!(loaded.origin, SnapshotOrigin::Unreadable(_)));
        assert!(loaded.snapshot.entries.is_empty());
    }

    #[tokio::test]
    async fn test_existing_file_is_loaded() {
        let harness = TestHarness::new().unwrap();
        let content = snapshot_json(&[("https://a.example/card#me", "active")]).to_string();
        let path = harness.write_file("data/webids.json", &content).unwrap();

        let loaded = SnapshotStore::new(path).load_existing().await;

        assert_eq!(loaded.origin, SnapshotOrigin::Disk);
        assert_eq!(loaded.snapshot.entries.len(), 1);
        assert!(loaded.snapshot.entries[0].is_active());
    }

    #[tokio::test]
    async fn test_save_creates_directories_and_overwrites() {
        let harness = TestHarness::new().unwrap();
        let store = SnapshotStore::new(harness.root().join("a/b/webids.json"));

        let first = Snapshot::new(vec![
            Entry::probed("https://one.example/#me", EntryStatus::Active),
            Entry::probed("https://two.example/#me", EntryStatus::Inactive),
        ]);
        store.save(&first).await.unwrap();
        let second = Snapshot::new(vec![Entry::probed("https://three.example/#me", EntryStatus::Active)]);
        store.save(&second).await.unwrap();

        let value = harness.read_json(store.path()).unwrap();
        assert_eq!(value["entries"].as_array().unwrap().len(), 1);
        assert_eq!(value["entries"][0]["url"], "https://three.example/#me");
    }

    #[tokio::test]
    async fn test_save_into_unwritable_location_fails() {
        let harness = TestHarness::new().unwrap();
        let blocker = harness.write_file("blocker", "plain file").unwrap();
        let store = SnapshotStore::new(blocker.join("webids.json"));

        let err = store.save(&Snapshot::empty()).await.unwrap_err();
        assert!(matches!(err, RefresherError::CreateDir { .. }));
    }
}
