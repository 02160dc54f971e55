//! Crawl-and-persist routine
//!
//! One run: read the previous snapshot (only to report on it), probe every
//! configured source in order, write a brand new snapshot over the old one.

use crate::config::RefresherConfig;
use crate::models::Snapshot;
use crate::probe::{HttpProber, Prober};
use crate::store::SnapshotStore;
use crate::RefresherError;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing::info;

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub snapshot: Snapshot,
    pub path: PathBuf,
    pub active: usize,
    pub inactive: usize,
}

pub struct Refresher<P = HttpProber> {
    store: SnapshotStore,
    sources: Vec<String>,
    prober: P,
}

impl Refresher<HttpProber> {
    pub fn from_config(config: &RefresherConfig) -> Result<Self, RefresherError> {
        let prober = HttpProber::new(config.timeout())?;
        Ok(Self::new(
            SnapshotStore::new(config.data_file.clone()),
            config.sources.clone(),
            prober,
        ))
    }
}

impl<P: Prober> Refresher<P> {
    pub fn new(store: SnapshotStore, sources: Vec<String>, prober: P) -> Self {
        Self { store, sources, prober }
    }

    pub async fn run(&self) -> Result<RunReport, RefresherError> {
        let started_at = Utc::now();
        info!("Starting WebID crawler...");

        let existing = self.store.load_existing().await;
        info!(
            origin = %existing.origin,
            entries = existing.snapshot.entries.len(),
            "previous snapshot"
        );

        let mut entries = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            info!("Checking: {source}");
            entries.push(self.prober.probe(source).await);
        }

        let snapshot = Snapshot::new(entries);
        self.store.save(&snapshot).await?;

        let (active, inactive) = snapshot.tally();
        info!("Crawl completed. Found {} WebIDs.", snapshot.entries.len());
        info!("Data saved to: {}", self.store.path().display());
        info!("Active: {active}, Inactive: {inactive}");

        Ok(RunReport {
            started_at,
            path: self.store.path().to_path_buf(),
            snapshot,
            active,
            inactive,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entry, EntryStatus};
    use std::sync::Mutex;
    use webid_devkit::TestHarness;

    /// Marks URLs containing "up" as active and records the call order
    #[derive(Default)]
    struct ScriptedProber {
        calls: Mutex<Vec<String>>,
    }

    impl Prober for ScriptedProber {
        async fn probe(&self, url: &str) -> Entry {
            self.calls.lock().unwrap().push(url.to_string());
            let status = if url.contains("up") { EntryStatus::Active } else { EntryStatus::Inactive };
            Entry::probed(url, status)
        }
    }

    fn sources() -> Vec<String> {
        vec![
            "https://up.example/a#me".to_string(),
            "https://down.example/b#me".to_string(),
            "https://up.example/c#me".to_string(),
        ]
    }

    #[tokio::test]
    async fn test_run_probes_in_order_and_tallies() {
        let harness = TestHarness::new().unwrap();
        let refresher = Refresher::new(
            SnapshotStore::new(harness.data_file()),
            sources(),
            ScriptedProber::default(),
        );

        let report = refresher.run().await.unwrap();

        assert_eq!(*refresher.prober.calls.lock().unwrap(), sources());
        assert_eq!((report.active, report.inactive), (2, 1));
        let urls: Vec<_> = report.snapshot.entries.iter().map(|e| e.url.clone()).collect();
        assert_eq!(urls, sources());
        assert!(report.snapshot.entries.iter().all(|e| e.last_updated >= report.started_at));
    }

    #[tokio::test]
    async fn test_previous_entries_are_not_merged() {
        let harness = TestHarness::new().unwrap();
        let old = webid_devkit::snapshot_json(&[
            ("https://old.example/1#me", "active"),
            ("https://old.example/2#me", "active"),
            ("https://old.example/3#me", "active"),
            ("https://old.example/4#me", "active"),
        ]);
        harness.write_file("data/webids.json", &old.to_string()).unwrap();

        let refresher = Refresher::new(
            SnapshotStore::new(harness.data_file()),
            vec!["https://down.example/only#me".to_string()],
            ScriptedProber::default(),
        );
        let report = refresher.run().await.unwrap();

        let written = harness.read_json(&report.path).unwrap();
        let entries = written["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["url"], "https://down.example/only#me");
        assert_eq!(entries[0]["status"], "inactive");
    }

    #[tokio::test]
    async fn test_empty_source_list_writes_empty_snapshot() {
        let harness = TestHarness::new().unwrap();
        let refresher = Refresher::new(
            SnapshotStore::new(harness.data_file()),
            Vec::new(),
            ScriptedProber::default(),
        );

        let report = refresher.run().await.unwrap();

        assert_eq!((report.active, report.inactive), (0, 0));
        assert!(harness.data_file().exists());
    }

    #[tokio::test]
    async fn test_unwritable_destination_is_fatal() {
        let harness = TestHarness::new().unwrap();
        let blocker = harness.write_file("data", "not a directory").unwrap();
        let refresher = Refresher::new(
            SnapshotStore::new(blocker.join("webids.json")),
            sources(),
            ScriptedProber::default(),
        );

        assert!(refresher.run().await.is_err());
    }
}
