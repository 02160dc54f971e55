//! WebID directory refresher
//!
//! Probes a configured list of WebID profile documents and replaces the
//! directory snapshot (`data/webids.json` by default) with the fresh results.

pub mod config;
pub mod models;
pub mod probe;
pub mod refresher;
pub mod store;

use std::path::PathBuf;

pub use config::{load_config, RefresherConfig};
pub use models::{Entry, EntryStatus, LoadedSnapshot, Snapshot, SnapshotOrigin};
pub use probe::{HttpProber, Prober, RDF_ACCEPT};
pub use refresher::{Refresher, RunReport};
pub use store::SnapshotStore;

/// Errors that abort a refresh run
#[derive(Debug, thiserror::Error)]
pub enum RefresherError {
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write snapshot to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
