//! Snapshot file model
//!
//! Field names follow the on-disk JSON (`lastCrawl`, `lastUpdated`), which is
//! also what the search API reads back.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// ISO-8601 with millisecond precision, e.g. `2025-01-02T03:04:05.678Z`
fn millis<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Active,
    Inactive,
}

/// Latest probe outcome for one source URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(serialize_with = "millis")]
    pub last_updated: DateTime<Utc>,
    pub status: EntryStatus,
}

impl Entry {
    /// Entry stamped with the current time
    pub fn probed(url: &str, status: EntryStatus) -> Self {
        Self {
            url: url.to_string(),
            name: None,
            last_updated: Utc::now(),
            status,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == EntryStatus::Active
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(serialize_with = "millis")]
    pub last_crawl: DateTime<Utc>,
    pub entries: Vec<Entry>,
}

impl Snapshot {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            last_crawl: Utc::now(),
            entries,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// (active, inactive) counts
    pub fn tally(&self) -> (usize, usize) {
        let active = self.entries.iter().filter(|e| e.is_active()).count();
        (active, self.entries.len() - active)
    }
}

/// Where a loaded snapshot came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotOrigin {
    Disk,
    Missing,
    Unreadable(String),
}

impl SnapshotOrigin {
    /// True when the empty fallback was returned instead of file content
    pub fn is_fallback(&self) -> bool {
        !matches!(self, SnapshotOrigin::Disk)
    }
}

impl fmt::Display for SnapshotOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotOrigin::Disk => write!(f, "disk"),
            SnapshotOrigin::Missing => write!(f, "missing"),
            SnapshotOrigin::Unreadable(reason) => write!(f, "unreadable ({reason})"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedSnapshot {
    pub snapshot: Snapshot,
    pub origin: SnapshotOrigin,
}
