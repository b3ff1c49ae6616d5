//! Result types produced by the backup manager and the sync engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Record of one backup snapshot. Created on each destructive write,
/// never mutated afterwards. Retention/pruning is out of scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupRecord {
    /// Host slug the backed-up file belongs to.
    pub host: String,
    /// Path of the live config file at backup time.
    pub original_path: PathBuf,
    /// Where the snapshot was written.
    pub backup_path: PathBuf,
    /// When the backup was created.
    pub created: DateTime<Utc>,
}

/// Aggregate outcome of a multi-destination sync, in destination order.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub destinations: Vec<DestinationResult>,
}

impl SyncReport {
    /// True if every destination succeeded with no recorded failures.
    pub fn is_success(&self) -> bool {
        self.destinations.iter().all(DestinationResult::is_success)
    }

    pub fn result_for(&self, host: &str) -> Option<&DestinationResult> {
        self.destinations.iter().find(|d| d.host == host)
    }
}

/// Outcome for a single sync destination.
///
/// Per-server validation failures and destination-level errors are recorded
/// here instead of aborting the sync; each destination file is an
/// independently consistent resource.
#[derive(Debug, Clone)]
pub struct DestinationResult {
    pub host: String,
    /// Server names successfully written to the destination file.
    pub written: Vec<String>,
    /// Servers rejected by the destination's adapter.
    pub failures: Vec<ServerFailure>,
    /// Destination-level failure (unknown host, I/O error), if any.
    pub error: Option<String>,
}

impl DestinationResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.failures.is_empty()
    }
}

/// A single server entry the destination's adapter refused.
#[derive(Debug, Clone)]
pub struct ServerFailure {
    pub server: String,
    pub reason: String,
}
