use super::SyncError;
use cnyre_core::Compression;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What a sync pass did
#[derive(Debug, Clone, PartialEq)]
pub enum SyncAction {
    /// Local marker matches the remote one and the data file is present
    UpToDate { version: String },
    /// A fresh copy was materialized
    Downloaded(DownloadSummary),
    /// The remote store could not be constructed; nothing was attempted
    Unavailable(SyncError),
    /// The transfer was attempted and failed; any prior copy is untouched
    Failed(SyncError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DownloadSummary {
    /// Remote marker written locally, if it could be read
    pub version: Option<String>,
    pub transferred_bytes: u64,
    pub materialized_bytes: u64,
    pub compression: Compression,
    pub duration: Duration,
}

/// Result of `SyncManager::ensure_fresh_local_copy`
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub action: SyncAction,
    /// Local database path when the file exists after the pass
    pub local_path: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl SyncReport {
    pub fn local_path(&self) -> Option<&Path> {
        self.local_path.as_deref()
    }

    pub fn downloaded(&self) -> bool {
        matches!(self.action, SyncAction::Downloaded(_))
    }

    pub fn error(&self) -> Option<&SyncError> {
        match &self.action {
            SyncAction::Unavailable(e) | SyncAction::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// One-line status suitable for showing to a user
    pub fn status_message(&self) -> String {
        match &self.action {
            SyncAction::UpToDate { version } => {
                format!("Local data is current (version {})", version)
            }
            SyncAction::Downloaded(summary) => {
                let mb = |bytes: u64| bytes as f64 / (1024.0 * 1024.0);
                match summary.compression {
                    Compression::Gzip => format!(
                        "Download complete: {:.2} MB compressed → {:.2} MB decompressed",
                        mb(summary.transferred_bytes),
                        mb(summary.materialized_bytes)
                    ),
                    Compression::None => format!(
                        "Download complete: {:.2} MB",
                        mb(summary.materialized_bytes)
                    ),
                }
            }
            SyncAction::Unavailable(e) => {
                format!("Remote data unavailable, using local copy if present: {}", e)
            }
            SyncAction::Failed(e) => format!("Failed to download latest database: {}", e),
        }
    }
}
