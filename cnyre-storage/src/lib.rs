//! Snapshot storage for the CNY real estate browser
//!
//! Keeps a local copy of the published SQLite snapshot in step with remote
//! storage, loads it into a `PropertyTable`, and memoizes both steps for a
//! bounded window.

pub mod cache;
pub mod compression;
pub mod loader;
pub mod provider;
pub mod remote;
pub mod sync;

pub use cache::TtlCache;
pub use loader::{DatasetLoader, LoadError};
pub use provider::{DatasetProvider, LoadedDataset};
pub use remote::{create_store, LocalDirStore, S3SnapshotStore};
pub use sync::{DownloadSummary, SyncAction, SyncError, SyncManager, SyncReport};
