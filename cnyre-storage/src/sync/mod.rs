//! Remote-to-local snapshot synchronization

pub mod error;
pub mod manager;
pub mod report;

pub use error::SyncError;
pub use manager::SyncManager;
pub use report::{DownloadSummary, SyncAction, SyncReport};
