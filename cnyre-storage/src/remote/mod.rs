//! Snapshot storage backends

pub mod local;
pub mod s3;

pub use local::LocalDirStore;
pub use s3::{S3Settings, S3SnapshotStore};

use crate::sync::SyncError;
use cnyre_core::{RemoteConfig, SnapshotStore};
use std::sync::Arc;

/// Factory for snapshot storage backends
///
/// Failure here is not fatal to callers: it means "remote unavailable".
pub fn create_store(config: &RemoteConfig) -> Result<Arc<dyn SnapshotStore>, SyncError> {
    match config {
        RemoteConfig::S3 {
            bucket,
            region,
            prefix,
            endpoint,
            access_key_id,
            secret_access_key,
            ..
        } => Ok(Arc::new(S3SnapshotStore::new(S3Settings {
            bucket: bucket.clone(),
            region: region.clone(),
            prefix: prefix.clone(),
            endpoint: endpoint.clone(),
            access_key_id: access_key_id.clone(),
            secret_access_key: secret_access_key.clone(),
        })?)),
        RemoteConfig::Local { root, .. } => Ok(Arc::new(LocalDirStore::new(root.clone())?)),
    }
}
