//! Keeps the local snapshot copy in step with the remote store
//!
//! The version marker is the only staleness signal. A fresh copy is
//! downloaded into a temporary file next to the database and renamed into
//! place only once it is complete, so a failed transfer never clobbers the
//! copy already on disk.

use super::report::{DownloadSummary, SyncAction, SyncReport};
use super::SyncError;
use crate::compression::{gunzip_file, needs_decoding};
use crate::remote::create_store;
use cnyre_core::{Config, LocalConfig, SnapshotObjects, SnapshotStore};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tempfile::NamedTempFile;

pub struct SyncManager {
    store: Result<Arc<dyn SnapshotStore>, SyncError>,
    objects: SnapshotObjects,
    data_dir: PathBuf,
    database_path: PathBuf,
    version_path: PathBuf,
}

struct Materialized {
    transferred: u64,
    materialized: u64,
}

impl SyncManager {
    pub fn from_config(config: &Config) -> Self {
        let store = create_store(&config.remote);
        if let Err(e) = &store {
            tracing::warn!("Remote snapshot store unavailable: {}", e);
        }
        Self::new(store, config.remote.objects().clone(), &config.local)
    }

    /// Build from an already constructed (or failed) store
    pub fn new(
        store: Result<Arc<dyn SnapshotStore>, SyncError>,
        objects: SnapshotObjects,
        local: &LocalConfig,
    ) -> Self {
        Self {
            store,
            objects,
            data_dir: local.data_dir(),
            database_path: local.database_path(),
            version_path: local.version_path(),
        }
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    pub fn version_path(&self) -> &Path {
        &self.version_path
    }

    /// Location of the remote store, or None when it could not be built
    pub fn store_description(&self) -> Option<String> {
        self.store.as_ref().ok().map(|s| s.describe())
    }

    /// Locally recorded version marker, trimmed
    pub fn local_version(&self) -> Option<String> {
        fs::read_to_string(&self.version_path)
            .ok()
            .map(|v| v.trim().to_string())
    }

    /// Download only if the local copy is missing or out of date
    pub fn ensure_fresh_local_copy(&self) -> SyncReport {
        let store = match &self.store {
            Ok(store) => store.as_ref(),
            Err(e) => return self.report(SyncAction::Unavailable(e.clone()), Vec::new()),
        };

        let remote_version = self.remote_version(store);
        let local_version = self.local_version();

        if let (Some(remote), Some(local)) = (&remote_version, &local_version) {
            if remote == local && self.database_path.exists() {
                tracing::debug!("Local snapshot is current at version {}", local);
                return self.report(
                    SyncAction::UpToDate {
                        version: local.clone(),
                    },
                    Vec::new(),
                );
            }
        }

        tracing::info!(
            "Local snapshot is stale (local: {}, remote: {})",
            local_version.as_deref().unwrap_or("none"),
            remote_version.as_deref().unwrap_or("unknown")
        );
        self.fetch(store, remote_version)
    }

    /// Download unconditionally
    pub fn force_download(&self) -> SyncReport {
        match &self.store {
            Ok(store) => {
                let store = store.as_ref();
                let remote_version = self.remote_version(store);
                self.fetch(store, remote_version)
            }
            Err(e) => self.report(SyncAction::Unavailable(e.clone()), Vec::new()),
        }
    }

    fn remote_version(&self, store: &dyn SnapshotStore) -> Option<String> {
        match store.read_text(&self.objects.version_key) {
            Ok(text) => Some(text.trim().to_string()),
            Err(e) => {
                tracing::warn!("Could not read remote version marker: {:#}", e);
                None
            }
        }
    }

    fn fetch(&self, store: &dyn SnapshotStore, remote_version: Option<String>) -> SyncReport {
        tracing::info!(
            "Downloading {} from {}",
            self.objects.data_key,
            store.describe()
        );
        let started = Instant::now();

        let sizes = match self.materialize(store) {
            Ok(sizes) => sizes,
            Err(e) => {
                tracing::warn!("Snapshot download failed, keeping existing copy: {}", e);
                return self.report(SyncAction::Failed(e), Vec::new());
            }
        };

        let mut warnings = Vec::new();
        if sizes.materialized == 0 {
            tracing::warn!("Downloaded snapshot is empty");
            warnings.push(format!(
                "Downloaded database {} is empty",
                self.database_path.display()
            ));
        }

        match &remote_version {
            Some(version) => {
                if let Err(e) = fs::write(&self.version_path, version) {
                    tracing::warn!("Failed to record version marker: {}", e);
                    warnings.push(format!("Failed to record version marker: {}", e));
                    self.discard_version_file();
                }
            }
            None => {
                // A leftover marker could otherwise match a later remote value
                self.discard_version_file();
                warnings.push(
                    "Remote version marker unavailable; the next sync will download again"
                        .to_string(),
                );
            }
        }

        let summary = DownloadSummary {
            version: remote_version,
            transferred_bytes: sizes.transferred,
            materialized_bytes: sizes.materialized,
            compression: self.objects.compression,
            duration: started.elapsed(),
        };
        tracing::info!(
            "Snapshot materialized at {} ({} bytes in {:?})",
            self.database_path.display(),
            summary.materialized_bytes,
            summary.duration
        );
        self.report(SyncAction::Downloaded(summary), warnings)
    }

    fn materialize(&self, store: &dyn SnapshotStore) -> Result<Materialized, SyncError> {
        fs::create_dir_all(&self.data_dir)?;

        let download = NamedTempFile::new_in(&self.data_dir)?;
        let transferred = store
            .download(&self.objects.data_key, download.path())
            .map_err(|e| SyncError::Transfer(format!("{:#}", e)))?;

        let staged = if needs_decoding(self.objects.compression) {
            let decoded = NamedTempFile::new_in(&self.data_dir)?;
            gunzip_file(download.path(), decoded.path())
                .map_err(|e| SyncError::Decompress(e.to_string()))?;
            decoded
        } else {
            download
        };

        let materialized = fs::metadata(staged.path())?.len();
        staged
            .persist(&self.database_path)
            .map_err(|e| SyncError::Io(e.error.to_string()))?;

        Ok(Materialized {
            transferred,
            materialized,
        })
    }

    fn discard_version_file(&self) {
        if self.version_path.exists() {
            if let Err(e) = fs::remove_file(&self.version_path) {
                tracing::warn!("Failed to remove stale version marker: {}", e);
            }
        }
    }

    fn report(&self, action: SyncAction, warnings: Vec<String>) -> SyncReport {
        SyncReport {
            action,
            local_path: self
                .database_path
                .exists()
                .then(|| self.database_path.clone()),
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cnyre_core::Compression;
    use cnyre_test::fixtures::gzip_file;
    use cnyre_test::MockSnapshotStore;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::TempDir;

    const DATA_KEY: &str = "cny-real-estate.db.gz";

    struct Harness {
        dir: TempDir,
        store: Arc<MockSnapshotStore>,
        manager: SyncManager,
    }

    fn harness(compression: Compression) -> Harness {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(MockSnapshotStore::new());
        let local = LocalConfig {
            data_dir: Some(dir.path().join("data")),
            ..LocalConfig::default()
        };
        let objects = SnapshotObjects {
            data_key: DATA_KEY.to_string(),
            compression,
            ..SnapshotObjects::default()
        };
        let shared: Arc<dyn SnapshotStore> = store.clone();
        let manager = SyncManager::new(Ok(shared), objects, &local);
        Harness {
            dir,
            store,
            manager,
        }
    }

    fn publish_plain(store: &MockSnapshotStore, version: &str, body: &[u8]) {
        store.put("version.txt", version);
        store.put(DATA_KEY, body.to_vec());
    }

    fn data_dir_entries(manager: &SyncManager) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&manager.data_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_first_sync_downloads_and_records_version() {
        let h = harness(Compression::None);
        publish_plain(&h.store, "2024-06-01\n", b"snapshot-a");

        let report = h.manager.ensure_fresh_local_copy();

        assert!(report.downloaded());
        assert_eq!(h.store.download_count(), 1);
        assert_eq!(report.local_path(), Some(h.manager.database_path()));
        assert_eq!(fs::read(h.manager.database_path()).unwrap(), b"snapshot-a");
        assert_eq!(h.manager.local_version().as_deref(), Some("2024-06-01"));
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_equal_versions_skip_download() {
        let h = harness(Compression::None);
        publish_plain(&h.store, "v1", b"snapshot-a");
        h.manager.ensure_fresh_local_copy();

        // Trailing whitespace on the remote marker is not a difference
        h.store.put("version.txt", "v1\n");
        let report = h.manager.ensure_fresh_local_copy();

        assert_eq!(
            report.action,
            SyncAction::UpToDate {
                version: "v1".to_string()
            }
        );
        assert_eq!(h.store.download_count(), 1);
    }

    #[test]
    fn test_changed_version_downloads_exactly_once() {
        let h = harness(Compression::None);
        publish_plain(&h.store, "v1", b"snapshot-a");
        h.manager.ensure_fresh_local_copy();

        publish_plain(&h.store, "v2", b"snapshot-b");
        let report = h.manager.ensure_fresh_local_copy();
        assert!(report.downloaded());
        assert_eq!(h.store.download_count(), 2);

        h.manager.ensure_fresh_local_copy();
        assert_eq!(h.store.download_count(), 2);
        assert_eq!(fs::read(h.manager.database_path()).unwrap(), b"snapshot-b");
    }

    #[test]
    fn test_missing_database_forces_download() {
        let h = harness(Compression::None);
        publish_plain(&h.store, "v1", b"snapshot-a");
        h.manager.ensure_fresh_local_copy();

        fs::remove_file(h.manager.database_path()).unwrap();
        let report = h.manager.ensure_fresh_local_copy();

        assert!(report.downloaded());
        assert_eq!(h.store.download_count(), 2);
    }

    #[test]
    fn test_failed_transfer_keeps_prior_copy() {
        let h = harness(Compression::None);
        publish_plain(&h.store, "v1", b"snapshot-a");
        h.manager.ensure_fresh_local_copy();

        publish_plain(&h.store, "v2", b"snapshot-b");
        h.store.fail_downloads(true);
        let report = h.manager.ensure_fresh_local_copy();

        assert!(matches!(report.action, SyncAction::Failed(SyncError::Transfer(_))));
        assert_eq!(report.local_path(), Some(h.manager.database_path()));
        assert_eq!(fs::read(h.manager.database_path()).unwrap(), b"snapshot-a");
        assert_eq!(h.manager.local_version().as_deref(), Some("v1"));
        assert_eq!(
            data_dir_entries(&h.manager),
            vec!["cny-real-estate.db".to_string(), "version.txt".to_string()]
        );
    }

    #[test]
    fn test_unreadable_remote_version_is_stale() {
        let h = harness(Compression::None);
        publish_plain(&h.store, "v1", b"snapshot-a");
        h.manager.ensure_fresh_local_copy();

        h.store.fail_reads(true);
        let report = h.manager.ensure_fresh_local_copy();

        assert!(report.downloaded());
        assert_eq!(h.store.download_count(), 2);
        assert_eq!(h.manager.local_version(), None);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_zero_byte_download_is_a_warning() {
        let h = harness(Compression::None);
        publish_plain(&h.store, "v1", b"");

        let report = h.manager.ensure_fresh_local_copy();

        assert!(report.downloaded());
        assert!(report.error().is_none());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("empty"));
    }

    #[test]
    fn test_unavailable_store_uses_local_copy() {
        let dir = TempDir::new().unwrap();
        let local = LocalConfig {
            data_dir: Some(dir.path().to_path_buf()),
            ..LocalConfig::default()
        };
        let manager = SyncManager::new(
            Err(SyncError::Credentials("no keys".to_string())),
            SnapshotObjects::default(),
            &local,
        );

        let report = manager.ensure_fresh_local_copy();
        assert!(matches!(report.action, SyncAction::Unavailable(_)));
        assert_eq!(report.local_path(), None);

        fs::write(manager.database_path(), b"old").unwrap();
        let report = manager.force_download();
        assert!(report.error().unwrap().is_unavailable());
        assert_eq!(report.local_path(), Some(manager.database_path()));
    }

    #[rstest]
    #[case::gzip(Compression::Gzip)]
    #[case::plain(Compression::None)]
    fn test_materializes_decoded_bytes(#[case] compression: Compression) {
        let h = harness(compression);
        let payload = b"SQLite format 3\0 payload bytes".to_vec();

        let source = h.dir.path().join("source.db");
        fs::write(&source, &payload).unwrap();
        let object = match compression {
            Compression::Gzip => {
                let gz = h.dir.path().join("source.db.gz");
                gzip_file(&source, &gz).unwrap();
                gz
            }
            Compression::None => source,
        };
        h.store.put("version.txt", "v1");
        h.store.put_file(DATA_KEY, &object).unwrap();

        let report = h.manager.ensure_fresh_local_copy();

        match &report.action {
            SyncAction::Downloaded(summary) => {
                assert_eq!(summary.materialized_bytes, payload.len() as u64);
                assert_eq!(summary.compression, compression);
                assert_eq!(summary.version.as_deref(), Some("v1"));
            }
            other => panic!("expected download, got {:?}", other),
        }
        assert_eq!(fs::read(h.manager.database_path()).unwrap(), payload);
    }

    #[test]
    fn test_corrupt_gzip_keeps_prior_copy() {
        let h = harness(Compression::Gzip);
        let dir = h.dir.path();
        fs::write(dir.join("a.db"), b"snapshot-a").unwrap();
        gzip_file(&dir.join("a.db"), &dir.join("a.db.gz")).unwrap();
        h.store.put("version.txt", "v1");
        h.store.put_file(DATA_KEY, &dir.join("a.db.gz")).unwrap();
        h.manager.ensure_fresh_local_copy();

        publish_plain(&h.store, "v2", b"definitely not gzip");
        let report = h.manager.ensure_fresh_local_copy();

        assert!(matches!(report.action, SyncAction::Failed(SyncError::Decompress(_))));
        assert_eq!(fs::read(h.manager.database_path()).unwrap(), b"snapshot-a");
        assert_eq!(h.manager.local_version().as_deref(), Some("v1"));
    }

    #[test]
    fn test_force_download_ignores_matching_version() {
        let h = harness(Compression::None);
        publish_plain(&h.store, "v1", b"snapshot-a");
        h.manager.ensure_fresh_local_copy();

        let report = h.manager.force_download();
        assert!(report.downloaded());
        assert_eq!(h.store.download_count(), 2);
    }
}
