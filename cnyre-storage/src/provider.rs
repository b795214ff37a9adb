//! Sync-then-load pipeline memoized for the cache window

use crate::cache::TtlCache;
use crate::loader::{DatasetLoader, LoadError};
use crate::sync::{SyncAction, SyncManager, SyncReport};
use chrono::{DateTime, Utc};
use cnyre_core::{Clock, Config, PropertyTable, SystemClock};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Table plus everything a front end needs to tell the user how it got here
#[derive(Debug)]
pub struct LoadedDataset {
    pub table: Arc<PropertyTable>,
    pub sync: SyncReport,
    pub load_error: Option<LoadError>,
    pub loaded_at: DateTime<Utc>,
}

impl LoadedDataset {
    /// Messages worth surfacing; empty when everything was routine
    pub fn status_messages(&self) -> Vec<String> {
        let mut messages = Vec::new();
        if !matches!(self.sync.action, SyncAction::UpToDate { .. }) {
            messages.push(self.sync.status_message());
        }
        messages.extend(self.sync.warnings.iter().cloned());
        if let Some(e) = &self.load_error {
            messages.push(e.to_string());
        } else if self.table.is_empty() && self.sync.local_path().is_none() {
            messages.push("No local data available".to_string());
        }
        messages
    }
}

pub struct DatasetProvider<C: Clock + Clone = SystemClock> {
    sync: SyncManager,
    loader: DatasetLoader,
    sync_cache: TtlCache<PathBuf, SyncReport, C>,
    data_cache: TtlCache<PathBuf, Arc<LoadedDataset>, C>,
}

impl DatasetProvider<SystemClock> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(SyncManager::from_config(config), config.cache.ttl())
    }

    pub fn new(sync: SyncManager, ttl: Duration) -> Self {
        Self::with_clock(sync, ttl, SystemClock)
    }
}

impl<C: Clock + Clone> DatasetProvider<C> {
    pub fn with_clock(sync: SyncManager, ttl: Duration, clock: C) -> Self {
        let loader = DatasetLoader::new(sync.database_path());
        Self {
            sync,
            loader,
            sync_cache: TtlCache::with_clock(ttl, clock.clone()),
            data_cache: TtlCache::with_clock(ttl, clock),
        }
    }

    pub fn sync_manager(&self) -> &SyncManager {
        &self.sync
    }

    fn key(&self) -> PathBuf {
        self.sync.database_path().to_path_buf()
    }

    /// Outcome of the most recent staleness check, re-checking once the window lapses
    pub fn sync_report(&self) -> SyncReport {
        self.sync_cache.get_or_insert_with(self.key(), || {
            tracing::debug!("Sync decision cache miss");
            self.sync.ensure_fresh_local_copy()
        })
    }

    /// The loaded table, shared until the window lapses
    pub fn dataset(&self) -> Arc<LoadedDataset> {
        self.data_cache.get_or_insert_with(self.key(), || {
            tracing::debug!("Dataset cache miss");
            let sync = self.sync_report();
            let (table, load_error) = self.loader.load_or_empty();
            Arc::new(LoadedDataset {
                table: Arc::new(table),
                sync,
                load_error,
                loaded_at: Utc::now(),
            })
        })
    }

    /// Drop both caches and rebuild
    pub fn refresh(&self) -> Arc<LoadedDataset> {
        tracing::info!("Refreshing dataset");
        self.sync_cache.clear();
        self.data_cache.clear();
        self.dataset()
    }

    /// Download regardless of version markers; the next `dataset` call reloads
    pub fn force_sync(&self) -> SyncReport {
        let report = self.sync.force_download();
        self.sync_cache.insert(self.key(), report.clone());
        self.data_cache.clear();
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cnyre_core::{Compression, LocalConfig, SnapshotObjects, SnapshotStore};
    use cnyre_test::fixtures::gzip_file;
    use cnyre_test::{sample_properties, write_fixture_database, ManualClock, MockSnapshotStore};
    use crate::sync::SyncError;
    use tempfile::TempDir;

    const TTL: Duration = Duration::from_secs(3600);

    struct Harness {
        _dir: TempDir,
        store: Arc<MockSnapshotStore>,
        clock: Arc<ManualClock>,
        provider: DatasetProvider<Arc<ManualClock>>,
    }

    fn harness() -> Harness {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.db");
        let gz = dir.path().join("source.db.gz");
        write_fixture_database(&source, &sample_properties()).unwrap();
        gzip_file(&source, &gz).unwrap();

        let store = Arc::new(MockSnapshotStore::new());
        store.put("version.txt", "2024-06-01\n");
        store
            .put_file(&SnapshotObjects::default().data_key, &gz)
            .unwrap();

        let local = LocalConfig {
            data_dir: Some(dir.path().join("data")),
            ..LocalConfig::default()
        };
        let shared: Arc<dyn SnapshotStore> = store.clone();
        let sync = SyncManager::new(Ok(shared), SnapshotObjects::default(), &local);
        let clock = Arc::new(ManualClock::new());
        let provider = DatasetProvider::with_clock(sync, TTL, Arc::clone(&clock));

        Harness {
            _dir: dir,
            store,
            clock,
            provider,
        }
    }

    #[test]
    fn test_dataset_is_reused_within_window() {
        let h = harness();

        let first = h.provider.dataset();
        assert_eq!(first.table.len(), 6);
        assert!(first.sync.downloaded());

        h.clock.advance(TTL / 2);
        let second = h.provider.dataset();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(h.store.read_count(), 1);
        assert_eq!(h.store.download_count(), 1);
    }

    #[test]
    fn test_expired_window_rechecks_without_redownloading() {
        let h = harness();
        let first = h.provider.dataset();

        h.clock.advance(TTL);
        let second = h.provider.dataset();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(h.store.read_count(), 2);
        assert_eq!(h.store.download_count(), 1);
        assert!(matches!(second.sync.action, SyncAction::UpToDate { .. }));
        assert!(second.status_messages().is_empty());
    }

    #[test]
    fn test_refresh_recomputes_immediately() {
        let h = harness();
        let first = h.provider.dataset();
        let refreshed = h.provider.refresh();

        assert!(!Arc::ptr_eq(&first, &refreshed));
        assert_eq!(h.store.read_count(), 2);
        assert_eq!(refreshed.table.len(), 6);
    }

    #[test]
    fn test_force_sync_downloads_and_invalidates() {
        let h = harness();
        let first = h.provider.dataset();

        let report = h.provider.force_sync();
        assert!(report.downloaded());
        assert_eq!(h.store.download_count(), 2);

        let second = h.provider.dataset();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(h.provider.sync_report(), report);
    }

    #[test]
    fn test_unavailable_remote_without_local_copy() {
        let dir = TempDir::new().unwrap();
        let local = LocalConfig {
            data_dir: Some(dir.path().to_path_buf()),
            ..LocalConfig::default()
        };
        let sync = SyncManager::new(
            Err(SyncError::Credentials("no keys".to_string())),
            SnapshotObjects {
                compression: Compression::Gzip,
                ..SnapshotObjects::default()
            },
            &local,
        );
        let provider = DatasetProvider::with_clock(sync, TTL, Arc::new(ManualClock::new()));

        let dataset = provider.dataset();
        assert!(dataset.table.is_empty());
        assert!(dataset.load_error.is_none());

        let messages = dataset.status_messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with("Remote data unavailable"));
        assert_eq!(messages[1], "No local data available");
    }
}
