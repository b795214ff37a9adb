/// Integration tests for the sync → load pipeline against a directory mirror
///
/// These drive the storage crate through `Config` the same way the CLI does,
/// with `TestEnvironment` standing in for the published bucket.
use cnyre_core::Compression;
use cnyre_storage::{DatasetProvider, SyncAction, SyncManager};
use cnyre_test::{sample_properties, FixtureProperty, TestEnvironment};
use std::fs;

#[test]
fn test_gzip_snapshot_end_to_end() {
    let env = TestEnvironment::new().unwrap();
    env.publish_snapshot(&sample_properties(), "2024-06-01", Compression::Gzip)
        .unwrap();
    let config = env.config(Compression::Gzip);

    let provider = DatasetProvider::from_config(&config);
    let dataset = provider.dataset();

    assert!(dataset.sync.downloaded());
    assert_eq!(dataset.table.len(), 6);
    assert!(dataset.load_error.is_none());
    assert!(env.data_dir().join("cny-real-estate.db").exists());
    assert_eq!(
        fs::read_to_string(env.data_dir().join("version.txt")).unwrap(),
        "2024-06-01"
    );
}

#[test]
fn test_second_manager_sees_current_copy() {
    let env = TestEnvironment::new().unwrap();
    env.publish_snapshot(&sample_properties(), "v1", Compression::None)
        .unwrap();
    let config = env.config(Compression::None);

    assert!(SyncManager::from_config(&config)
        .ensure_fresh_local_copy()
        .downloaded());

    // A new process reuses the copy on disk
    let report = SyncManager::from_config(&config).ensure_fresh_local_copy();
    assert!(matches!(report.action, SyncAction::UpToDate { .. }));
}

#[test]
fn test_republished_snapshot_replaces_local_copy() {
    let env = TestEnvironment::new().unwrap();
    env.publish_snapshot(&sample_properties(), "v1", Compression::Gzip)
        .unwrap();
    let config = env.config(Compression::Gzip);
    SyncManager::from_config(&config).ensure_fresh_local_copy();

    let mut updated = sample_properties();
    updated.push(FixtureProperty::new("OSW-003", "Oswego", 210000.0));
    env.publish_snapshot(&updated, "v2", Compression::Gzip)
        .unwrap();

    let provider = DatasetProvider::from_config(&config);
    let dataset = provider.dataset();
    assert!(dataset.sync.downloaded());
    assert_eq!(dataset.table.len(), 7);
}

#[test]
fn test_missing_mirror_degrades_to_local_copy() {
    let env = TestEnvironment::new().unwrap();
    env.publish_snapshot(&sample_properties(), "v1", Compression::Gzip)
        .unwrap();
    let config = env.config(Compression::Gzip);
    SyncManager::from_config(&config).ensure_fresh_local_copy();

    fs::remove_dir_all(env.mirror_dir()).unwrap();

    let dataset = DatasetProvider::from_config(&config).dataset();
    assert!(matches!(dataset.sync.action, SyncAction::Unavailable(_)));
    assert_eq!(dataset.table.len(), 6);
}
