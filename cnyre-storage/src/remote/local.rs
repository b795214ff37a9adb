//! Directory mirror of the snapshot bucket, used offline and in tests

use crate::sync::SyncError;
use anyhow::{Context, Result};
use cnyre_core::SnapshotStore;
use std::fs;
use std::path::{Path, PathBuf};

pub struct LocalDirStore {
    root: PathBuf,
}

impl LocalDirStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, SyncError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(SyncError::Configuration(format!(
                "snapshot mirror {} is not a directory",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    fn object_path(&self, key: &str) -> PathBuf {
        self.root.join(key.trim_start_matches('/'))
    }
}

impl SnapshotStore for LocalDirStore {
    fn describe(&self) -> String {
        format!("file://{}", self.root.display())
    }

    fn read_text(&self, key: &str) -> Result<String> {
        let path = self.object_path(key);
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    fn download(&self, key: &str, dest: &Path) -> Result<u64> {
        let path = self.object_path(key);
        fs::copy(&path, dest)
            .with_context(|| format!("Failed to copy {} to {}", path.display(), dest.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_root_is_configuration_error() {
        let result = LocalDirStore::new("/nonexistent/cnyre/mirror");
        assert!(matches!(result, Err(SyncError::Configuration(_))));
    }

    #[test]
    fn test_read_and_download() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("version.txt"), "2024-06-01\n").unwrap();
        fs::write(dir.path().join("data.db"), b"0123456789").unwrap();

        let store = LocalDirStore::new(dir.path()).unwrap();
        assert_eq!(store.read_text("version.txt").unwrap(), "2024-06-01\n");

        let dest = dir.path().join("copy.db");
        assert_eq!(store.download("data.db", &dest).unwrap(), 10);
        assert!(store.read_text("absent.txt").is_err());
    }
}
