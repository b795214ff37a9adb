//! Read-only access to the published snapshot objects
use anyhow::Result;
use std::path::Path;

/// Common interface for snapshot storage backends
///
/// Calls block the current thread. Implementations that talk to async SDKs
/// are expected to drive their own runtime internally.
pub trait SnapshotStore: Send + Sync {
    /// Human readable location, used in logs and status output
    fn describe(&self) -> String;

    /// Read a small text object such as the version marker
    fn read_text(&self, key: &str) -> Result<String>;

    /// Copy an object into `dest`, returning the number of bytes written
    fn download(&self, key: &str, dest: &Path) -> Result<u64>;
}

impl<T: SnapshotStore + ?Sized> SnapshotStore for Box<T> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn read_text(&self, key: &str) -> Result<String> {
        (**self).read_text(key)
    }

    fn download(&self, key: &str, dest: &Path) -> Result<u64> {
        (**self).download(key, dest)
    }
}

impl<T: SnapshotStore + ?Sized> SnapshotStore for std::sync::Arc<T> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn read_text(&self, key: &str) -> Result<String> {
        (**self).read_text(key)
    }

    fn download(&self, key: &str, dest: &Path) -> Result<u64> {
        (**self).download(key, dest)
    }
}
