//! In-memory snapshot store that records how it is used

use anyhow::{anyhow, Result};
use cnyre_core::SnapshotStore;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Default)]
pub struct MockSnapshotStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    downloads: AtomicUsize,
    text_reads: AtomicUsize,
    fail_downloads: AtomicBool,
    fail_reads: AtomicBool,
}

impl MockSnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, key: &str, bytes: impl Into<Vec<u8>>) {
        self.objects.lock().insert(key.to_string(), bytes.into());
    }

    pub fn put_file(&self, key: &str, path: &Path) -> Result<()> {
        let bytes = std::fs::read(path)?;
        self.put(key, bytes);
        Ok(())
    }

    pub fn remove(&self, key: &str) {
        self.objects.lock().remove(key);
    }

    /// Number of `download` calls, successful or not
    pub fn download_count(&self) -> usize {
        self.downloads.load(Ordering::SeqCst)
    }

    /// Number of `read_text` calls, successful or not
    pub fn read_count(&self) -> usize {
        self.text_reads.load(Ordering::SeqCst)
    }

    pub fn fail_downloads(&self, fail: bool) {
        self.fail_downloads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

impl SnapshotStore for MockSnapshotStore {
    fn describe(&self) -> String {
        "mock://snapshots".to_string()
    }

    fn read_text(&self, key: &str) -> Result<String> {
        self.text_reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(anyhow!("simulated read failure for {}", key));
        }
        let objects = self.objects.lock();
        let bytes = objects
            .get(key)
            .ok_or_else(|| anyhow!("no such object: {}", key))?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    fn download(&self, key: &str, dest: &Path) -> Result<u64> {
        self.downloads.fetch_add(1, Ordering::SeqCst);
        if self.fail_downloads.load(Ordering::SeqCst) {
            return Err(anyhow!("simulated transfer failure for {}", key));
        }
        let bytes = self
            .objects
            .lock()
            .get(key)
            .cloned()
            .ok_or_else(|| anyhow!("no such object: {}", key))?;
        std::fs::write(dest, &bytes)?;
        Ok(bytes.len() as u64)
    }
}
