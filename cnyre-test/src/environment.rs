//! Test environment management
//!
//! Provides isolated directories for a local snapshot mirror and the
//! materialized data copy, with automatic cleanup via RAII.

use crate::fixtures::{gzip_file, write_fixture_database, FixtureProperty};
use anyhow::{Context, Result};
use cnyre_core::config::{Compression, Config, LocalConfig, RemoteConfig, SnapshotObjects};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with automatic cleanup
pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::with_prefix("cnyre-test")
            .context("Failed to create temporary directory")?;
        fs::create_dir_all(temp_dir.path().join("mirror"))?;
        Ok(Self { temp_dir })
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Where the materialized copy goes; not created up front
    pub fn data_dir(&self) -> PathBuf {
        self.root().join("data")
    }

    /// Directory standing in for the remote bucket
    pub fn mirror_dir(&self) -> PathBuf {
        self.root().join("mirror")
    }

    pub fn objects(compression: Compression) -> SnapshotObjects {
        SnapshotObjects {
            data_key: match compression {
                Compression::Gzip => "cny-real-estate.db.gz".to_string(),
                Compression::None => "cny-real-estate.db".to_string(),
            },
            compression,
            ..SnapshotObjects::default()
        }
    }

    /// Config pointing at the local mirror and this environment's data dir
    pub fn config(&self, compression: Compression) -> Config {
        Config {
            remote: RemoteConfig::Local {
                root: self.mirror_dir(),
                objects: Self::objects(compression),
            },
            local: LocalConfig {
                data_dir: Some(self.data_dir()),
                ..LocalConfig::default()
            },
            ..Config::default()
        }
    }

    pub fn write_config(&self, config: &Config) -> Result<PathBuf> {
        let path = self.root().join("config.toml");
        cnyre_core::save_config(&path, config)?;
        Ok(path)
    }

    /// Publish a snapshot and version marker into the mirror
    pub fn publish_snapshot(
        &self,
        properties: &[FixtureProperty],
        version: &str,
        compression: Compression,
    ) -> Result<()> {
        let objects = Self::objects(compression);
        let staging = self.root().join("staging.db");
        if staging.exists() {
            fs::remove_file(&staging)?;
        }
        write_fixture_database(&staging, properties)?;

        let target = self.mirror_dir().join(&objects.data_key);
        match compression {
            Compression::Gzip => gzip_file(&staging, &target)?,
            Compression::None => {
                fs::copy(&staging, &target)?;
            }
        }
        fs::remove_file(&staging)?;
        fs::write(self.mirror_dir().join(&objects.version_key), format!("{}\n", version))?;
        Ok(())
    }
}
