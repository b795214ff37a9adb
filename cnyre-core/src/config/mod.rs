//! Configuration types for CNYRE

use crate::system::paths;
use crate::CnyreError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub local: LocalConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub browse: BrowseConfig,
}

/// Where the published snapshot lives
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum RemoteConfig {
    S3 {
        #[serde(default = "default_bucket")]
        bucket: String,
        #[serde(default = "default_region")]
        region: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prefix: Option<String>,
        /// For S3-compatible services
        #[serde(default, skip_serializing_if = "Option::is_none")]
        endpoint: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        access_key_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        secret_access_key: Option<String>,
        #[serde(flatten)]
        objects: SnapshotObjects,
    },
    /// A directory laid out like the bucket
    Local {
        root: PathBuf,
        #[serde(flatten)]
        objects: SnapshotObjects,
    },
}

/// Object keys of the snapshot and how the data object is encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotObjects {
    #[serde(default = "default_data_key")]
    pub data_key: String,
    #[serde(default = "default_version_key")]
    pub version_key: String,
    #[serde(default)]
    pub compression: Compression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    #[default]
    Gzip,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalConfig {
    /// Directory for the materialized database and version marker
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_database_name")]
    pub database_name: String,
    #[serde(default = "default_version_file_name")]
    pub version_file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,
    #[serde(default = "default_counties")]
    pub default_counties: Vec<String>,
}

// Default value functions
fn default_bucket() -> String { "cny-realestate-data".to_string() }
fn default_region() -> String { "us-east-1".to_string() }
fn default_data_key() -> String { "cny-real-estate.db.gz".to_string() }
fn default_version_key() -> String { "version.txt".to_string() }
fn default_database_name() -> String { "cny-real-estate.db".to_string() }
fn default_version_file_name() -> String { "version.txt".to_string() }
fn default_ttl_secs() -> u64 { 3600 }
fn default_page_size() -> usize { 10 }
fn default_page_size_options() -> Vec<usize> { vec![10, 25, 50, 100] }
fn default_counties() -> Vec<String> {
    ["Cayuga", "Cortland", "Madison", "Onondaga", "Oswego"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig::S3 {
            bucket: default_bucket(),
            region: default_region(),
            prefix: None,
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            objects: SnapshotObjects::default(),
        }
    }
}

impl Default for SnapshotObjects {
    fn default() -> Self {
        Self {
            data_key: default_data_key(),
            version_key: default_version_key(),
            compression: Compression::default(),
        }
    }
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            database_name: default_database_name(),
            version_file_name: default_version_file_name(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_size_options: default_page_size_options(),
            default_counties: default_counties(),
        }
    }
}

impl RemoteConfig {
    pub fn objects(&self) -> &SnapshotObjects {
        match self {
            RemoteConfig::S3 { objects, .. } | RemoteConfig::Local { objects, .. } => objects,
        }
    }

    /// Short human-readable location, e.g. `s3://bucket/prefix`
    pub fn describe(&self) -> String {
        match self {
            RemoteConfig::S3 { bucket, prefix, .. } => match prefix.as_deref() {
                Some(p) if !p.is_empty() => format!("s3://{}/{}", bucket, p.trim_matches('/')),
                _ => format!("s3://{}", bucket),
            },
            RemoteConfig::Local { root, .. } => format!("file://{}", root.display()),
        }
    }
}

impl LocalConfig {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(paths::cnyre_data_dir)
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir().join(&self.database_name)
    }

    pub fn version_path(&self) -> PathBuf {
        self.data_dir().join(&self.version_file_name)
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), CnyreError> {
        if self.browse.page_size_options.contains(&0) || self.browse.page_size == 0 {
            return Err(CnyreError::Configuration(
                "browse page sizes must be positive".to_string(),
            ));
        }
        if !self.browse.page_size_options.contains(&self.browse.page_size) {
            return Err(CnyreError::Configuration(format!(
                "browse.page_size {} is not one of {:?}",
                self.browse.page_size, self.browse.page_size_options
            )));
        }
        let objects = self.remote.objects();
        if objects.data_key.trim().is_empty() || objects.version_key.trim().is_empty() {
            return Err(CnyreError::Configuration(
                "remote object keys must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, CnyreError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}

/// Load the config at `path`, or at the default location when `path` is None.
/// A missing default file yields the built-in defaults.
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config, CnyreError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let default_path = paths::default_config_path();
            if default_path.exists() {
                load_config(default_path)
            } else {
                tracing::debug!("No config at {}, using defaults", default_path.display());
                Ok(Config::default())
            }
        }
    }
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), CnyreError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| CnyreError::Configuration(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}
