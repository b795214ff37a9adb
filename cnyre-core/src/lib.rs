//! Core utilities and types shared across all CNYRE crates

pub mod config;
pub mod error;
pub mod system;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::{
    load_config, load_config_or_default, save_config, BrowseConfig, CacheConfig, Compression,
    Config, LocalConfig, RemoteConfig, SnapshotObjects,
};
pub use error::{CnyreError, CnyreResult};
pub use traits::{Clock, SnapshotStore, SystemClock};
pub use types::{Category, CategoryPool, Cell, Column, ColumnKind, PropertyRecord, PropertyTable, Value};

// Re-export system utilities
pub use system::{cnyre_data_dir, cnyre_home, default_config_path, describe_paths};

/// Version information for the CNYRE project
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
