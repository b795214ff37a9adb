use std::path::PathBuf;
use std::sync::OnceLock;

// Cache the paths to avoid repeated environment lookups
static CNYRE_HOME: OnceLock<PathBuf> = OnceLock::new();
static CNYRE_DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Get the CNYRE home directory
/// Checks CNYRE_HOME environment variable, falls back to ${HOME}/.cnyre
pub fn cnyre_home() -> PathBuf {
    CNYRE_HOME
        .get_or_init(|| {
            if let Ok(path) = std::env::var("CNYRE_HOME") {
                PathBuf::from(path)
            } else {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".cnyre")
            }
        })
        .clone()
}

/// Get the directory holding the materialized snapshot
/// Checks CNYRE_DATA_DIR environment variable, falls back to CNYRE_HOME/data
pub fn cnyre_data_dir() -> PathBuf {
    CNYRE_DATA_DIR
        .get_or_init(|| {
            if let Ok(path) = std::env::var("CNYRE_DATA_DIR") {
                PathBuf::from(path)
            } else {
                cnyre_home().join("data")
            }
        })
        .clone()
}

/// Default location of the configuration file: CNYRE_HOME/config.toml
pub fn default_config_path() -> PathBuf {
    cnyre_home().join("config.toml")
}

/// Check if using custom data directory
pub fn is_custom_data_dir() -> bool {
    std::env::var("CNYRE_DATA_DIR").is_ok() || std::env::var("CNYRE_HOME").is_ok()
}

/// Get a human-readable description of the current path configuration
pub fn describe_paths() -> String {
    format!(
        "CNYRE Paths:\n  \
        Home: {}\n  \
        Data: {}\n  \
        Config: {}\n  \
        Custom: {}",
        cnyre_home().display(),
        cnyre_data_dir().display(),
        default_config_path().display(),
        if is_custom_data_dir() {
            "Yes"
        } else {
            "No (using defaults)"
        }
    )
}
