pub mod paths;

// Re-export commonly used functions
pub use paths::{cnyre_data_dir, cnyre_home, default_config_path, describe_paths, is_custom_data_dir};
