//! Core error types for CNYRE

use thiserror::Error;

/// Main error type for CNYRE operations
#[derive(Error, Debug)]
pub enum CnyreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Result type alias for CNYRE operations
pub type CnyreResult<T> = Result<T, CnyreError>;

impl From<toml::de::Error> for CnyreError {
    fn from(err: toml::de::Error) -> Self {
        CnyreError::Configuration(format!("Failed to parse config: {}", err))
    }
}

impl From<anyhow::Error> for CnyreError {
    fn from(err: anyhow::Error) -> Self {
        CnyreError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let io_error = CnyreError::Io(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        assert!(format!("{}", io_error).contains("IO error"));

        let config_error = CnyreError::Configuration("missing field".to_string());
        assert_eq!(format!("{}", config_error), "Configuration error: missing field");

        let network_error = CnyreError::Network("bucket unreachable".to_string());
        assert_eq!(format!("{}", network_error), "Network error: bucket unreachable");

        let database_error = CnyreError::Database("no such table".to_string());
        assert_eq!(format!("{}", database_error), "Database error: no such table");

        let input_error = CnyreError::InvalidInput("page size 7".to_string());
        assert_eq!(format!("{}", input_error), "Invalid input: page size 7");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: CnyreError = io_err.into();

        match err {
            CnyreError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::PermissionDenied),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_toml_error_becomes_configuration() {
        let parsed: Result<toml::Value, toml::de::Error> = toml::from_str("[remote\nbucket=");
        let err: CnyreError = parsed.unwrap_err().into();

        assert!(matches!(err, CnyreError::Configuration(msg) if msg.starts_with("Failed to parse config")));
    }

    #[test]
    fn test_anyhow_error_conversion() {
        let err: CnyreError = anyhow::anyhow!("custom error message").into();
        match err {
            CnyreError::Other(msg) => assert_eq!(msg, "custom error message"),
            _ => panic!("Expected Other error variant"),
        }
    }
}
