use thiserror::Error;

/// Why a sync did not produce a fresh local copy
///
/// None of these are fatal: the caller keeps whatever local copy exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("Remote storage credentials unavailable: {0}")]
    Credentials(String),

    #[error("Remote storage misconfigured: {0}")]
    Configuration(String),

    #[error("Transfer failed: {0}")]
    Transfer(String),

    #[error("Decompression failed: {0}")]
    Decompress(String),

    #[error("Local file error: {0}")]
    Io(String),
}

impl SyncError {
    /// Configuration and credential problems mean the remote was never contacted
    pub fn is_unavailable(&self) -> bool {
        matches!(self, SyncError::Credentials(_) | SyncError::Configuration(_))
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::Io(err.to_string())
    }
}
