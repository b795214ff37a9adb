use thiserror::Error;

/// Problems with query parameters as the user supplied them
///
/// The engine itself never fails; these only arise while parsing input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Unknown sort direction '{0}' (expected ascending or descending)")]
    InvalidDirection(String),

    #[error("Page size {size} is not one of {options:?}")]
    InvalidPageSize { size: usize, options: Vec<usize> },

    #[error("Invalid filter value: {0}")]
    InvalidValue(String),
}
