//! Query engine for the CNY real estate browser
//!
//! Pure and I/O free: filters, search, sort and pagination over views of an
//! immutable `PropertyTable`, plus the session state a front end carries
//! between renders.

pub mod error;
pub mod pagination;
pub mod plan;
pub mod session;
pub mod stats;
pub mod types;
pub mod view;

pub use error::QueryError;
pub use pagination::{page_bounds, total_pages};
pub use plan::{BrowseQuery, BrowseResult, SearchSpec};
pub use session::{ActiveSearch, BrowseSession};
pub use stats::ValueSummary;
pub use types::{Selection, SortDirection};
pub use view::TableView;

/// Check a page size against the allowed options
pub fn validate_page_size(size: usize, options: &[usize]) -> Result<usize, QueryError> {
    if options.contains(&size) {
        Ok(size)
    } else {
        Err(QueryError::InvalidPageSize {
            size,
            options: options.to_vec(),
        })
    }
}
