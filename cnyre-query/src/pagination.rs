//! Page arithmetic shared by views and sessions
//!
//! Pages are zero-based. A page size of zero yields a single empty page.

use std::ops::Range;

/// `max(1, ceil(rows / size))`
pub fn total_pages(rows: usize, size: usize) -> usize {
    if size == 0 {
        return 1;
    }
    rows.div_ceil(size).max(1)
}

/// Row range `[page*size, page*size + size)` clipped to `rows`
///
/// Out-of-range pages give an empty range at the end.
pub fn page_bounds(rows: usize, page: usize, size: usize) -> Range<usize> {
    let start = page.saturating_mul(size).min(rows);
    let end = start.saturating_add(size).min(rows);
    start..end
}

/// Clamp a zero-based page into `[0, total_pages)`
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.min(total_pages.saturating_sub(1))
}
