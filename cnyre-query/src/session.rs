//! Navigation and search state owned by the caller across re-renders

use crate::pagination::clamp_page;
use crate::view::TableView;
use cnyre_core::Column;

/// A search in effect and the view it was applied to
#[derive(Debug, Clone)]
pub struct ActiveSearch {
    pub column: Column,
    pub term: String,
    snapshot: TableView,
}

impl ActiveSearch {
    /// The view as it was immediately before the search
    pub fn snapshot(&self) -> &TableView {
        &self.snapshot
    }
}

#[derive(Debug, Clone, Default)]
pub struct BrowseSession {
    page: usize,
    search: Option<ActiveSearch>,
}

impl BrowseSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current zero-based page
    pub fn page(&self) -> usize {
        self.page
    }

    /// Jump to a page; it is clamped on the next `clamp_page`
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn search(&self) -> Option<&ActiveSearch> {
        self.search.as_ref()
    }

    /// Search `view` and remember the term, the column and `view` itself
    pub fn apply_search(&mut self, view: &TableView, column: Column, term: &str) -> TableView {
        tracing::debug!("Searching {} for '{}'", column, term);
        let result = view.search(column, term);
        self.search = Some(ActiveSearch {
            column,
            term: term.to_string(),
            snapshot: view.clone(),
        });
        result
    }

    /// Re-apply the active search, if any, to a freshly filtered view
    pub fn refine(&mut self, view: TableView) -> TableView {
        match &mut self.search {
            Some(active) => {
                let result = view.search(active.column, &active.term);
                active.snapshot = view;
                result
            }
            None => view,
        }
    }

    /// Drop all search state and give back the pre-search view
    pub fn clear_search(&mut self) -> Option<TableView> {
        self.search.take().map(|active| active.snapshot)
    }

    /// Pull the current page back into range after the row count changed
    pub fn clamp_page(&mut self, total_pages: usize) -> usize {
        self.page = clamp_page(self.page, total_pages);
        self.page
    }

    /// Advance one page, first pulling an out-of-range page back to the last one
    pub fn next_page(&mut self, total_pages: usize) -> usize {
        self.page = clamp_page(self.page, total_pages);
        if self.page.saturating_add(1) < total_pages {
            self.page += 1;
        }
        self.page
    }

    pub fn previous_page(&mut self) -> usize {
        self.page = self.page.saturating_sub(1);
        self.page
    }

    /// Back to page zero with no search
    pub fn reset(&mut self) {
        self.page = 0;
        self.search = None;
    }
}
