//! The browse pipeline: county, category, district, search, sort, page

use crate::pagination::total_pages;
use crate::session::BrowseSession;
use crate::types::{Selection, SortDirection};
use crate::view::TableView;
use cnyre_core::{Column, PropertyTable, Value};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct SearchSpec {
    pub column: Column,
    pub term: String,
}

/// Everything a front end lets the user choose
#[derive(Debug, Clone)]
pub struct BrowseQuery {
    pub counties: Vec<String>,
    pub category: Selection,
    pub district: Selection,
    /// A new search to apply; None keeps whatever search the session holds
    pub search: Option<SearchSpec>,
    pub sort_column: Column,
    pub direction: SortDirection,
    pub page_size: usize,
}

impl Default for BrowseQuery {
    fn default() -> Self {
        Self {
            counties: Vec::new(),
            category: Selection::All,
            district: Selection::All,
            search: None,
            sort_column: Column::FullMarketValue,
            direction: SortDirection::Ascending,
            page_size: 10,
        }
    }
}

/// Filtered rows before and after pagination
#[derive(Debug, Clone)]
pub struct BrowseResult {
    /// Filtered and sorted, before pagination
    pub filtered: TableView,
    pub page: TableView,
    /// Zero-based, already clamped
    pub page_index: usize,
    pub total_pages: usize,
}

impl BrowseResult {
    pub fn total_rows(&self) -> usize {
        self.filtered.len()
    }
}

impl BrowseQuery {
    /// Rows left after the county filter alone; selection options come from here
    pub fn county_view(&self, table: Arc<PropertyTable>) -> TableView {
        let counties: Vec<Value> = self.counties.iter().map(|c| Value::from(c.as_str())).collect();
        TableView::full(table).filter_in(Column::CountyName, &counties)
    }

    /// Filters and sort, without pagination or session involvement
    pub fn filter(&self, table: Arc<PropertyTable>) -> TableView {
        let mut view = self.selections(self.county_view(table));
        if let Some(search) = &self.search {
            view = view.search(search.column, &search.term);
        }
        view.sort(self.sort_column, self.direction)
    }

    fn selections(&self, view: TableView) -> TableView {
        view.filter_eq(Column::PropertyCategory, &self.category)
            .filter_eq(Column::SchoolDistrictName, &self.district)
    }

    /// Run the whole pipeline, updating the session's search and page
    pub fn run(&self, table: Arc<PropertyTable>, session: &mut BrowseSession) -> BrowseResult {
        let selected = self.selections(self.county_view(table));
        let searched = match &self.search {
            Some(search) => session.apply_search(&selected, search.column, &search.term),
            None => session.refine(selected),
        };
        let filtered = searched.sort(self.sort_column, self.direction);

        let total_pages = total_pages(filtered.len(), self.page_size);
        let page_index = session.clamp_page(total_pages);
        let page = filtered.page(page_index, self.page_size);

        tracing::debug!(
            "Browse: {} rows, page {} of {}",
            filtered.len(),
            page_index + 1,
            total_pages
        );

        BrowseResult {
            filtered,
            page,
            page_index,
            total_pages,
        }
    }
}
