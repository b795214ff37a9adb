use clap::Args;
use cnyre_core::{CnyreError, Column, Config};
use cnyre_query::{BrowseQuery, SearchSpec, Selection, SortDirection};

/// Filter and sort options shared by `browse` and `stats`
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Counties to include (defaults to every configured county)
    #[arg(long = "county", value_name = "NAME", num_args = 1..)]
    pub counties: Vec<String>,

    /// Only this property category
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Only this school district
    #[arg(long, value_name = "DISTRICT")]
    pub district: Option<String>,

    /// Case-insensitive substring to look for
    #[arg(long, value_name = "TERM", requires = "search_column")]
    pub search: Option<String>,

    /// Column to search in
    #[arg(long, value_name = "COLUMN")]
    pub search_column: Option<Column>,

    /// Column to sort by
    #[arg(long, value_name = "COLUMN", default_value = "full_market_value")]
    pub sort: Column,

    /// Sort direction (ascending or descending)
    #[arg(long, value_name = "DIRECTION", default_value = "ascending")]
    pub direction: SortDirection,
}

fn selection(column: Column, raw: Option<&str>) -> Result<Selection, CnyreError> {
    Selection::parse(column, raw).map_err(|e| CnyreError::InvalidInput(e.to_string()))
}

impl FilterArgs {
    /// Counties requested, or the configured defaults when none were given
    pub fn counties(&self, config: &Config) -> Vec<String> {
        if self.counties.is_empty() {
            config.browse.default_counties.clone()
        } else {
            self.counties.clone()
        }
    }

    pub fn to_query(&self, config: &Config, page_size: usize) -> Result<BrowseQuery, CnyreError> {
        let search = match (&self.search, self.search_column) {
            (Some(term), Some(column)) => Some(SearchSpec {
                column,
                term: term.clone(),
            }),
            _ => None,
        };

        Ok(BrowseQuery {
            counties: self.counties(config),
            category: selection(Column::PropertyCategory, self.category.as_deref())?,
            district: selection(Column::SchoolDistrictName, self.district.as_deref())?,
            search,
            sort_column: self.sort,
            direction: self.direction,
            page_size,
        })
    }
}
