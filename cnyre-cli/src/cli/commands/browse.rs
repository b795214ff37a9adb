use super::filters::FilterArgs;
use super::load_dataset;
use crate::cli::formatting::{format_count, output, property_table};
use anyhow::Result;
use clap::Args;
use cnyre_core::{CnyreError, Column, Config, PropertyRecord};
use cnyre_query::{validate_page_size, BrowseSession};

/// Columns shown unless `--all-columns` is given
const DEFAULT_COLUMNS: [Column; 8] = [
    Column::Id,
    Column::CountyName,
    Column::MunicipalityName,
    Column::AddressStreet,
    Column::SchoolDistrictName,
    Column::PropertyCategory,
    Column::FullMarketValue,
    Column::AssessmentTotal,
];

#[derive(Args)]
pub struct BrowseArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Page to show, starting at 1; out-of-range pages are clamped
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Rows per page (must be one of the configured options)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Show every column of the joined table
    #[arg(long)]
    pub all_columns: bool,

    /// Print the page as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: BrowseArgs, config: &Config) -> Result<()> {
    let page_size = validate_page_size(
        args.page_size.unwrap_or(config.browse.page_size),
        &config.browse.page_size_options,
    )
    .map_err(|e| CnyreError::InvalidInput(e.to_string()))?;
    let query = args.filters.to_query(config, page_size)?;

    let dataset = load_dataset(config);
    if query.counties.is_empty() {
        output::warning("Select at least one county");
    }

    let mut session = BrowseSession::new();
    session.set_page(args.page.saturating_sub(1));
    let result = query.run(dataset.table.clone(), &mut session);
    tracing::debug!(
        "Showing page {} of {} for {:?}",
        result.page_index + 1,
        result.total_pages,
        query
    );

    if args.json {
        let rows: Vec<&PropertyRecord> = result.page.iter().collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if result.page.is_empty() {
        output::empty("No properties match the current filters");
    } else {
        let columns: &[Column] = if args.all_columns {
            &Column::ALL
        } else {
            &DEFAULT_COLUMNS
        };
        println!("{}", property_table(&result.page, columns));
    }
    println!(
        "Page {} of {} ({} rows)",
        result.page_index + 1,
        result.total_pages,
        format_count(result.total_rows())
    );
    Ok(())
}
