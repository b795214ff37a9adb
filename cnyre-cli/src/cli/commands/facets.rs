use super::load_dataset;
use crate::cli::formatting::{facet_table, output};
use anyhow::Result;
use clap::Args;
use cnyre_core::{Column, Config};
use cnyre_query::{BrowseQuery, TableView};

#[derive(Args)]
pub struct FacetsArgs {
    /// Counties whose categories and districts to list (defaults to configured counties)
    #[arg(long = "county", value_name = "NAME", num_args = 1..)]
    pub counties: Vec<String>,
}

pub fn run(args: FacetsArgs, config: &Config) -> Result<()> {
    let dataset = load_dataset(config);
    if dataset.table.is_empty() {
        output::empty("No data available");
        return Ok(());
    }

    let counties = if args.counties.is_empty() {
        config.browse.default_counties.clone()
    } else {
        args.counties
    };
    let query = BrowseQuery {
        counties,
        ..BrowseQuery::default()
    };
    let in_counties = query.county_view(dataset.table.clone());

    let all = TableView::full(dataset.table.clone());
    println!("{}", facet_table("Counties", &all.distinct(Column::CountyName)));
    println!(
        "{}",
        facet_table(
            "Property Categories",
            &in_counties.distinct(Column::PropertyCategory)
        )
    );
    println!(
        "{}",
        facet_table(
            "School Districts",
            &in_counties.distinct(Column::SchoolDistrictName)
        )
    );
    Ok(())
}
