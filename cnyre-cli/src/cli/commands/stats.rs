use super::filters::FilterArgs;
use super::load_dataset;
use crate::cli::formatting::{format_count, format_money, output, StatsTable};
use anyhow::Result;
use clap::Args;
use cnyre_core::{Column, Config};
use cnyre_query::ValueSummary;

#[derive(Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: StatsArgs, config: &Config) -> Result<()> {
    // Page size plays no part in the summary
    let query = args.filters.to_query(config, config.browse.page_size)?;
    let dataset = load_dataset(config);

    let filtered = query.filter(dataset.table.clone());
    let summary = ValueSummary::of(&filtered, Column::FullMarketValue);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let Some(summary) = summary else {
        output::empty("No data available to summarize");
        return Ok(());
    };

    let mut table = StatsTable::new("Full Market Value");
    table.add_section("Quartiles");
    for (label, from, to) in summary.quartile_ranges() {
        table.add_metric(label, format!("{} to {}", format_money(from), format_money(to)));
    }
    table.add_section("Summary");
    table.add_metric("Properties", format_count(summary.count));
    table.add_metric("Mean (Average)", format_money(summary.mean));
    table.add_metric("Median (Middle Value)", format_money(summary.median));
    table.add_metric(
        "Standard Deviation",
        summary
            .std_dev
            .map_or_else(|| "n/a".to_string(), format_money),
    );
    println!("{}", table.render());
    Ok(())
}
