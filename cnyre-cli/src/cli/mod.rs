pub mod commands;
pub mod formatting;
pub mod progress;

use clap::{Parser, Subcommand};
use cnyre_core::Config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cnyre",
    version,
    about = "Browse Central New York real estate assessment data",
    long_about = "cnyre keeps a local copy of the published CNY property assessment snapshot \
                  in step with remote storage and lets you filter, sort, search and page \
                  through it from the terminal."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to $CNYRE_HOME/config.toml)
    #[arg(long, global = true, value_name = "FILE", env = "CNYRE_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn load_config(&self) -> anyhow::Result<Config> {
        Ok(cnyre_core::load_config_or_default(self.config.as_deref())?)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the latest snapshot if the local copy is stale
    Sync(commands::sync::SyncArgs),

    /// Filter, sort and page through properties
    Browse(commands::browse::BrowseArgs),

    /// Market value summary for the filtered properties
    Stats(commands::stats::StatsArgs),

    /// List the values available for each filter
    Facets(commands::facets::FacetsArgs),

    /// Show local paths, data version and remote location
    Info(commands::info::InfoArgs),
}
