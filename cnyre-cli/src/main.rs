use clap::Parser;
use colored::*;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;

use crate::cli::{Cli, Commands};
use cnyre_core::CnyreError;

fn main() {
    let cli = Cli::parse();

    // CNYRE_LOG wins; otherwise -v/-vv raise the default level
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CNYRE_LOG").unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);

        let exit_code = match e.downcast_ref::<CnyreError>() {
            Some(CnyreError::Configuration(_)) => 2,
            Some(CnyreError::Io(_)) => 3,
            Some(CnyreError::Database(_)) => 5,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.load_config()?;

    match cli.command {
        Commands::Sync(args) => crate::cli::commands::sync::run(args, &config),
        Commands::Browse(args) => crate::cli::commands::browse::run(args, &config),
        Commands::Stats(args) => crate::cli::commands::stats::run(args, &config),
        Commands::Facets(args) => crate::cli::commands::facets::run(args, &config),
        Commands::Info(args) => crate::cli::commands::info::run(args, &config, cli.config.as_deref()),
    }
}
