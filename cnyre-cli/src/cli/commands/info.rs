use crate::cli::formatting::output;
use anyhow::Result;
use chrono::{DateTime, Local};
use clap::Args;
use cnyre_core::Config;
use cnyre_storage::SyncManager;
use humansize::{format_size, DECIMAL};
use std::path::Path;

#[derive(Args)]
pub struct InfoArgs {
    /// Also print the resolved CNYRE_HOME paths
    #[arg(long)]
    pub paths: bool,
}

pub fn run(args: InfoArgs, config: &Config, config_path: Option<&Path>) -> Result<()> {
    let manager = SyncManager::from_config(config);

    output::section_header("Local data");
    let database = manager.database_path();
    output::field("Database", database.display());
    match std::fs::metadata(database) {
        Ok(meta) => {
            output::field("Size", format_size(meta.len(), DECIMAL));
            if let Ok(modified) = meta.modified() {
                let modified: DateTime<Local> = modified.into();
                output::field("Updated", modified.format("%Y-%m-%d %H:%M:%S"));
            }
        }
        Err(_) => output::field("Size", "not downloaded"),
    }
    output::field(
        "Version",
        manager.local_version().unwrap_or_else(|| "none".to_string()),
    );

    output::section_header("Remote");
    output::field("Location", config.remote.describe());
    output::field("Data object", &config.remote.objects().data_key);
    output::field("Version object", &config.remote.objects().version_key);
    if manager.store_description().is_none() {
        output::warning("Remote storage is not usable with the current configuration");
    }

    output::section_header("Settings");
    output::field(
        "Config",
        config_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| cnyre_core::default_config_path().display().to_string()),
    );
    output::field("Cache TTL", format!("{}s", config.cache.ttl_secs));
    output::field("Page size", config.browse.page_size);

    if args.paths {
        println!("\n{}", cnyre_core::describe_paths());
    }
    Ok(())
}
