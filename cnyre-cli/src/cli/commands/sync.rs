use crate::cli::formatting::{format_count, output};
use crate::cli::progress::create_spinner;
use anyhow::Result;
use clap::Args;
use cnyre_core::{CnyreError, Config};
use cnyre_storage::{DatasetLoader, SyncAction, SyncManager};
use humansize::{format_size, DECIMAL};

#[derive(Args)]
pub struct SyncArgs {
    /// Download even if the local version marker matches the remote one
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: SyncArgs, config: &Config) -> Result<()> {
    let manager = SyncManager::from_config(config);

    let spinner = create_spinner(if args.force {
        "Downloading latest snapshot..."
    } else {
        "Checking for data updates..."
    });
    let report = if args.force {
        manager.force_download()
    } else {
        manager.ensure_fresh_local_copy()
    };
    spinner.finish_and_clear();

    for warning in &report.warnings {
        output::warning(warning);
    }

    match &report.action {
        SyncAction::UpToDate { .. } => output::success(&report.status_message()),
        SyncAction::Downloaded(summary) => {
            output::success(&report.status_message());
            if let Some(version) = &summary.version {
                output::field("Version", version);
            }
            output::field("Size", format_size(summary.materialized_bytes, DECIMAL));
            output::field("Took", format!("{:.2?}", summary.duration));
        }
        SyncAction::Unavailable(e) => {
            output::warning(&report.status_message());
            return Err(CnyreError::Configuration(e.to_string()).into());
        }
        SyncAction::Failed(e) => {
            output::warning(&report.status_message());
            return Err(CnyreError::Network(e.to_string()).into());
        }
    }

    // Prove the copy on disk is usable
    let table = DatasetLoader::new(manager.database_path())
        .load()
        .map_err(|e| CnyreError::Database(e.to_string()))?;
    output::info(&format!(
        "{} property records available at {}",
        format_count(table.len()),
        manager.database_path().display()
    ));
    Ok(())
}
