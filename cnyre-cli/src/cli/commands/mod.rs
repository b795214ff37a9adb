pub mod browse;
pub mod facets;
pub mod filters;
pub mod info;
pub mod stats;
pub mod sync;

use crate::cli::formatting::output;
use crate::cli::progress::create_spinner;
use cnyre_core::Config;
use cnyre_storage::{DatasetProvider, LoadedDataset};
use std::sync::Arc;

/// Sync if stale, load, and surface anything unusual as warnings
pub fn load_dataset(config: &Config) -> Arc<LoadedDataset> {
    let provider = DatasetProvider::from_config(config);

    let spinner = create_spinner("Checking for data updates...");
    let dataset = provider.dataset();
    spinner.finish_and_clear();
    tracing::debug!(
        "Dataset holds {} rows (loaded {})",
        dataset.table.len(),
        dataset.loaded_at.to_rfc3339()
    );

    for message in dataset.status_messages() {
        output::warning(&message);
    }
    dataset
}
