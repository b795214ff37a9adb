//! Test utilities for the CNYRE workspace
//!
//! Common test helpers, fixtures, and mocks shared by the workspace crates.
//!
//! # Features
//!
//! - **Test Environment**: temp directories holding a snapshot mirror and a data dir
//! - **Fixtures**: property rows, snapshot databases and gzip helpers
//! - **Mock Implementations**: a counting snapshot store and a manual clock

pub mod environment;
pub mod fixtures;
pub mod mock;

// Re-export commonly used items
pub use environment::TestEnvironment;
pub use fixtures::{build_table, sample_properties, write_fixture_database, FixtureProperty};
pub use mock::{ManualClock, MockSnapshotStore};

pub use anyhow::{Context, Result};
pub use tempfile;
