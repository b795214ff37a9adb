//! Mock implementations for testing

pub mod clock;
pub mod store;

pub use clock::ManualClock;
pub use store::MockSnapshotStore;
