pub mod clock;
pub mod snapshot_store;

pub use clock::{Clock, SystemClock};
pub use snapshot_store::SnapshotStore;
