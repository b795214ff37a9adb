pub mod ttl;

pub use ttl::TtlCache;
