//! Data ingestion
//!
//! CSV loading into typed match records, the immutable in-memory table and
//! the compute-once cache that owns it.

pub mod cache;
pub mod loader;
pub mod table;

pub use cache::TableCache;
pub use loader::{LoadError, REQUIRED_COLUMNS};
pub use table::MatchTable;
