//! Cache Module
//!
//! Provides the in-memory image cache: status code keyed, bounded by an
//! aggregate cost, with LRU eviction.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::ImageEntry;
pub use stats::CacheStats;
pub use store::{ImageStore, InsertOutcome};

// == Public Constants ==
/// Cost charged against the capacity for every cached image, whatever its size
pub const ENTRY_COST: usize = 500;
