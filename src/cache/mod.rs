//! Cache Module
//!
//! Provides in-memory caching of report query results with TTL expiration
//! and FIFO eviction.

mod entry;
mod fifo;
mod key;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use fifo::FifoQueue;
pub use key::{generate_key, KeyArg};
pub use stats::CacheStats;
pub use store::AnalyticsCache;

// == Public Constants ==
/// Delimiter between the method name and each normalized argument in a key
pub const KEY_DELIMITER: char = ':';

/// Token a missing or null argument normalizes to
pub const NULL_TOKEN: &str = "null";
