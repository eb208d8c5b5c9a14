//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

// == Cache Entry ==
/// Represents a single cached payload with its timing metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload (an independent copy of what the caller passed in)
    pub payload: Value,
    /// Insertion timestamp (Unix milliseconds)
    pub stored_at: u64,
    /// Time-to-live for this entry in milliseconds
    pub ttl_ms: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current time.
    ///
    /// # Arguments
    /// * `payload` - The payload to store
    /// * `ttl_ms` - TTL in milliseconds for this entry
    pub fn new(payload: Value, ttl_ms: u64) -> Self {
        Self {
            payload,
            stored_at: current_timestamp_ms(),
            ttl_ms,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has outlived its TTL.
    ///
    /// Boundary condition: an entry is expired only once strictly more than
    /// `ttl_ms` milliseconds have elapsed since insertion. An entry read at
    /// exactly `stored_at + ttl_ms` is still served.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms().saturating_sub(self.stored_at) > self.ttl_ms
    }

    // == Remaining TTL ==
    /// Returns the remaining lifetime of this entry in milliseconds.
    ///
    /// Clamped at 0 once the entry has expired. Useful for diagnostics.
    pub fn remaining_ttl_ms(&self) -> u64 {
        let deadline = self.stored_at + self.ttl_ms;
        deadline.saturating_sub(current_timestamp_ms())
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
