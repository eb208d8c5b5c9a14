//! Error types for the analytics cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the analytics cache.
///
/// Absent keys, empty caches and pattern misses are not errors; the only
/// failure the cache itself can produce is a payload that will not survive
/// the serialize/deserialize copy step. Such failures surface to the caller
/// instead of leaving a corrupted entry behind.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Payload could not be serialized into, or deserialized out of, its
    /// stored JSON form
    #[error("failed to convert payload for key '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The remote data source failed to answer a query
    #[error("data source query failed: {0}")]
    Source(String),
}

// == Result Type Alias ==
/// Convenience Result type for the analytics cache.
pub type Result<T> = std::result::Result<T, CacheError>;
