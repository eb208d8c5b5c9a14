//! Analytics Cache - in-memory memoization for fisheries sampling reports
//!
//! Caches expensive report and dashboard query results with TTL expiration
//! and FIFO eviction. Payloads are stored as independent JSON copies, so
//! callers can freely mutate what they pass in or get back.

pub mod cache;
pub mod config;
pub mod error;
pub mod service;
pub mod tasks;

pub use cache::{generate_key, AnalyticsCache, CacheStats, KeyArg};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use service::{CachedDataService, DataSource, SharedCache};
pub use tasks::{spawn_sweep_task, SweepHandle};
