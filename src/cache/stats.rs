//! Cache Statistics Module
//!
//! Snapshot of cache contents plus running access counters.

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time view of the cache, produced by a full scan.
///
/// `total` counts every stored entry; `valid` and `expired` classify them by
/// the same expiry rule reads use. The access counters accumulate over the
/// cache's lifetime.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of entries currently stored (valid + expired)
    pub total: usize,
    /// Entries still within their TTL
    pub valid: usize,
    /// Entries past their TTL awaiting lazy removal or a sweep
    pub expired: usize,
    /// Configured entry cap
    pub max_size: usize,
    /// Number of successful reads
    pub hits: u64,
    /// Number of reads that found nothing (absent or expired)
    pub misses: u64,
    /// Number of entries displaced by the capacity cap
    pub evictions: u64,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let reads = self.hits + self.misses;
        if reads == 0 {
            0.0
        } else {
            self.hits as f64 / reads as f64
        }
    }
}

// == Access Counters ==
/// Running read/eviction counters owned by the cache engine.
#[derive(Debug, Clone, Default)]
pub(super) struct AccessCounters {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl AccessCounters {
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}
