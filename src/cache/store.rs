//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with insertion-order tracking
//! and TTL expiration. Payloads cross the boundary as independent copies:
//! `set` serializes the caller's value and `get` hands back a clone, so no
//! caller ever holds a reference into the cache.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::stats::AccessCounters;
use crate::cache::{CacheEntry, CacheStats, FifoQueue};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == Analytics Cache ==
/// Main cache storage with FIFO eviction and TTL support.
///
/// Eviction is strictly first-in-first-out: when a new key arrives at
/// capacity, the oldest-inserted entry is displaced regardless of how often
/// it has been read. Overwriting an existing key refreshes its payload,
/// timestamp and TTL but keeps its original insertion slot.
#[derive(Debug)]
pub struct AnalyticsCache {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Insertion-order tracker for eviction
    order: FifoQueue,
    /// Running hit/miss/eviction counters
    counters: AccessCounters,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Default TTL in milliseconds for entries without an explicit TTL
    default_ttl_ms: u64,
}

impl AnalyticsCache {
    // == Constructor ==
    /// Creates a new AnalyticsCache with the given capacity and default TTL.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the cache can hold
    /// * `default_ttl_ms` - Default TTL in milliseconds for entries without
    ///   an explicit TTL
    pub fn new(max_entries: usize, default_ttl_ms: u64) -> Self {
        Self {
            entries: HashMap::new(),
            order: FifoQueue::new(),
            counters: AccessCounters::default(),
            max_entries,
            default_ttl_ms,
        }
    }

    /// Creates a new AnalyticsCache from configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.max_entries, config.default_ttl_ms)
    }

    // == Set ==
    /// Stores a payload under a key with optional TTL.
    ///
    /// The payload is serialized into an independent JSON copy, so mutating
    /// the original after this call never alters the stored entry. If the
    /// key already exists the entry is overwritten in place; if the key is
    /// new and the cache is at capacity, the oldest-inserted entry is
    /// evicted first.
    ///
    /// The only failure is a payload that cannot be serialized; nothing is
    /// stored in that case.
    pub fn set<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        payload: &T,
        ttl_ms: Option<u64>,
    ) -> Result<()> {
        let key = key.into();
        let payload = serde_json::to_value(payload).map_err(|source| {
            CacheError::Serialization {
                key: key.clone(),
                source,
            }
        })?;

        let is_overwrite = self.entries.contains_key(&key);

        // New key at capacity displaces the oldest insertion
        if !is_overwrite && self.entries.len() >= self.max_entries {
            if let Some(oldest) = self.order.evict_oldest() {
                self.entries.remove(&oldest);
                self.counters.record_eviction();
            }
        }

        let ttl_ms = ttl_ms.unwrap_or(self.default_ttl_ms);
        self.entries.insert(key.clone(), CacheEntry::new(payload, ttl_ms));
        // No-op on overwrite: the key keeps its original insertion slot
        self.order.push(&key);

        Ok(())
    }

    // == Get ==
    /// Retrieves an independent copy of the payload stored under a key.
    ///
    /// Returns None for an absent key, and for an expired entry (which is
    /// removed on the spot). A cached JSON `null` comes back as
    /// `Some(Value::Null)`, so None is unambiguously a miss. Never fails.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired() {
                self.entries.remove(key);
                self.order.remove(key);
                self.counters.record_miss();
                return None;
            }

            let payload = entry.payload.clone();
            self.counters.record_hit();
            Some(payload)
        } else {
            self.counters.record_miss();
            None
        }
    }

    // == Get As ==
    /// Retrieves a payload deserialized into a concrete type.
    ///
    /// A stored payload that does not match `T` surfaces as a serialization
    /// error rather than being silently dropped.
    pub fn get_as<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>> {
        match self.get(key) {
            Some(value) => {
                let typed = serde_json::from_value(value).map_err(|source| {
                    CacheError::Serialization {
                        key: key.to_string(),
                        source,
                    }
                })?;
                Ok(Some(typed))
            }
            None => Ok(None),
        }
    }

    // == Delete ==
    /// Removes one entry if present.
    ///
    /// Returns whether an entry was removed; deleting an absent key is a
    /// no-op, never an error.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.order.remove(key);
            true
        } else {
            false
        }
    }

    // == Clear ==
    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    // == Clear Pattern ==
    /// Removes every entry whose key starts with the given prefix.
    ///
    /// Exact string prefix match, no glob or regex. Used to invalidate all
    /// cached results of one query method after a data mutation, e.g.
    /// `clear_pattern("getMonthlyReport:")`. Returns the number of entries
    /// removed.
    pub fn clear_pattern(&mut self, prefix: &str) -> usize {
        let matching: Vec<String> = self
            .entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();

        for key in &matching {
            self.entries.remove(key);
            self.order.remove(key);
        }

        matching.len()
    }

    // == Clean Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Idempotent; a second scan with no new inserts removes nothing.
    /// Returns the number of entries removed.
    pub fn clean_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
            self.order.remove(&key);
        }

        count
    }

    // == Stats ==
    /// Returns a snapshot of the cache without mutating it.
    ///
    /// Entries are classified valid/expired by the same rule reads use, so
    /// an expired entry shows up in `expired` until a read or sweep removes
    /// it.
    pub fn stats(&self) -> CacheStats {
        let mut valid = 0;
        let mut expired = 0;
        for entry in self.entries.values() {
            if entry.is_expired() {
                expired += 1;
            } else {
                valid += 1;
            }
        }

        CacheStats {
            total: self.entries.len(),
            valid,
            expired,
            max_size: self.max_entries,
            hits: self.counters.hits,
            misses: self.counters.misses,
            evictions: self.counters.evictions,
        }
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::thread::sleep;
    use std::time::Duration;

    fn test_cache() -> AnalyticsCache {
        AnalyticsCache::new(100, 300_000)
    }

    #[test]
    fn test_store_new() {
        let cache = test_cache();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_store_from_config() {
        let cache = AnalyticsCache::from_config(&CacheConfig::default());
        let stats = cache.stats();
        assert_eq!(stats.max_size, 100);
    }

    #[test]
    fn test_store_set_and_get() {
        let mut cache = test_cache();

        cache
            .set("getMonthlyReport:2025-01-01:3", &json!({"total": 42}), None)
            .unwrap();
        let value = cache.get("getMonthlyReport:2025-01-01:3").unwrap();

        assert_eq!(value, json!({"total": 42}));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut cache = test_cache();
        assert_eq!(cache.get("nonexistent"), None);
    }

    #[test]
    fn test_store_falsy_payloads_are_hits() {
        let mut cache = test_cache();

        cache.set("zero", &0, None).unwrap();
        cache.set("nothing", &json!(null), None).unwrap();
        cache.set("off", &false, None).unwrap();

        assert_eq!(cache.get("zero"), Some(json!(0)));
        assert_eq!(cache.get("nothing"), Some(Value::Null));
        assert_eq!(cache.get("off"), Some(json!(false)));
        assert_eq!(cache.get("missing"), None);
    }

    #[test]
    fn test_store_returned_payload_is_independent() {
        let mut cache = test_cache();
        cache.set("report", &json!({"rows": [1, 2]}), None).unwrap();

        let mut first = cache.get("report").unwrap();
        first["rows"] = json!("mangled");
        first["extra"] = json!(true);

        let second = cache.get("report").unwrap();
        assert_eq!(second, json!({"rows": [1, 2]}));
    }

    #[test]
    fn test_store_caller_value_is_independent() {
        let mut cache = test_cache();

        let mut payload = json!({"region": "north"});
        cache.set("report", &payload, None).unwrap();

        payload["region"] = json!("mangled");

        assert_eq!(cache.get("report").unwrap(), json!({"region": "north"}));
    }

    #[test]
    fn test_store_overwrite() {
        let mut cache = test_cache();

        cache.set("key1", &json!("first"), None).unwrap();
        cache.set("key1", &json!("second"), None).unwrap();

        assert_eq!(cache.get("key1").unwrap(), json!("second"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut cache = test_cache();

        cache.set("key1", &json!("value"), Some(20)).unwrap();
        assert!(cache.get("key1").is_some());

        sleep(Duration::from_millis(40));

        assert_eq!(cache.get("key1"), None);
        assert_eq!(cache.len(), 0, "expired entry is removed on lookup");
    }

    #[test]
    fn test_store_default_ttl_applies() {
        let mut cache = AnalyticsCache::new(100, 20);

        cache.set("key1", &json!("value"), None).unwrap();

        sleep(Duration::from_millis(40));

        assert_eq!(cache.get("key1"), None);
    }

    #[test]
    fn test_store_fifo_eviction() {
        let mut cache = AnalyticsCache::new(2, 300_000);

        cache.set("a", &1, None).unwrap();
        cache.set("b", &2, None).unwrap();
        cache.set("c", &3, None).unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(json!(2)));
        assert_eq!(cache.get("c"), Some(json!(3)));
    }

    #[test]
    fn test_store_eviction_ignores_reads() {
        let mut cache = AnalyticsCache::new(2, 300_000);

        cache.set("a", &1, None).unwrap();
        cache.set("b", &2, None).unwrap();

        // Reading "a" does not protect it: eviction is FIFO, not LRU
        cache.get("a");
        cache.get("a");

        cache.set("c", &3, None).unwrap();

        assert_eq!(cache.get("a"), None);
        assert!(cache.get("b").is_some());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_store_overwrite_keeps_insertion_slot() {
        let mut cache = AnalyticsCache::new(2, 300_000);

        cache.set("a", &1, None).unwrap();
        cache.set("b", &2, None).unwrap();
        // Overwrite does not make "a" the newest entry
        cache.set("a", &10, None).unwrap();

        cache.set("c", &3, None).unwrap();

        assert_eq!(cache.get("a"), None, "overwritten key is still evicted first");
        assert_eq!(cache.get("b"), Some(json!(2)));
        assert_eq!(cache.get("c"), Some(json!(3)));
    }

    #[test]
    fn test_store_delete() {
        let mut cache = test_cache();

        cache.set("key1", &json!("value"), None).unwrap();

        assert!(cache.delete("key1"));
        assert!(cache.is_empty());
        assert_eq!(cache.get("key1"), None);
    }

    #[test]
    fn test_store_delete_nonexistent_is_noop() {
        let mut cache = test_cache();
        assert!(!cache.delete("nonexistent"));
    }

    #[test]
    fn test_store_clear() {
        let mut cache = test_cache();

        cache.set("a", &1, None).unwrap();
        cache.set("b", &2, None).unwrap();

        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
    }

    #[test]
    fn test_store_clear_pattern() {
        let mut cache = test_cache();

        cache.set("getX:a", &1, None).unwrap();
        cache.set("getX:b", &2, None).unwrap();
        cache.set("getY:a", &3, None).unwrap();

        let removed = cache.clear_pattern("getX:");

        assert_eq!(removed, 2);
        assert_eq!(cache.get("getX:a"), None);
        assert_eq!(cache.get("getX:b"), None);
        assert_eq!(cache.get("getY:a"), Some(json!(3)));
    }

    #[test]
    fn test_store_clear_pattern_no_match() {
        let mut cache = test_cache();

        cache.set("getY:a", &3, None).unwrap();

        assert_eq!(cache.clear_pattern("getZ:"), 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_store_clean_expired() {
        let mut cache = test_cache();

        cache.set("short", &1, Some(20)).unwrap();
        cache.set("long", &2, Some(60_000)).unwrap();

        sleep(Duration::from_millis(40));

        assert_eq!(cache.clean_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("long").is_some());
    }

    #[test]
    fn test_store_clean_expired_idempotent() {
        let mut cache = test_cache();

        cache.set("short", &1, Some(20)).unwrap();
        sleep(Duration::from_millis(40));

        assert_eq!(cache.clean_expired(), 1);
        let first = cache.stats();
        assert_eq!(cache.clean_expired(), 0);
        assert_eq!(cache.stats(), first);
    }

    #[test]
    fn test_store_stats_classification() {
        let mut cache = test_cache();

        cache.set("short", &1, Some(20)).unwrap();
        cache.set("long", &2, Some(60_000)).unwrap();

        sleep(Duration::from_millis(40));

        // Expired entry is visible in stats until a read or sweep removes it
        let stats = cache.stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.valid, 1);
        assert_eq!(stats.expired, 1);
        assert_eq!(stats.max_size, 100);

        // Stats is read-only: the expired entry is still there
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().total, 2);

        cache.clean_expired();
        let after = cache.stats();
        assert_eq!(after.total, 1);
        assert_eq!(after.expired, 0);
    }

    #[test]
    fn test_store_counters() {
        let mut cache = AnalyticsCache::new(2, 300_000);

        cache.set("a", &1, None).unwrap();
        cache.set("b", &2, None).unwrap();
        cache.set("c", &3, None).unwrap(); // evicts "a"

        cache.get("b"); // hit
        cache.get("c"); // hit
        cache.get("a"); // miss (evicted)
        cache.get("zzz"); // miss

        let stats = cache.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_store_get_as_typed() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct MonthlyTotals {
            region_id: i64,
            landings_kg: f64,
        }

        let mut cache = test_cache();
        let totals = MonthlyTotals {
            region_id: 3,
            landings_kg: 1250.5,
        };

        cache.set("totals", &totals, None).unwrap();

        let roundtrip: MonthlyTotals = cache.get_as("totals").unwrap().unwrap();
        assert_eq!(roundtrip, totals);

        let missing: Option<MonthlyTotals> = cache.get_as("absent").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_store_get_as_type_mismatch() {
        let mut cache = test_cache();
        cache.set("text", &"not a number", None).unwrap();

        let result: Result<Option<u64>> = cache.get_as("text");
        assert!(matches!(
            result,
            Err(CacheError::Serialization { .. })
        ));
    }

    #[test]
    fn test_store_set_serialization_failure() {
        struct Broken;

        impl Serialize for Broken {
            fn serialize<S: serde::Serializer>(
                &self,
                _serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                use serde::ser::Error;
                Err(S::Error::custom("unsupported payload"))
            }
        }

        let mut cache = test_cache();
        let result = cache.set("broken", &Broken, None);

        assert!(matches!(result, Err(CacheError::Serialization { .. })));
        assert!(cache.is_empty(), "nothing is stored on failure");
    }
}
