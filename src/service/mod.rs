//! Data Service Module
//!
//! The consumer seam between page-level report/dashboard code and the
//! remote data store: a [`DataSource`] performs the actual remote query,
//! and [`CachedDataService`] memoizes its results in a shared
//! [`AnalyticsCache`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{generate_key, AnalyticsCache, CacheStats, KeyArg, KEY_DELIMITER};
use crate::error::Result;

// == Shared Cache ==
/// A cache instance shared between data services and the sweep task.
///
/// One shared instance is typically constructed at application start and
/// injected into every data service.
pub type SharedCache = Arc<RwLock<AnalyticsCache>>;

// == Data Source ==
/// Performs the actual remote query for a method and its arguments.
///
/// Implementations own the query business logic and any retry policy; the
/// cache layer does neither.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetches the result of `method` applied to `args` from the remote
    /// data store.
    async fn fetch(&self, method: &str, args: &[KeyArg]) -> Result<Value>;
}

// == Cached Data Service ==
/// Memoizing front for a [`DataSource`].
///
/// Each query derives its cache key from the method name and normalized
/// arguments, so the same logical request hits the same entry regardless of
/// call site.
pub struct CachedDataService<S> {
    /// Shared cache instance
    cache: SharedCache,
    /// The underlying remote query interface
    source: S,
}

impl<S: DataSource> CachedDataService<S> {
    // == Constructor ==
    /// Creates a new service over a shared cache and a data source.
    pub fn new(cache: SharedCache, source: S) -> Self {
        Self { cache, source }
    }

    // == Query ==
    /// Returns the cached result for a query, fetching on a miss.
    ///
    /// Concurrent misses for the same key are not coalesced: two
    /// simultaneous callers can both reach the data source before either
    /// stores a result. Callers needing single-flight behavior must
    /// de-duplicate their own in-flight requests.
    pub async fn query(&self, method: &str, args: &[KeyArg]) -> Result<Value> {
        self.query_with_ttl(method, args, None).await
    }

    /// Like [`CachedDataService::query`], with a per-entry TTL override in
    /// milliseconds.
    pub async fn query_with_ttl(
        &self,
        method: &str,
        args: &[KeyArg],
        ttl_ms: Option<u64>,
    ) -> Result<Value> {
        let key = generate_key(method, args);

        // Lock only for the lookup; the remote fetch runs unlocked
        {
            let mut cache = self.cache.write().await;
            if let Some(cached) = cache.get(&key) {
                debug!(%key, "cache hit");
                return Ok(cached);
            }
        }

        debug!(%key, "cache miss, querying data source");
        let payload = self.source.fetch(method, args).await?;

        let mut cache = self.cache.write().await;
        cache.set(key, &payload, ttl_ms)?;

        Ok(payload)
    }

    // == Invalidate ==
    /// Drops every cached result of one query method, regardless of
    /// arguments. Call after a data mutation that affects the method's
    /// results. Returns the number of entries removed.
    pub async fn invalidate(&self, method: &str) -> usize {
        let prefix = format!("{}{}", method, KEY_DELIMITER);
        let removed = self.cache.write().await.clear_pattern(&prefix);
        info!(method, removed, "invalidated cached query results");
        removed
    }

    // == Stats ==
    /// Returns a snapshot of the shared cache.
    pub async fn stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }
}
