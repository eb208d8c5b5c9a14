//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries.
//!
//! The sweep is a convenience only: reads check expiry themselves, so cache
//! correctness never depends on the sweep having run. Its job is to keep
//! entries that are never read again from sitting in memory until evicted.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::AnalyticsCache;

// == Sweep Handle ==
/// Handle to a running sweep task with explicit teardown.
///
/// Dropping the handle does not stop the task; call [`SweepHandle::stop`]
/// when embedding the cache somewhere longer-lived than the session it
/// serves, so tests and host processes don't leak timers.
#[derive(Debug)]
pub struct SweepHandle {
    handle: JoinHandle<()>,
}

impl SweepHandle {
    /// Stops the sweep task.
    pub fn stop(&self) {
        self.handle.abort();
    }

    /// Returns true once the task has terminated.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Spawns a background task that periodically sweeps expired cache entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. It acquires a write lock on the cache to remove expired
/// entries, interleaving with other cache operations like any other writer.
///
/// # Arguments
/// * `cache` - Shared reference to the cache
/// * `sweep_interval_ms` - Interval in milliseconds between sweeps
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(AnalyticsCache::new(100, 300_000)));
/// let sweep = spawn_sweep_task(cache.clone(), 60_000);
/// // Later, during teardown:
/// sweep.stop();
/// ```
pub fn spawn_sweep_task(
    cache: Arc<RwLock<AnalyticsCache>>,
    sweep_interval_ms: u64,
) -> SweepHandle {
    let interval = Duration::from_millis(sweep_interval_ms);

    let handle = tokio::spawn(async move {
        info!(interval_ms = sweep_interval_ms, "starting TTL sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.clean_expired()
            };

            if removed > 0 {
                info!(removed, "TTL sweep removed expired entries");
            } else {
                debug!("TTL sweep found no expired entries");
            }
        }
    });

    SweepHandle { handle }
}
