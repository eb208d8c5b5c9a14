//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment
//! variables.

use std::env;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Default TTL in milliseconds for entries without an explicit TTL
    pub default_ttl_ms: u64,
    /// Background sweep interval in milliseconds
    pub sweep_interval_ms: u64,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment
    /// variables.
    ///
    /// # Environment Variables
    /// - `ANALYTICS_CACHE_MAX_ENTRIES` - Maximum cache entries (default: 100)
    /// - `ANALYTICS_CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds
    ///   (default: 300000, i.e. 5 minutes)
    /// - `ANALYTICS_CACHE_SWEEP_INTERVAL_MS` - Sweep frequency in
    ///   milliseconds (default: 60000)
    pub fn from_env() -> Self {
        Self {
            max_entries: env::var("ANALYTICS_CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
            default_ttl_ms: env::var("ANALYTICS_CACHE_DEFAULT_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300_000),
            sweep_interval_ms: env::var("ANALYTICS_CACHE_SWEEP_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60_000),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 100,
            default_ttl_ms: 300_000,
            sweep_interval_ms: 60_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.max_entries, 100);
        assert_eq!(config.default_ttl_ms, 300_000);
        assert_eq!(config.sweep_interval_ms, 60_000);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("ANALYTICS_CACHE_MAX_ENTRIES");
        env::remove_var("ANALYTICS_CACHE_DEFAULT_TTL_MS");
        env::remove_var("ANALYTICS_CACHE_SWEEP_INTERVAL_MS");

        let config = CacheConfig::from_env();
        assert_eq!(config.max_entries, 100);
        assert_eq!(config.default_ttl_ms, 300_000);
        assert_eq!(config.sweep_interval_ms, 60_000);
    }
}
