//! Configuration Module
//!
//! Handles loading store configuration from environment variables.

use std::env;
use std::time::Duration as StdDuration;

use chrono::Duration;

/// Default cache TTL in milliseconds
pub const DEFAULT_TTL_MS: u64 = 10_000;

/// Default background purge interval in seconds
pub const DEFAULT_PURGE_INTERVAL_SECS: u64 = 60;

/// Store configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// How long a cached document (or cached absence) is trusted, in milliseconds
    pub ttl_ms: u64,
    /// Background purge interval in seconds
    pub purge_interval_secs: u64,
}

impl StoreConfig {
    /// Creates a new StoreConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PERSIST_CACHE_TTL_MS` - Cache TTL in milliseconds (default: 10000)
    /// - `PERSIST_CACHE_PURGE_INTERVAL_SECS` - Purge frequency in seconds (default: 60,
    ///   zero is rejected)
    pub fn from_env() -> Self {
        Self {
            ttl_ms: env::var("PERSIST_CACHE_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TTL_MS),
            purge_interval_secs: env::var("PERSIST_CACHE_PURGE_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_PURGE_INTERVAL_SECS),
        }
    }

    /// The cache TTL as a signed duration usable in instant arithmetic.
    pub fn ttl(&self) -> Duration {
        Duration::milliseconds(i64::try_from(self.ttl_ms).unwrap_or(i64::MAX))
    }

    /// The purge interval, never shorter than one second.
    pub fn purge_interval(&self) -> StdDuration {
        StdDuration::from_secs(self.purge_interval_secs.max(1))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_TTL_MS,
            purge_interval_secs: DEFAULT_PURGE_INTERVAL_SECS,
        }
    }
}
