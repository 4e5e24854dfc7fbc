//! Short-lived, time-bounded cache.
//!
//! Countdowns go stale within a minute or two, so entries expire a fixed time
//! after insertion. Within that window repeated lookups for the same key (for
//! example a stop shared by two lines' upstream runs, or a rider re-planning)
//! skip the provider entirely.

use std::hash::Hash;
use std::time::Duration;

use moka::future::Cache as MokaCache;

/// Configuration for a [`TtlCache`].
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

impl CacheConfig {
    /// Set the time-to-live.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the maximum number of entries.
    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = max_capacity;
        self
    }
}

/// Concurrent map whose entries expire `ttl` after insertion.
///
/// Readers see either the whole previous value or the whole new one.
pub struct TtlCache<K, V> {
    entries: MokaCache<K, V>,
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { entries }
    }

    /// Get a live entry.
    pub async fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key).await
    }

    /// Insert or replace an entry, restarting its TTL.
    pub async fn insert(&self, key: K, value: V) {
        self.entries.insert(key, value).await;
    }

    /// Approximate number of entries (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }

    /// Apply pending evictions so `entry_count` is exact.
    pub async fn sync(&self) {
        self.entries.run_pending_tasks().await;
    }
}
