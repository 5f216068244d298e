//! Cache Statistics Module
//!
//! Tracks how the user cache is serving requests.

use serde::Serialize;

// == Cache Stats ==
/// Counters for the user list cache.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Requests answered from a valid entry
    pub hits: u64,
    /// Requests that had to go upstream
    pub misses: u64,
    /// Successful upstream fetches that replaced the entry
    pub refreshes: u64,
    /// Upstream fetches that failed
    pub upstream_failures: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_refresh(&mut self) {
        self.refreshes += 1;
    }

    pub fn record_failure(&mut self) {
        self.upstream_failures += 1;
    }
}

// == Cache Snapshot ==
/// Point-in-time view of the cache for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct CacheSnapshot {
    /// Counters since startup
    pub stats: CacheStats,
    /// Number of users in the live entry, if one is cached
    pub cached_users: Option<usize>,
    /// Milliseconds until the live entry expires, if one is cached
    pub ttl_remaining_ms: Option<u64>,
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.refreshes, 0);
        assert_eq!(stats.upstream_failures, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        assert_eq!(CacheStats::new().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_refresh_and_failure_counters() {
        let mut stats = CacheStats::new();
        stats.record_refresh();
        stats.record_failure();
        stats.record_failure();
        assert_eq!(stats.refreshes, 1);
        assert_eq!(stats.upstream_failures, 2);
    }
}
