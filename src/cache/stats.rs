//! Cache Statistics Module
//!
//! Tracks slot activity: hits, misses, populations, invalidations and
//! expirations.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache slot activity counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of reads served from the slot
    pub hits: u64,
    /// Number of reads that found the slot empty or expired
    pub misses: u64,
    /// Number of times the slot was filled
    pub populations: u64,
    /// Number of evictions that removed a live value
    pub invalidations: u64,
    /// Number of values dropped because a deadline passed
    pub expirations: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
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

    pub fn record_population(&mut self) {
        self.populations += 1;
    }

    pub fn record_invalidation(&mut self) {
        self.invalidations += 1;
    }

    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }
}
