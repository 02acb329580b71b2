//! Cache Statistics Module
//!
//! Tracks cache behaviour: hits, cached absences, misses, fills and purges.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups answered by a fresh document entry
    pub hits: u64,
    /// Lookups answered by a fresh "not found" entry
    pub negative_hits: u64,
    /// Lookups that found nothing fresh (absent or expired)
    pub misses: u64,
    /// Entries written by reads or writes
    pub fills: u64,
    /// Read-through fills dropped because a write or clear overtook them
    pub skipped_fills: u64,
    /// Expired entries dropped by purging
    pub purged: u64,
    /// Current number of entries in the cache, fresh or not
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Fraction of lookups that avoided the backing collection.
    ///
    /// Cached absences count as hits. Returns 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let answered = self.hits + self.negative_hits;
        let total = answered + self.misses;
        if total == 0 {
            0.0
        } else {
            answered as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_negative_hit(&mut self) {
        self.negative_hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_fill(&mut self) {
        self.fills += 1;
    }

    pub fn record_skipped_fill(&mut self) {
        self.skipped_fills += 1;
    }

    pub fn record_purged(&mut self, count: usize) {
        self.purged += count as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
