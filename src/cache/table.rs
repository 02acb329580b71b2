//! Cache Table Module
//!
//! The mutex-guarded key to entry mapping owned by a single store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};

use crate::cache::{CacheEntry, CacheStats, CachedValue};

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, CacheEntry>,
    /// Bumped by every clear
    generation: u64,
    /// Per-key count of write-path fills since the last clear
    versions: HashMap<String, u64>,
    stats: CacheStats,
}

impl Inner {
    fn version(&self, key: &str) -> u64 {
        self.versions.get(key).copied().unwrap_or(0)
    }
}

// == Fill Ticket ==
/// Snapshot of the cache state a read-through miss was taken against.
///
/// A fill carrying a ticket is dropped if the cache was cleared or the key
/// was written since the ticket was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillTicket {
    generation: u64,
    version: u64,
}

// == Cache ==
/// TTL-aware memo of document lookups, including negative results.
///
/// Every operation takes the one lock for the in-memory work only; callers
/// must never hold it across a backing collection round trip, which the
/// synchronous API enforces.
#[derive(Debug, Default)]
pub struct Cache {
    inner: Mutex<Inner>,
}

impl Cache {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // No entry is left half-written by a panic, so a poisoned map is still valid.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Lookup ==
    /// Returns the entry for `key` if one exists and is fresh at `now`.
    ///
    /// An expired entry is reported as a miss but left in place; the next
    /// fill for the key supersedes it.
    pub fn lookup(&self, key: &str, now: DateTime<Utc>) -> Option<CacheEntry> {
        self.lookup_for_fill(key, now).ok()
    }

    // == Lookup For Fill ==
    /// Like [`Cache::lookup`], but a miss yields the ticket a later
    /// [`Cache::fill_if_unchanged`] for the same key must present.
    pub fn lookup_for_fill(
        &self,
        key: &str,
        now: DateTime<Utc>,
    ) -> std::result::Result<CacheEntry, FillTicket> {
        let mut inner = self.lock();

        let fresh = inner
            .entries
            .get(key)
            .filter(|entry| entry.is_fresh_at(now))
            .cloned();

        match fresh {
            Some(entry) => {
                if entry.value.is_found() {
                    inner.stats.record_hit();
                } else {
                    inner.stats.record_negative_hit();
                }
                Ok(entry)
            }
            None => {
                inner.stats.record_miss();
                Err(FillTicket {
                    generation: inner.generation,
                    version: inner.version(key),
                })
            }
        }
    }

    // == Fill ==
    /// Stores a fresh entry for `key` expiring at `now + ttl`, replacing any
    /// existing entry unconditionally.
    ///
    /// This is the write path: it invalidates every outstanding ticket for `key`.
    pub fn fill(&self, key: &str, value: CachedValue, now: DateTime<Utc>, ttl: Duration) {
        let mut inner = self.lock();

        *inner.versions.entry(key.to_string()).or_insert(0) += 1;
        inner
            .entries
            .insert(key.to_string(), CacheEntry::new(value, now, ttl));
        inner.stats.record_fill();
    }

    // == Fill If Unchanged ==
    /// Read-path fill: stores the entry only if neither a clear nor a write
    /// for `key` happened since `ticket` was issued. Returns whether it stored.
    pub fn fill_if_unchanged(
        &self,
        key: &str,
        value: CachedValue,
        now: DateTime<Utc>,
        ttl: Duration,
        ticket: FillTicket,
    ) -> bool {
        let mut inner = self.lock();

        if inner.generation != ticket.generation || inner.version(key) != ticket.version {
            inner.stats.record_skipped_fill();
            return false;
        }

        inner
            .entries
            .insert(key.to_string(), CacheEntry::new(value, now, ttl));
        inner.stats.record_fill();
        true
    }

    // == Clear ==
    /// Removes every entry and invalidates every outstanding ticket.
    /// Returns the number of entries dropped.
    pub fn clear(&self) -> usize {
        let mut inner = self.lock();

        let count = inner.entries.len();
        inner.entries.clear();
        inner.versions.clear();
        inner.generation += 1;
        count
    }

    // == Purge Expired ==
    /// Drops entries that are stale at `now`. Returns the number removed.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut inner = self.lock();

        let before = inner.entries.len();
        inner.entries.retain(|_, entry| entry.is_fresh_at(now));
        let removed = before - inner.entries.len();

        inner.stats.record_purged(removed);
        removed
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();

        let mut stats = inner.stats.clone();
        stats.set_total_entries(inner.entries.len());
        stats
    }

    /// Returns the number of entries held, fresh or not.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }
}
