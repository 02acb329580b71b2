//! Cache Entry Module
//!
//! Defines a single timestamped cache entry, holding either a document
//! snapshot or a cached "not found".

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

// == Cached Value ==
/// What a cache entry remembers about a key.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    /// The backing collection held this document
    Found(Arc<Value>),
    /// The backing collection definitely held no document
    NotFound,
}

impl CachedValue {
    pub fn found(value: Value) -> Self {
        CachedValue::Found(Arc::new(value))
    }

    pub fn is_found(&self) -> bool {
        matches!(self, CachedValue::Found(_))
    }
}

// == Cache Entry ==
/// A cached lookup result with its expiry instant.
///
/// Entries are never mutated; a refresh replaces the whole entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached result
    pub value: CachedValue,
    /// Instant the entry was filled
    pub created_at: DateTime<Utc>,
    /// First instant at which the entry is no longer trusted
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry filled at `now` that stays fresh for `ttl`.
    ///
    /// An expiry past the representable range saturates to the maximum instant.
    pub fn new(value: CachedValue, now: DateTime<Utc>, ttl: Duration) -> Self {
        let expires_at = now
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            value,
            created_at: now,
            expires_at,
        }
    }

    // == Freshness ==
    /// Checks whether the entry is still authoritative at `now`.
    ///
    /// Boundary condition: the entry is stale once `now >= expires_at`, so an
    /// entry filled with TTL T at t0 is fresh for every instant in [t0, t0+T).
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    // == Time To Live ==
    /// Returns how long the entry stays fresh after `now`, zero once stale.
    pub fn ttl_remaining_at(&self, now: DateTime<Utc>) -> Duration {
        if self.is_fresh_at(now) {
            self.expires_at.signed_duration_since(now)
        } else {
            Duration::zero()
        }
    }
}
