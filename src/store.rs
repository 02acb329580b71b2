//! Store Module
//!
//! Read-through, write-through access to one backing collection, with a
//! TTL-bounded cache of both documents and absences.
//!
//! Every operation has an `*_at` variant taking the instant to evaluate
//! freshness against; the plain variants use the wall clock.

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::backend::Collection;
use crate::cache::{Cache, CacheStats, CachedValue, FillTicket};
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};

// == Store ==
/// A cached handle onto one backing collection.
///
/// Each store owns its cache. Stores bound to the same collection share only
/// the persisted documents, so a write through one store becomes visible to
/// another once the other's cached entry expires or it calls [`Store::refresh`].
#[derive(Debug)]
pub struct Store<C> {
    collection: C,
    cache: Cache,
    ttl: Duration,
}

impl<C: Collection> Store<C> {
    // == Constructor ==
    /// Binds a new store with an empty cache to `collection`.
    pub fn new(collection: C, ttl: Duration) -> Self {
        Self {
            collection,
            cache: Cache::new(),
            ttl,
        }
    }

    /// Binds a new store using the TTL from `config`.
    pub fn from_config(collection: C, config: &StoreConfig) -> Self {
        Self::new(collection, config.ttl())
    }

    // == Accessors ==
    /// How long a cached document or cached absence is trusted.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The backing collection this store is bound to.
    pub fn collection(&self) -> &C {
        &self.collection
    }

    // == Put Initial ==
    /// Stores `value` under `key` only if no document exists yet.
    ///
    /// Returns `Ok(false)` without touching the cache when the key was
    /// already present; whatever this store has cached stays authoritative
    /// until it expires.
    pub async fn put_initial<T>(&self, key: &str, value: &T) -> Result<bool>
    where
        T: Serialize + ?Sized,
    {
        self.put_initial_at(key, value, Utc::now()).await
    }

    /// [`Store::put_initial`] with the cache entry stamped at `now`.
    pub async fn put_initial_at<T>(&self, key: &str, value: &T, now: DateTime<Utc>) -> Result<bool>
    where
        T: Serialize + ?Sized,
    {
        let doc = encode(key, value)?;

        let created = self
            .collection
            .insert_if_absent(key, doc.clone())
            .await
            .map_err(|err| self.backend_failure(key, err))?;

        if created {
            self.cache.fill(key, CachedValue::found(doc), now, self.ttl);
            debug!(key, "initial document created");
        } else {
            debug!(key, "initial document already present");
        }

        Ok(created)
    }

    // == Put ==
    /// Stores `value` under `key`, replacing any existing document, and makes
    /// it immediately visible to reads through this store.
    pub async fn put<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.put_at(key, value, Utc::now()).await
    }

    /// [`Store::put`] with the cache entry stamped at `now`.
    pub async fn put_at<T>(&self, key: &str, value: &T, now: DateTime<Utc>) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let doc = encode(key, value)?;

        self.collection
            .upsert(key, doc.clone())
            .await
            .map_err(|err| self.backend_failure(key, err))?;

        self.cache.fill(key, CachedValue::found(doc), now, self.ttl);
        Ok(())
    }

    // == Get ==
    /// Reads the document stored under `key`.
    ///
    /// A fresh cached document or cached absence answers without touching the
    /// collection. Otherwise the collection is queried and a document or a
    /// definite absence is cached; collection failures are returned as-is and
    /// never cached.
    pub async fn get<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.get_at(key, Utc::now()).await
    }

    /// [`Store::get`] with freshness evaluated at `now`.
    pub async fn get_at<T>(&self, key: &str, now: DateTime<Utc>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let ticket = match self.cache.lookup_for_fill(key, now) {
            Ok(entry) => {
                return match entry.value {
                    CachedValue::Found(doc) => {
                        debug!(key, "cache hit");
                        decode(key, &doc)
                    }
                    CachedValue::NotFound => {
                        debug!(key, "cached not found");
                        Err(StoreError::not_found(key))
                    }
                };
            }
            Err(ticket) => ticket,
        };

        debug!(key, "cache miss, querying collection");
        let found = self
            .collection
            .find(key)
            .await
            .map_err(|err| self.backend_failure(key, err))?;

        // A write or refresh that finished while we were querying wins
        match found {
            Some(doc) => {
                let result = decode(key, &doc);
                self.fill_read(key, CachedValue::found(doc), now, ticket);
                result
            }
            None => {
                self.fill_read(key, CachedValue::NotFound, now, ticket);
                Err(StoreError::not_found(key))
            }
        }
    }

    fn fill_read(&self, key: &str, value: CachedValue, now: DateTime<Utc>, ticket: FillTicket) {
        if !self.cache.fill_if_unchanged(key, value, now, self.ttl, ticket) {
            debug!(key, "read-through fill overtaken, not cached");
        }
    }

    // == Refresh ==
    /// Forgets everything this store has cached, so the next access to any
    /// key consults the collection.
    pub fn refresh(&self) {
        let dropped = self.cache.clear();
        info!(dropped, "store cache refreshed");
    }

    // == Purge Expired ==
    /// Drops cache entries that have expired by now. Returns the number removed.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Utc::now())
    }

    /// [`Store::purge_expired`] against the instant `now`.
    pub fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        self.cache.purge_expired(now)
    }

    // == Stats ==
    /// Returns a snapshot of this store's cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn backend_failure(&self, key: &str, err: anyhow::Error) -> StoreError {
        warn!(key, error = %err, "backing collection call failed");
        StoreError::backend(key, err)
    }
}

fn encode<T>(key: &str, value: &T) -> Result<Value>
where
    T: Serialize + ?Sized,
{
    serde_json::to_value(value).map_err(|err| StoreError::codec(key, err))
}

fn decode<T>(key: &str, doc: &Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(doc).map_err(|err| StoreError::codec(key, err))
}
