//! Backend Module
//!
//! The port a store uses to reach its persistent document collection.
//!
//! Implementations own the documents; a store only ever reads, inserts or
//! upserts by key and never deletes.

mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

pub use memory::MemoryCollection;

// == Collection ==
/// A persistent key/value document collection.
#[async_trait]
pub trait Collection: Send + Sync {
    /// Fetches the document stored under `key`.
    ///
    /// `Ok(None)` is a definite absence; any `Err` is a failure of the
    /// collection itself and says nothing about whether the key exists.
    async fn find(&self, key: &str) -> anyhow::Result<Option<Value>>;

    /// Atomically stores `value` under `key` unless a document already exists.
    ///
    /// Returns `Ok(false)` when the key was already present.
    async fn insert_if_absent(&self, key: &str, value: Value) -> anyhow::Result<bool>;

    /// Stores `value` under `key`, replacing any existing document.
    async fn upsert(&self, key: &str, value: Value) -> anyhow::Result<()>;
}

#[async_trait]
impl<C: Collection + ?Sized> Collection for Arc<C> {
    async fn find(&self, key: &str) -> anyhow::Result<Option<Value>> {
        (**self).find(key).await
    }

    async fn insert_if_absent(&self, key: &str, value: Value) -> anyhow::Result<bool> {
        (**self).insert_if_absent(key, value).await
    }

    async fn upsert(&self, key: &str, value: Value) -> anyhow::Result<()> {
        (**self).upsert(key, value).await
    }
}
