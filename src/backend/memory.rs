//! In-Memory Collection
//!
//! A process-local document collection. Useful for tests and for embedding
//! a store where no external database is available.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::Collection;

/// Document collection backed by a HashMap behind an async RwLock.
#[derive(Debug, Default)]
pub struct MemoryCollection {
    documents: RwLock<HashMap<String, Value>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl Collection for MemoryCollection {
    async fn find(&self, key: &str) -> anyhow::Result<Option<Value>> {
        Ok(self.documents.read().await.get(key).cloned())
    }

    async fn insert_if_absent(&self, key: &str, value: Value) -> anyhow::Result<bool> {
        // Check and insert under one write guard
        let mut documents = self.documents.write().await;
        if documents.contains_key(key) {
            return Ok(false);
        }
        documents.insert(key.to_string(), value);
        Ok(true)
    }

    async fn upsert(&self, key: &str, value: Value) -> anyhow::Result<()> {
        self.documents.write().await.insert(key.to_string(), value);
        Ok(())
    }
}
