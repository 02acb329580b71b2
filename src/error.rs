//! Error types for the persistent store cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Store Error Enum ==
/// Unified error type for store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing collection holds no document for the key
    #[error("Document not found: {key}")]
    NotFound { key: String },

    /// The backing collection failed (transport, I/O, decoding on its side)
    #[error("Backing store failure for key {key}")]
    Backend {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// The caller's value could not be encoded, or a stored document
    /// could not be decoded into the requested type
    #[error("Codec error for key {key}")]
    Codec {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Returns true if this is a definite not-found result.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// The key the failing operation was addressing.
    pub fn key(&self) -> &str {
        match self {
            StoreError::NotFound { key }
            | StoreError::Backend { key, .. }
            | StoreError::Codec { key, .. } => key,
        }
    }

    pub(crate) fn not_found(key: &str) -> Self {
        StoreError::NotFound {
            key: key.to_string(),
        }
    }

    pub(crate) fn backend(key: &str, source: anyhow::Error) -> Self {
        StoreError::Backend {
            key: key.to_string(),
            source,
        }
    }

    pub(crate) fn codec(key: &str, source: serde_json::Error) -> Self {
        StoreError::Codec {
            key: key.to_string(),
            source,
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
