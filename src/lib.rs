//! Persist Cache - A TTL-bounded cache in front of a persistent document collection
//!
//! Reads go through an in-process cache (including cached "not found" results),
//! writes go to the backing collection and the cache together.

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod store;
pub mod tasks;

pub use backend::{Collection, MemoryCollection};
pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use store::Store;
pub use tasks::spawn_purge_task;
