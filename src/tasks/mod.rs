//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside a store.
//!
//! # Tasks
//! - Purge: Drops expired cache entries at configured intervals

mod purge;

pub use purge::{spawn_purge_task, MIN_PURGE_INTERVAL};
