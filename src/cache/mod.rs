//! Cache Module
//!
//! Provides the in-process TTL cache with negative-result entries.

mod entry;
mod stats;
mod table;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{CacheEntry, CachedValue};
pub use stats::CacheStats;
pub use table::{Cache, FillTicket};
