//! Expired Entry Purge Task
//!
//! Background task that periodically drops expired cache entries so a
//! long-lived store does not keep stale entries for keys it no longer reads.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::backend::Collection;
use crate::store::Store;

/// Shortest interval the purge loop will sleep for
pub const MIN_PURGE_INTERVAL: Duration = Duration::from_millis(10);

/// Spawns a background task that periodically purges expired entries from
/// `store`'s cache.
///
/// Purging never changes what a read returns: an expired entry already
/// behaves as absent. Intervals below [`MIN_PURGE_INTERVAL`] are raised to it.
/// The returned handle can be used to abort the task.
///
/// # Example
/// ```ignore
/// let store = Arc::new(Store::new(MemoryCollection::new(), chrono::Duration::seconds(10)));
/// let purge_handle = spawn_purge_task(store.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// purge_handle.abort();
/// ```
pub fn spawn_purge_task<C>(store: Arc<Store<C>>, interval: Duration) -> JoinHandle<()>
where
    C: Collection + 'static,
{
    let interval = interval.max(MIN_PURGE_INTERVAL);

    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "starting cache purge task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = store.purge_expired();
            if removed > 0 {
                info!(removed, "cache purge removed expired entries");
            } else {
                debug!("cache purge found no expired entries");
            }
        }
    })
}
