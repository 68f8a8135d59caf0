//! Cache Cleanup Task
//!
//! Background task that periodically clears an expired cached list, so a stale
//! snapshot is not kept in memory until the next read.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::models::Entity;
use crate::service::CatalogService;

/// Spawns a background task that periodically purges the expired cache slot.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between runs. Purging never refreshes the sliding deadline.
///
/// # Arguments
/// * `service` - Shared catalog service whose cache is swept
/// * `cleanup_interval_secs` - Interval in seconds between runs
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let service = Arc::new(BookService::new(store, ExpirationPolicy::default()));
/// let cleanup_handle = spawn_cache_cleanup_task(service.clone(), 60);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cache_cleanup_task<E: Entity>(
    service: Arc<CatalogService<E>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            if service.purge_expired_cache() {
                info!("Cache cleanup: removed expired book list");
            } else {
                debug!("Cache cleanup: nothing to remove");
            }
        }
    })
}
