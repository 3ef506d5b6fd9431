//! TTL Cleanup Task
//!
//! Background task that periodically sweeps expired cache entries.
//!
//! The cache itself owns no timer; this task is just another caller of
//! [`LruCache::cleanup_expired`].

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::LruCache;

/// Spawns a background task that periodically cleans up expired cache entries.
///
/// The task runs in an infinite loop, sleeping for `interval` between sweeps.
/// Each sweep holds the cache's write lock only for the duration of
/// `cleanup_expired`, which never blocks on I/O, so it runs on the async
/// worker directly.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(LruCache::new(1000));
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task<K, V>(cache: Arc<LruCache<K, V>>, interval: Duration) -> JoinHandle<()>
where
    K: Hash + Eq + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "Starting TTL cleanup task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.cleanup_expired();

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let cache = Arc::new(LruCache::new(100));
        cache.put_with_ttl("expire_soon".to_string(), "value", Duration::from_millis(50));

        let handle = spawn_cleanup_task(cache.clone(), Duration::from_millis(100));

        tokio::time::sleep(Duration::from_millis(350)).await;

        // Swept without any get touching it
        assert_eq!(cache.len(), 0, "Expired entry should have been cleaned up");
        assert_eq!(cache.stats().misses, 0);

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let cache = Arc::new(LruCache::new(100));
        cache.put_with_ttl("long_lived".to_string(), "value", Duration::from_secs(3600));
        cache.put("forever".to_string(), "value");

        let handle = spawn_cleanup_task(cache.clone(), Duration::from_millis(50));

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("long_lived"), Some("value"));

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let cache: Arc<LruCache<String, String>> = Arc::new(LruCache::new(100));

        let handle = spawn_cleanup_task(cache, Duration::from_secs(1));

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
