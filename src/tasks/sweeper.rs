//! Expiry sweep for the memory store.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::store::MemoryStore;

/// Interval between sweeps when running on the memory store
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(30);

/// Spawns a background task that periodically drops expired entries.
///
/// Expired entries are already invisible to readers; the sweep only
/// reclaims their memory. The returned handle is aborted on shutdown.
pub fn spawn_sweeper(store: MemoryStore, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting expiry sweep every {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = store.purge_expired().await;
            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::KvStore;

    #[tokio::test]
    async fn test_sweeper_removes_expired_entries() {
        let store = MemoryStore::new();
        store
            .set_ex("a1b2c3", "value", Duration::from_millis(20))
            .await
            .unwrap();

        let handle = spawn_sweeper(store.clone(), Duration::from_millis(50));
        tokio::time::sleep(Duration::from_millis(200)).await;

        // Nothing left for a manual purge to find
        assert_eq!(store.purge_expired().await, 0);

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweeper_preserves_live_entries() {
        let store = MemoryStore::new();
        store
            .set_ex("a1b2c3", "value", Duration::from_secs(3600))
            .await
            .unwrap();

        let handle = spawn_sweeper(store.clone(), Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(store.get("a1b2c3").await.unwrap().as_deref(), Some("value"));

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweeper_can_be_aborted() {
        let handle = spawn_sweeper(MemoryStore::new(), Duration::from_secs(1));

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
