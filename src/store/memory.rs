//! In-process store with lazy and swept expiration.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Entry, KvStore, Result};

// == Memory Store ==
/// [`KvStore`] held in a shared map.
///
/// Expired entries are invisible to every operation. They are physically
/// removed when overwritten, deleted, or by [`purge_expired`](Self::purge_expired).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every expired entry and returns how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }

    /// Number of live entries.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let entries = self.entries.read().await;
        entries.values().filter(|e| !e.is_expired_at(now)).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone()))
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), Entry::new(value, ttl));
        Ok(())
    }

    async fn set_nx_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<bool> {
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| !entry.is_expired()) {
            return Ok(false);
        }
        entries.insert(key.to_string(), Entry::new(value, ttl));
        Ok(true)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).is_some_and(|entry| !entry.is_expired()))
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut entries = self.entries.write().await;
        Ok(entries
            .remove(key)
            .is_some_and(|entry| !entry.is_expired()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(600);

    #[tokio::test]
    async fn test_set_and_get() {
        let store = MemoryStore::new();
        store.set_ex("abc123", "hello", TTL).await.unwrap();

        assert_eq!(store.get("abc123").await.unwrap().as_deref(), Some("hello"));
        assert!(store.exists("abc123").await.unwrap());
    }

    #[tokio::test]
    async fn test_get_missing() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing").await.unwrap(), None);
        assert!(!store.exists("missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_set_nx_refuses_live_key() {
        let store = MemoryStore::new();
        assert!(store.set_nx_ex("abc123", "first", TTL).await.unwrap());
        assert!(!store.set_nx_ex("abc123", "second", TTL).await.unwrap());

        assert_eq!(store.get("abc123").await.unwrap().as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_set_nx_reclaims_expired_key() {
        let store = MemoryStore::new();
        store
            .set_ex("abc123", "old", Duration::from_millis(20))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;

        assert!(store.set_nx_ex("abc123", "new", TTL).await.unwrap());
        assert_eq!(store.get("abc123").await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_expired_entry_is_invisible() {
        let store = MemoryStore::new();
        store
            .set_ex("abc123", "hello", Duration::from_millis(20))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;

        assert_eq!(store.get("abc123").await.unwrap(), None);
        assert!(!store.exists("abc123").await.unwrap());
        assert!(!store.delete("abc123").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStore::new();
        store.set_ex("abc123", "hello", TTL).await.unwrap();

        assert!(store.delete("abc123").await.unwrap());
        assert!(!store.delete("abc123").await.unwrap());
        assert_eq!(store.get("abc123").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let store = MemoryStore::new();
        store
            .set_ex("short", "a", Duration::from_millis(20))
            .await
            .unwrap();
        store.set_ex("long", "b", TTL).await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;

        assert_eq!(store.purge_expired().await, 1);
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("long").await.unwrap().as_deref(), Some("b"));
    }
}
