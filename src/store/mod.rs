//! Store Module
//!
//! Thin adapter over the external key-value store. Expiration, per-key
//! atomicity and eviction are the store's job; nothing here keeps state
//! beyond a connection handle.

mod entry;
mod memory;
mod redis_store;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

pub use entry::Entry;
pub use memory::MemoryStore;
pub use redis_store::RedisStore;

/// URL that selects the in-process [`MemoryStore`] instead of Redis
pub const MEMORY_URL: &str = "memory://";

/// Key written and read back by [`self_test`]. Not a valid clip key.
pub const SELF_TEST_KEY: &str = "quickclip:self-test";

const SELF_TEST_VALUE: &str = "ok";
const SELF_TEST_TTL: Duration = Duration::from_secs(60);

// == Store Error ==
#[derive(Error, Debug)]
pub enum StoreError {
    /// The connection URL could not be parsed
    #[error("invalid store URL: {0}")]
    InvalidUrl(#[source] redis::RedisError),

    /// Connectivity or protocol failure
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// The startup write-then-read probe did not round-trip
    #[error("store self-test failed: {0}")]
    SelfTest(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

// == KvStore Trait ==
/// Key-value operations the service needs from its store.
///
/// Implementations must be safe to share across concurrently running
/// request handlers without an external lock.
#[async_trait]
pub trait KvStore: Send + Sync + 'static {
    /// Returns the value under `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, expiring after `ttl`. Overwrites.
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Writes `value` under `key` only if the key is absent.
    ///
    /// Returns `false` when the key was already taken.
    async fn set_nx_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<bool>;

    async fn exists(&self, key: &str) -> Result<bool>;

    /// Removes `key`, returning whether it was present.
    async fn delete(&self, key: &str) -> Result<bool>;
}

// == Backend ==
/// A connected store, before it is erased behind `Arc<dyn KvStore>`.
pub enum Backend {
    Redis(RedisStore),
    Memory(MemoryStore),
}

impl Backend {
    /// Parses `url` and establishes the connection.
    ///
    /// `memory://` selects the in-process store; anything else must be a
    /// URL the redis client accepts (`redis://`, `rediss://`, `redis+unix://`).
    pub async fn connect(url: &str) -> Result<Self> {
        if url.trim() == MEMORY_URL {
            info!("Using in-process memory store");
            return Ok(Backend::Memory(MemoryStore::new()));
        }

        let store = RedisStore::connect(url).await?;
        info!("Connected to Redis");
        Ok(Backend::Redis(store))
    }

    pub fn into_shared(self) -> Arc<dyn KvStore> {
        match self {
            Backend::Redis(store) => Arc::new(store),
            Backend::Memory(store) => Arc::new(store),
        }
    }
}

// == Self Test ==
/// Writes a probe key and reads it back.
///
/// Called once at startup; a failure here must abort the process.
pub async fn self_test(store: &dyn KvStore) -> Result<String> {
    store
        .set_ex(SELF_TEST_KEY, SELF_TEST_VALUE, SELF_TEST_TTL)
        .await?;

    match store.get(SELF_TEST_KEY).await? {
        Some(value) if value == SELF_TEST_VALUE => Ok(value),
        Some(other) => Err(StoreError::SelfTest(format!(
            "expected {:?}, read back {:?}",
            SELF_TEST_VALUE, other
        ))),
        None => Err(StoreError::SelfTest("probe key missing after write".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_memory_backend() {
        let backend = Backend::connect("memory://").await.unwrap();
        assert!(matches!(backend, Backend::Memory(_)));
    }

    #[tokio::test]
    async fn test_connect_rejects_unparsable_url() {
        let result = Backend::connect("not a url").await;
        assert!(matches!(result, Err(StoreError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_self_test_round_trip() {
        let store = MemoryStore::new();
        let value = self_test(&store).await.unwrap();
        assert_eq!(value, "ok");
        assert!(store.exists(SELF_TEST_KEY).await.unwrap());
    }
}
