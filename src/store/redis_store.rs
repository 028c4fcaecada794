//! Redis-backed store.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;

use super::{KvStore, Result, StoreError};

// == Redis Store ==
/// [`KvStore`] over a Redis connection.
///
/// `ConnectionManager` multiplexes one connection and reconnects on
/// failure; cloning it is cheap and every command runs on its own clone.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Parses `url` into a client without connecting.
    pub fn client(url: &str) -> Result<redis::Client> {
        redis::Client::open(url).map_err(StoreError::InvalidUrl)
    }

    /// Parses `url` and establishes the connection.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = Self::client(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }
}

/// Redis expiry in milliseconds; `PX 0` is rejected by the server.
fn ttl_millis(ttl: Duration) -> u64 {
    ttl.as_millis().clamp(1, u64::MAX as u128) as u64
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("PX")
            .arg(ttl_millis(ttl))
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn set_nx_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<bool> {
        let mut conn = self.conn.clone();
        // Nil reply means the key already existed
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("PX")
            .arg(ttl_millis(ttl))
            .query_async(&mut conn)
            .await?;
        Ok(reply.is_some())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let count: i64 = redis::cmd("EXISTS").arg(key).query_async(&mut conn).await?;
        Ok(count > 0)
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let removed: i64 = redis::cmd("DEL").arg(key).query_async(&mut conn).await?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_accepts_redis_urls() {
        assert!(RedisStore::client("redis://localhost:6379").is_ok());
        assert!(RedisStore::client("redis://:secret@cache.internal:6380/2").is_ok());
    }

    #[test]
    fn test_client_rejects_garbage() {
        assert!(matches!(
            RedisStore::client("localhost 6379"),
            Err(StoreError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_ttl_millis() {
        assert_eq!(ttl_millis(Duration::from_secs(600)), 600_000);
        assert_eq!(ttl_millis(Duration::from_millis(250)), 250);
        assert_eq!(ttl_millis(Duration::ZERO), 1);
    }
}
