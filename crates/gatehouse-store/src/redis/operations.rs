//! Redis store provider implementation.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use gatehouse_core::error::{AppError, ErrorKind};
use gatehouse_core::result::AppResult;
use gatehouse_core::traits::store::{CounterSlot, SharedStore};

use super::client::RedisClient;

/// Lua script for atomic increment-and-expire.
///
/// KEYS[1] = counter key
/// ARGV[1] = window TTL in milliseconds
///
/// Increments the counter, arms the expiry on the increment that creates
/// the key, and reads the remaining TTL, all in one atomic step. Returns
/// `{count, pttl_ms}`.
const INCR_EXPIRE_SCRIPT: &str = r#"
    local count = redis.call('INCR', KEYS[1])
    if count == 1 then
        redis.call('PEXPIRE', KEYS[1], ARGV[1])
    end
    local ttl = redis.call('PTTL', KEYS[1])
    if ttl < 0 then
        ttl = tonumber(ARGV[1])
    end
    return {count, ttl}
"#;

/// Redis-backed store provider, shared across all server processes.
#[derive(Debug, Clone)]
pub struct RedisStoreProvider {
    /// Redis client.
    client: RedisClient,
}

impl RedisStoreProvider {
    /// Create a new Redis store provider.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Map a Redis error to an AppError.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Store, format!("Redis error: {e}"), e)
    }
}

#[async_trait]
impl SharedStore for RedisStoreProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let result: Option<String> = conn.get(&full_key).await.map_err(Self::map_err)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let _: () = conn
            .set_ex(&full_key, value, ttl.as_secs())
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let _: () = conn.del(&full_key).await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let result: bool = conn.exists(&full_key).await.map_err(Self::map_err)?;
        Ok(result)
    }

    async fn incr_expire(&self, key: &str, ttl: Duration) -> AppResult<CounterSlot> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();

        let (count, ttl_ms): (i64, i64) = redis::Script::new(INCR_EXPIRE_SCRIPT)
            .key(&full_key)
            .arg(ttl.as_millis() as u64)
            .invoke_async(&mut conn)
            .await
            .map_err(Self::map_err)?;

        debug!(key = %full_key, count, ttl_ms, "Counter incremented");

        Ok(CounterSlot {
            count,
            expires_in: Duration::from_millis(ttl_ms.max(0) as u64),
        })
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(pong == "PONG")
    }

    async fn flush_all(&self) -> AppResult<()> {
        // Only flush keys with our prefix, not the entire Redis.
        let pattern = self.client.prefixed_key("*");
        let mut conn = self.client.conn_mut();

        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(&pattern)
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;

        for key in &keys {
            let _: () = conn.del(key).await.map_err(Self::map_err)?;
        }

        Ok(())
    }
}
