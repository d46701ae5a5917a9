//! Shared-store trait for pluggable backends.
//!
//! The shared store holds the only cross-request mutable state Gatehouse
//! owns: rate-limit counters and the session table. Both are accessed
//! concurrently by many request workers, potentially across processes, so
//! the counter primitive is a single atomic increment-and-expire rather
//! than separate read/write calls.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Result of an atomic increment-and-expire on a counter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSlot {
    /// Post-increment counter value.
    pub count: i64,
    /// Remaining time until the counter expires.
    pub expires_in: Duration,
}

/// Trait for shared-store backends (Redis or in-memory).
///
/// All values are serialized as strings (JSON). The provider is responsible
/// for key prefixing and TTL enforcement; a key past its TTL behaves as
/// absent.
#[async_trait]
pub trait SharedStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist or has expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value with a TTL.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Delete a key. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check whether a key exists.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Atomically increment a counter, setting its expiry to `ttl` when the
    /// increment creates the key. Returns the post-increment value and the
    /// remaining window in one operation.
    ///
    /// This must be a single atomic step against the backend; a
    /// read-modify-write race here would admit more requests than the
    /// configured limit.
    async fn incr_expire(&self, key: &str, ttl: Duration) -> AppResult<CounterSlot>;

    /// Get a typed value by deserializing from JSON.
    async fn get_json<T: serde::de::DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> AppResult<Option<T>>
    where
        Self: Sized,
    {
        match self.get(key).await? {
            Some(value) => {
                let parsed = serde_json::from_str(&value)?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value by serializing to JSON.
    async fn set_json<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()>
    where
        Self: Sized,
    {
        let json = serde_json::to_string(value)?;
        self.set(key, &json, ttl).await
    }

    /// Check that the store backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Flush all entries from the store.
    async fn flush_all(&self) -> AppResult<()>;
}
