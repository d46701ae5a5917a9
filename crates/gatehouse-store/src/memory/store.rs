//! In-memory store implementation using dashmap.
//!
//! Entries carry their own deadline and expire lazily on access, matching
//! the shared-store contract that a key past its TTL behaves as absent.
//! Suitable for tests and single-node demos only; multi-process deployments
//! need the Redis provider.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry as MapEntry;

use gatehouse_core::error::AppError;
use gatehouse_core::result::AppResult;
use gatehouse_core::traits::store::{CounterSlot, SharedStore};

/// A stored value with its expiry deadline.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-memory store provider backed by dashmap.
#[derive(Debug, Clone, Default)]
pub struct MemoryStoreProvider {
    entries: Arc<DashMap<String, Entry>>,
}

impl MemoryStoreProvider {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
        }
    }

    /// Remove the entry if its deadline has passed.
    fn evict_if_expired(&self, key: &str) {
        self.entries
            .remove_if(key, |_, entry| Instant::now() >= entry.expires_at);
    }
}

#[async_trait]
impl SharedStore for MemoryStoreProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let expired = match self.entries.get(key) {
            Some(entry) => {
                if Instant::now() < entry.expires_at {
                    return Ok(Some(entry.value.clone()));
                }
                true
            }
            None => false,
        };

        if expired {
            self.evict_if_expired(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.get(key).await?.is_some())
    }

    async fn incr_expire(&self, key: &str, ttl: Duration) -> AppResult<CounterSlot> {
        let now = Instant::now();

        // The entry API holds the shard lock for the whole closure, which is
        // what makes the read-modify-write atomic under concurrency.
        let slot = match self.entries.entry(key.to_string()) {
            MapEntry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                if now >= entry.expires_at {
                    // Window rolled over; start a fresh counter.
                    entry.value = "1".to_string();
                    entry.expires_at = now + ttl;
                    CounterSlot {
                        count: 1,
                        expires_in: ttl,
                    }
                } else {
                    let count = entry
                        .value
                        .parse::<i64>()
                        .map_err(|e| {
                            AppError::store(format!("Counter key '{key}' holds non-integer: {e}"))
                        })?
                        .saturating_add(1);
                    entry.value = count.to_string();
                    CounterSlot {
                        count,
                        expires_in: entry.expires_at - now,
                    }
                }
            }
            MapEntry::Vacant(vacant) => {
                vacant.insert(Entry {
                    value: "1".to_string(),
                    expires_at: now + ttl,
                });
                CounterSlot {
                    count: 1,
                    expires_in: ttl,
                }
            }
        };

        Ok(slot)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn flush_all(&self) -> AppResult<()> {
        self.entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get() {
        let provider = MemoryStoreProvider::new();
        provider
            .set("key1", "value1", Duration::from_secs(60))
            .await
            .unwrap();
        let val = provider.get("key1").await.unwrap();
        assert_eq!(val, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let provider = MemoryStoreProvider::new();
        provider
            .set("key2", "value2", Duration::from_secs(60))
            .await
            .unwrap();
        provider.delete("key2").await.unwrap();
        provider.delete("key2").await.unwrap();
        assert_eq!(provider.get("key2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_after_ttl_returns_none() {
        let provider = MemoryStoreProvider::new();
        provider
            .set("short", "v", Duration::from_millis(20))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(provider.get("short").await.unwrap(), None);
        assert!(!provider.exists("short").await.unwrap());
    }

    #[tokio::test]
    async fn test_incr_expire_counts_up() {
        let provider = MemoryStoreProvider::new();
        let window = Duration::from_secs(60);
        let first = provider.incr_expire("counter", window).await.unwrap();
        assert_eq!(first.count, 1);
        let second = provider.incr_expire("counter", window).await.unwrap();
        assert_eq!(second.count, 2);
        assert!(second.expires_in <= window);
    }

    #[tokio::test]
    async fn test_incr_expire_resets_after_window() {
        let provider = MemoryStoreProvider::new();
        let window = Duration::from_millis(30);
        provider.incr_expire("roll", window).await.unwrap();
        provider.incr_expire("roll", window).await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        let slot = provider.incr_expire("roll", window).await.unwrap();
        assert_eq!(slot.count, 1);
    }

    #[tokio::test]
    async fn test_incr_expire_concurrent_is_exact() {
        let provider = Arc::new(MemoryStoreProvider::new());
        let window = Duration::from_secs(60);

        let tasks: Vec<_> = (0..64)
            .map(|_| {
                let provider = Arc::clone(&provider);
                tokio::spawn(async move { provider.incr_expire("burst", window).await.unwrap() })
            })
            .collect();

        let mut counts = Vec::new();
        for task in tasks {
            counts.push(task.await.unwrap().count);
        }
        counts.sort_unstable();

        // Every post-increment value must be observed exactly once.
        let expected: Vec<i64> = (1..=64).collect();
        assert_eq!(counts, expected);
    }

    #[tokio::test]
    async fn test_json_roundtrip() {
        let provider = MemoryStoreProvider::new();
        let data = serde_json::json!({"name": "test", "count": 42});
        provider
            .set_json("json_key", &data, Duration::from_secs(60))
            .await
            .unwrap();
        let result: Option<serde_json::Value> = provider.get_json("json_key").await.unwrap();
        assert_eq!(result, Some(data));
    }

    #[tokio::test]
    async fn test_flush_all() {
        let provider = MemoryStoreProvider::new();
        provider
            .set("a", "1", Duration::from_secs(60))
            .await
            .unwrap();
        provider.flush_all().await.unwrap();
        assert_eq!(provider.get("a").await.unwrap(), None);
    }
}
