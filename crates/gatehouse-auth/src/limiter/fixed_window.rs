//! Fixed-window counting over the shared store.
//!
//! All instances sharing a store see one counter per (scope, client) pair,
//! so the limit holds across a fleet. The increment-and-expire round trip
//! is atomic in the store provider; a burst of N concurrent requests
//! against a limit of L admits exactly L of them.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use gatehouse_core::result::AppResult;
use gatehouse_core::traits::store::SharedStore;
use gatehouse_store::keys;

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitDecision {
    /// Whether the request is admitted.
    pub admitted: bool,
    /// Requests left in the current window (zero when denied).
    pub remaining: u32,
    /// When the current window closes and the counter resets.
    pub reset_at: DateTime<Utc>,
}

/// Fixed-window rate limiter backed by the shared store.
#[derive(Debug, Clone)]
pub struct FixedWindowLimiter {
    store: Arc<dyn SharedStore>,
}

impl FixedWindowLimiter {
    pub fn new(store: Arc<dyn SharedStore>) -> Self {
        Self { store }
    }

    /// Counts one request against `(scope, client_key)` and decides.
    ///
    /// The counter is incremented before the comparison and never rolled
    /// back, so denied requests still consume nothing further but remain
    /// counted; the window expires on its own.
    pub async fn check(
        &self,
        scope: &str,
        client_key: &str,
        limit: u32,
        window: Duration,
    ) -> AppResult<LimitDecision> {
        let key = keys::rate_limit(scope, client_key);
        let slot = self.store.incr_expire(&key, window).await?;

        let admitted = slot.count <= i64::from(limit);
        let remaining = u32::try_from(i64::from(limit) - slot.count).unwrap_or(0);
        let reset_at = Utc::now()
            + chrono::Duration::from_std(slot.expires_in).unwrap_or(chrono::Duration::zero());

        if !admitted {
            debug!(scope, client_key, count = slot.count, limit, "Rate limit exceeded");
        }

        Ok(LimitDecision { admitted, remaining, reset_at })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_store::memory::MemoryStoreProvider;

    fn make_limiter() -> FixedWindowLimiter {
        FixedWindowLimiter::new(Arc::new(MemoryStoreProvider::new()))
    }

    #[tokio::test]
    async fn test_admits_up_to_limit_then_denies() {
        let limiter = make_limiter();
        let window = Duration::from_secs(60);

        for i in 1..=5 {
            let decision = limiter.check("login", "10.0.0.1", 5, window).await.unwrap();
            assert!(decision.admitted, "request {i} should be admitted");
            assert_eq!(decision.remaining, 5 - i);
        }

        let denied = limiter.check("login", "10.0.0.1", 5, window).await.unwrap();
        assert!(!denied.admitted);
        assert_eq!(denied.remaining, 0);
    }

    #[tokio::test]
    async fn test_scopes_and_clients_are_independent() {
        let limiter = make_limiter();
        let window = Duration::from_secs(60);

        for _ in 0..3 {
            limiter.check("login", "10.0.0.1", 3, window).await.unwrap();
        }
        assert!(!limiter.check("login", "10.0.0.1", 3, window).await.unwrap().admitted);

        // Same client, different scope.
        assert!(limiter.check("register", "10.0.0.1", 3, window).await.unwrap().admitted);
        // Same scope, different client.
        assert!(limiter.check("login", "10.0.0.2", 3, window).await.unwrap().admitted);
    }

    #[tokio::test]
    async fn test_window_rollover_resets_counter() {
        let limiter = make_limiter();
        let window = Duration::from_millis(40);

        assert!(limiter.check("api", "c", 1, window).await.unwrap().admitted);
        assert!(!limiter.check("api", "c", 1, window).await.unwrap().admitted);

        tokio::time::sleep(Duration::from_millis(90)).await;
        assert!(limiter.check("api", "c", 1, window).await.unwrap().admitted);
    }

    #[tokio::test]
    async fn test_concurrent_burst_admits_exactly_limit() {
        let limiter = make_limiter();
        let window = Duration::from_secs(60);

        let mut handles = Vec::new();
        for _ in 0..40 {
            let limiter = limiter.clone();
            handles.push(tokio::spawn(async move {
                limiter.check("burst", "client", 10, window).await.unwrap()
            }));
        }

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap().admitted {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 10);
    }

    #[tokio::test]
    async fn test_reset_at_is_within_window() {
        let limiter = make_limiter();
        let before = Utc::now();
        let decision = limiter
            .check("api", "c", 10, Duration::from_secs(30))
            .await
            .unwrap();

        assert!(decision.reset_at > before);
        assert!(decision.reset_at <= Utc::now() + chrono::Duration::seconds(31));
    }
}
