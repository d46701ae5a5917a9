//! Store key builders for all Gatehouse entries.
//!
//! Centralising key construction prevents typos and makes it easy to find
//! every key the application uses. Keys here are logical; the Redis client
//! adds the deployment prefix from configuration.

// ── Session keys ───────────────────────────────────────────

/// Store key for a session record by its opaque id.
pub fn session(session_id: &str) -> String {
    format!("session:{session_id}")
}

// ── Rate limit keys ────────────────────────────────────────

/// Store key for a fixed-window counter, scoped per route.
pub fn rate_limit(scope: &str, client_key: &str) -> String {
    format!("ratelimit:{scope}:{client_key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_key_shape() {
        assert_eq!(session("abc"), "session:abc");
    }

    #[test]
    fn test_rate_limit_key_includes_scope_and_client() {
        let key = rate_limit("/api/auth/login", "203.0.113.9");
        assert!(key.contains("/api/auth/login"));
        assert!(key.ends_with("203.0.113.9"));
    }
}
