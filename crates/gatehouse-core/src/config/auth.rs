//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token, session, and cookie configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256). Loaded at startup,
    /// never mutated at runtime.
    #[serde(default = "default_token_secret")]
    pub token_secret: String,
    /// Bearer token TTL in minutes.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: u64,
    /// Server-side session TTL in minutes. The cookie max-age is bound to
    /// the same value.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_minutes: u64,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Whether the session cookie carries the `Secure` attribute.
    #[serde(default)]
    pub cookie_secure: bool,
    /// Minimum password length accepted at registration.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: default_token_secret(),
            token_ttl_minutes: default_token_ttl(),
            session_ttl_minutes: default_session_ttl(),
            cookie_name: default_cookie_name(),
            cookie_secure: false,
            password_min_length: default_password_min(),
        }
    }
}

fn default_token_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_token_ttl() -> u64 {
    15
}

fn default_session_ttl() -> u64 {
    60
}

fn default_cookie_name() -> String {
    "gatehouse_session".to_string()
}

fn default_password_min() -> usize {
    8
}
