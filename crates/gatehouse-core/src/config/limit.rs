//! Process-wide rate limit defaults.
//!
//! Per-route overrides are declared at route registration time and take
//! precedence over these values.

use serde::{Deserialize, Serialize};

/// Global fixed-window rate limit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum requests per key within one window.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
    /// Window length in seconds.
    #[serde(default = "default_window")]
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            window_seconds: default_window(),
        }
    }
}

fn default_limit() -> u32 {
    60
}

fn default_window() -> u64 {
    60
}
