//! Per-route admission and rate-limit policies.
//!
//! Policies are declared once at startup and resolved per request against
//! the matched route pattern. Resolution precedence: a method-specific
//! entry wins over a path-wide entry, which wins over the process-wide
//! defaults from configuration.

use std::collections::HashMap;
use std::time::Duration;

use axum::http::Method;

use gatehouse_auth::guard::GuardMode;
use gatehouse_core::config::RateLimitConfig;

/// Rate-limit behaviour attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitPolicy {
    /// Use the process-wide default limit and window.
    Inherit,
    /// Exempt from rate limiting (health probes).
    Skip,
    /// Route-specific limit and window.
    Limit { limit: u32, window_seconds: u64 },
}

/// Admission policy attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutePolicy {
    pub guard: GuardMode,
    pub rate_limit: RateLimitPolicy,
}

impl RoutePolicy {
    /// Open to everyone; identity attached when present.
    pub fn public() -> Self {
        Self {
            guard: GuardMode::Public,
            rate_limit: RateLimitPolicy::Inherit,
        }
    }

    /// Requires a resolved identity.
    pub fn authenticated() -> Self {
        Self {
            guard: GuardMode::AuthRequired,
            rate_limit: RateLimitPolicy::Inherit,
        }
    }

    /// Requires the absence of an identity (login, register).
    pub fn guest() -> Self {
        Self {
            guard: GuardMode::GuestOnly,
            rate_limit: RateLimitPolicy::Inherit,
        }
    }

    /// Overrides the rate limit for this route.
    pub fn limit(mut self, limit: u32, window_seconds: u64) -> Self {
        self.rate_limit = RateLimitPolicy::Limit {
            limit,
            window_seconds,
        };
        self
    }

    /// Exempts this route from rate limiting.
    pub fn skip_limit(mut self) -> Self {
        self.rate_limit = RateLimitPolicy::Skip;
        self
    }
}

/// A policy resolved for one concrete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPolicy {
    pub guard: GuardMode,
    /// Limiter scope; the matched route pattern.
    pub scope: String,
    /// `None` when the route is exempt from rate limiting.
    pub rate_limit: Option<(u32, Duration)>,
}

/// Policy table for the whole router.
#[derive(Debug, Clone, Default)]
pub struct RoutePolicies {
    /// Process-wide limit defaults.
    default_limit: u32,
    default_window_seconds: u64,
    /// Method-specific entries, keyed by (method, route pattern).
    by_method: HashMap<(Method, String), RoutePolicy>,
    /// Path-wide entries covering every method on the pattern.
    by_path: HashMap<String, RoutePolicy>,
}

impl RoutePolicies {
    pub fn new(defaults: &RateLimitConfig) -> Self {
        Self {
            default_limit: defaults.default_limit,
            default_window_seconds: defaults.window_seconds,
            by_method: HashMap::new(),
            by_path: HashMap::new(),
        }
    }

    /// Registers a method-specific policy.
    pub fn route(&mut self, method: Method, pattern: &str, policy: RoutePolicy) -> &mut Self {
        self.by_method.insert((method, pattern.to_string()), policy);
        self
    }

    /// Registers a policy for every method on a pattern.
    pub fn path(&mut self, pattern: &str, policy: RoutePolicy) -> &mut Self {
        self.by_path.insert(pattern.to_string(), policy);
        self
    }

    /// Resolves the policy for a request.
    ///
    /// Unregistered routes fall back to public access with the default
    /// rate limit, so forgetting an entry never opens a hole in limiting.
    pub fn resolve(&self, method: &Method, pattern: &str) -> ResolvedPolicy {
        let policy = self
            .by_method
            .get(&(method.clone(), pattern.to_string()))
            .or_else(|| self.by_path.get(pattern))
            .copied()
            .unwrap_or_else(RoutePolicy::public);

        let rate_limit = match policy.rate_limit {
            RateLimitPolicy::Skip => None,
            RateLimitPolicy::Inherit => Some((
                self.default_limit,
                Duration::from_secs(self.default_window_seconds),
            )),
            RateLimitPolicy::Limit {
                limit,
                window_seconds,
            } => Some((limit, Duration::from_secs(window_seconds))),
        };

        ResolvedPolicy {
            guard: policy.guard,
            scope: pattern.to_string(),
            rate_limit,
        }
    }

    /// The standard policy table for the built-in routes.
    pub fn standard(defaults: &RateLimitConfig) -> Self {
        let mut policies = Self::new(defaults);
        policies
            .route(Method::POST, "/api/auth/register", RoutePolicy::guest().limit(10, 60))
            .route(Method::POST, "/api/auth/login", RoutePolicy::guest().limit(10, 60))
            .route(Method::POST, "/api/auth/logout", RoutePolicy::authenticated())
            .route(Method::GET, "/api/auth/me", RoutePolicy::authenticated())
            .route(Method::GET, "/api/health", RoutePolicy::public().skip_limit());
        policies
    }
}
