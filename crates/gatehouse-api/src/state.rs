//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Duration;

use gatehouse_auth::limiter::FixedWindowLimiter;
use gatehouse_auth::password::PasswordHasher;
use gatehouse_auth::session::SessionStore;
use gatehouse_auth::token::TokenService;
use gatehouse_core::config::AppConfig;
use gatehouse_core::traits::repository::CredentialRepository;
use gatehouse_core::traits::store::SharedStore;

use crate::policy::RoutePolicies;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Shared store (memory or Redis).
    pub store: Arc<dyn SharedStore>,
    /// Credential persistence.
    pub credentials: Arc<dyn CredentialRepository>,
    /// Argon2id password hashing and verification.
    pub password_hasher: Arc<PasswordHasher>,
    /// Signed bearer token issuance and verification.
    pub token_service: Arc<TokenService>,
    /// Opaque server-side sessions.
    pub sessions: Arc<SessionStore>,
    /// Distributed fixed-window rate limiter.
    pub limiter: FixedWindowLimiter,
    /// Per-route admission and rate-limit policies.
    pub policies: Arc<RoutePolicies>,
}

impl AppState {
    /// Wires the standard state from configuration, a shared store, and a
    /// credential repository.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn SharedStore>,
        credentials: Arc<dyn CredentialRepository>,
    ) -> Self {
        let session_ttl = Duration::from_secs(config.auth.session_ttl_minutes * 60);
        let policies = Arc::new(RoutePolicies::standard(&config.rate_limit));

        Self {
            password_hasher: Arc::new(PasswordHasher::new()),
            token_service: Arc::new(TokenService::new(&config.auth)),
            sessions: Arc::new(SessionStore::new(Arc::clone(&store), session_ttl)),
            limiter: FixedWindowLimiter::new(Arc::clone(&store)),
            config: Arc::new(config),
            store,
            credentials,
            policies,
        }
    }
}
