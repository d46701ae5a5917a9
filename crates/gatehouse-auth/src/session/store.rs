//! Session storage over the shared store.
//!
//! Sessions live as JSON values keyed by a cryptographically random opaque
//! id. The shared-store TTL enforces expiry; `lookup` re-checks
//! `expires_at` so a stale entry can never resolve an identity. Backed by
//! the in-memory provider in tests and the Redis provider in production.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use rand::Rng;
use tracing::debug;

use gatehouse_core::result::AppResult;
use gatehouse_core::traits::store::SharedStore;
use gatehouse_core::types::{Session, SubjectId};
use gatehouse_store::keys;

/// Number of random bytes in a session id.
const SESSION_ID_BYTES: usize = 32;

/// Issues and looks up opaque sessions with a fixed TTL.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Shared store holding the session table.
    store: Arc<dyn SharedStore>,
    /// Fixed session time-to-live.
    ttl: Duration,
}

impl SessionStore {
    /// Creates a new session store with the given fixed TTL.
    pub fn new(store: Arc<dyn SharedStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// The fixed session TTL; the cookie max-age is bound to the same value.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Creates a new session for the subject and returns it.
    ///
    /// The caller places the returned id in an HTTP-only cookie.
    pub async fn create(&self, subject_id: SubjectId) -> AppResult<Session> {
        let id = generate_session_id();
        let now = Utc::now();
        let session = Session {
            id: id.clone(),
            subject_id,
            created_at: now,
            expires_at: now
                + chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::zero()),
        };

        self.store
            .set(&keys::session(&id), &serde_json::to_string(&session)?, self.ttl)
            .await?;

        debug!(subject_id, "Session created");
        Ok(session)
    }

    /// Looks up a session by id.
    ///
    /// Returns `None` when the id is unknown or the session has expired
    /// (lazy expiry; no background sweep required).
    pub async fn lookup(&self, session_id: &str) -> AppResult<Option<Session>> {
        let Some(raw) = self.store.get(&keys::session(session_id)).await? else {
            return Ok(None);
        };

        let session: Session = serde_json::from_str(&raw)?;
        if session.is_expired() {
            // Store TTL and record expiry can drift by a tick; treat as absent.
            self.destroy(session_id).await?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Destroys a session. Destroying a missing session is not an error.
    pub async fn destroy(&self, session_id: &str) -> AppResult<()> {
        self.store.delete(&keys::session(session_id)).await
    }
}

/// Generates a cryptographically random, URL-safe opaque session id.
fn generate_session_id() -> String {
    let mut bytes = [0u8; SESSION_ID_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
