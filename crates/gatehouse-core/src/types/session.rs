//! Server-side session record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::credential::SubjectId;

/// An opaque server-side session.
///
/// Invariant: `expires_at = created_at + fixed TTL`. A session past
/// `expires_at` is treated as absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque random identifier handed to the client in a cookie.
    pub id: String,
    /// The authenticated subject.
    pub subject_id: SubjectId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Expiry timestamp.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session's TTL has elapsed.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}
