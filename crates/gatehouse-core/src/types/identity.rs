//! Resolved request identity.

use serde::{Deserialize, Serialize};

use super::credential::SubjectId;

/// How an identity was resolved for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentitySource {
    /// Signed bearer token from the `Authorization` header.
    BearerToken,
    /// Opaque session id from the session cookie.
    SessionCookie,
}

/// The identity attached to a request once a guard admits it.
///
/// Downstream handlers use `subject_id` to scope their own data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// The authenticated subject.
    pub subject_id: SubjectId,
    /// Free-form claims carried by the token; empty for cookie sessions.
    #[serde(default)]
    pub claims: serde_json::Map<String, serde_json::Value>,
    /// Resolution mechanism.
    pub source: IdentitySource,
}

impl Identity {
    /// Identity resolved from a verified bearer token.
    pub fn from_token(
        subject_id: SubjectId,
        claims: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            subject_id,
            claims,
            source: IdentitySource::BearerToken,
        }
    }

    /// Identity resolved from a live server-side session.
    pub fn from_session(subject_id: SubjectId) -> Self {
        Self {
            subject_id,
            claims: serde_json::Map::new(),
            source: IdentitySource::SessionCookie,
        }
    }
}
