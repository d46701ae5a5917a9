//! Claims payload embedded in every bearer token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gatehouse_core::types::SubjectId;

/// Claims payload of a signed bearer token.
///
/// The token is stateless: nothing here is stored server-side, the
/// signature alone vouches for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject — the authenticated subject id.
    pub sub: SubjectId,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token id; makes otherwise identical tokens distinct.
    pub jti: Uuid,
    /// Free-form claims carried for downstream consumers.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub claims: serde_json::Map<String, serde_json::Value>,
}

impl TokenClaims {
    /// Returns the subject id.
    pub fn subject_id(&self) -> SubjectId {
        self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}
