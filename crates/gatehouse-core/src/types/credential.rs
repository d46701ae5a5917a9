//! Credential entity.

use serde::{Deserialize, Serialize};

/// Identifier of an authenticated subject.
pub type SubjectId = i64;

/// A stored credential: unique identifier plus password digest.
///
/// Created at registration, mutated only on password change. The digest is
/// never serialized to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    /// The subject this credential belongs to.
    pub subject_id: SubjectId,
    /// Unique login identifier (username or email).
    pub identifier: String,
    /// Opaque password digest produced by the credential verifier.
    #[serde(skip_serializing)]
    pub password_hash: String,
}
