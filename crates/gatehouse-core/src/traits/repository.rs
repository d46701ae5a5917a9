//! Credential persistence interface.
//!
//! Business-entity persistence is an external collaborator; Gatehouse only
//! consumes this narrow interface at registration and login.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::Credential;

/// Persistence interface for credentials.
#[async_trait]
pub trait CredentialRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Look up a credential by its unique identifier.
    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<Credential>>;

    /// Create a new subject with the given identifier and password digest.
    ///
    /// Fails with a conflict when the identifier is already taken.
    async fn create_subject(&self, identifier: &str, password_hash: &str)
    -> AppResult<Credential>;
}
