//! In-memory credential repository.
//!
//! Backs tests, demos, and single-node deployments; a production install
//! plugs its own `CredentialRepository` over whatever database holds its
//! subjects.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use gatehouse_core::error::AppError;
use gatehouse_core::result::AppResult;
use gatehouse_core::traits::repository::CredentialRepository;
use gatehouse_core::types::Credential;

/// Credential repository keeping everything in process memory.
#[derive(Debug, Default)]
pub struct MemoryCredentialRepository {
    /// Credentials keyed by identifier.
    by_identifier: DashMap<String, Credential>,
    /// Monotonic subject id source.
    next_id: AtomicI64,
}

impl MemoryCredentialRepository {
    pub fn new() -> Self {
        Self {
            by_identifier: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl CredentialRepository for MemoryCredentialRepository {
    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<Credential>> {
        Ok(self.by_identifier.get(identifier).map(|c| c.clone()))
    }

    async fn create_subject(
        &self,
        identifier: &str,
        password_hash: &str,
    ) -> AppResult<Credential> {
        // The entry lock makes the uniqueness check and the insert one step,
        // so two concurrent registrations cannot both claim the identifier.
        match self.by_identifier.entry(identifier.to_string()) {
            Entry::Occupied(_) => Err(AppError::conflict("Identifier is already taken")),
            Entry::Vacant(slot) => {
                let credential = Credential {
                    subject_id: self.next_id.fetch_add(1, Ordering::Relaxed),
                    identifier: identifier.to_string(),
                    password_hash: password_hash.to_string(),
                };
                slot.insert(credential.clone());
                debug!(identifier, subject_id = credential.subject_id, "Subject created");
                Ok(credential)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_core::error::ErrorKind;

    #[tokio::test]
    async fn test_create_then_find() {
        let repo = MemoryCredentialRepository::new();
        let created = repo.create_subject("alice", "digest-a").await.unwrap();

        let found = repo.find_by_identifier("alice").await.unwrap().unwrap();
        assert_eq!(found.subject_id, created.subject_id);
        assert_eq!(found.password_hash, "digest-a");
    }

    #[tokio::test]
    async fn test_unknown_identifier_is_none() {
        let repo = MemoryCredentialRepository::new();
        assert!(repo.find_by_identifier("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_identifier_conflicts() {
        let repo = MemoryCredentialRepository::new();
        repo.create_subject("bob", "digest").await.unwrap();

        let err = repo.create_subject("bob", "other").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_subject_ids_are_distinct() {
        let repo = MemoryCredentialRepository::new();
        let a = repo.create_subject("a", "d").await.unwrap();
        let b = repo.create_subject("b", "d").await.unwrap();
        assert_ne!(a.subject_id, b.subject_id);
    }
}
