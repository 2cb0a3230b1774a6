//! Credential source interface
//!
//! Every credential-bearing table implements the same capability interface;
//! callers compose sources explicitly with [`CredentialChain`] instead of
//! probing repositories for optional lookup methods at runtime.

use async_trait::async_trait;
use std::sync::Arc;

use academia_types::SubjectId;

use crate::error::{DbError, DbResult};
use crate::models::CredentialRow;

/// A source of credential records
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Find a credential record by any login identifier (username, email, DNI)
    async fn find_by_identifier(&self, identifier: &str) -> DbResult<Option<CredentialRow>>;

    /// Find a credential record by subject ID
    async fn find_by_subject_id(&self, id: SubjectId) -> DbResult<Option<CredentialRow>>;

    /// Replace the stored password hash.
    ///
    /// Fails with [`DbError::NotFound`] when the subject does not exist in
    /// this source.
    async fn update_password_hash(&self, id: SubjectId, new_hash: &str) -> DbResult<()>;
}

/// Ordered composition of credential sources.
///
/// Sources are consulted in registration order and the first hit wins, so
/// staff accounts registered ahead of student accounts take precedence for
/// ambiguous identifiers.
#[derive(Clone, Default)]
pub struct CredentialChain {
    sources: Vec<Arc<dyn CredentialSource>>,
}

impl CredentialChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source at the end of the chain
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn CredentialSource>) -> Self {
        self.sources.push(source);
        self
    }
}

#[async_trait]
impl CredentialSource for CredentialChain {
    async fn find_by_identifier(&self, identifier: &str) -> DbResult<Option<CredentialRow>> {
        for source in &self.sources {
            if let Some(row) = source.find_by_identifier(identifier).await? {
                return Ok(Some(row));
            }
        }
        Ok(None)
    }

    async fn find_by_subject_id(&self, id: SubjectId) -> DbResult<Option<CredentialRow>> {
        for source in &self.sources {
            if let Some(row) = source.find_by_subject_id(id).await? {
                return Ok(Some(row));
            }
        }
        Ok(None)
    }

    async fn update_password_hash(&self, id: SubjectId, new_hash: &str) -> DbResult<()> {
        for source in &self.sources {
            match source.update_password_hash(id, new_hash).await {
                Err(DbError::NotFound) => continue,
                other => return other,
            }
        }
        Err(DbError::NotFound)
    }
}

impl std::fmt::Debug for CredentialChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialChain")
            .field("sources", &self.sources.len())
            .finish()
    }
}
