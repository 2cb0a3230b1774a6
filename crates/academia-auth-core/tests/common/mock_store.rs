//! In-memory credential source for testing

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;

use academia_db::{CredentialRow, CredentialSource, DbError, DbResult};
use academia_types::SubjectId;

/// In-memory credential source
#[derive(Default, Clone)]
pub struct MockCredentialSource {
    rows: Arc<DashMap<i64, CredentialRow>>,
    /// Artificial latency per call, for timeout tests
    delay: Option<Duration>,
}

impl MockCredentialSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source whose every call sleeps for `delay` before answering
    #[allow(dead_code)]
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            rows: Arc::default(),
            delay: Some(delay),
        }
    }

    /// Insert a credential row directly
    pub fn insert(&self, row: CredentialRow) {
        self.rows.insert(row.id, row);
    }

    /// Remove a credential row, simulating a deleted account
    #[allow(dead_code)]
    pub fn remove(&self, id: i64) {
        self.rows.remove(&id);
    }

    /// Rewrite a subject's role, simulating an administrative update
    #[allow(dead_code)]
    pub fn set_role(&self, id: i64, role: &str) {
        if let Some(mut row) = self.rows.get_mut(&id) {
            row.role = role.to_string();
        }
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl CredentialSource for MockCredentialSource {
    async fn find_by_identifier(&self, identifier: &str) -> DbResult<Option<CredentialRow>> {
        self.pause().await;
        Ok(self
            .rows
            .iter()
            .find(|r| {
                r.username == identifier
                    || r.email.as_deref() == Some(identifier)
                    || r.dni.as_deref() == Some(identifier)
            })
            .map(|r| r.value().clone()))
    }

    async fn find_by_subject_id(&self, id: SubjectId) -> DbResult<Option<CredentialRow>> {
        self.pause().await;
        Ok(self.rows.get(&id.0).map(|r| r.value().clone()))
    }

    async fn update_password_hash(&self, id: SubjectId, new_hash: &str) -> DbResult<()> {
        self.pause().await;
        match self.rows.get_mut(&id.0) {
            Some(mut row) => {
                row.password_hash = new_hash.to_string();
                Ok(())
            }
            None => Err(DbError::NotFound),
        }
    }
}
