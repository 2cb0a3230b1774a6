//! PostgreSQL staff credential source

use async_trait::async_trait;
use sqlx::PgPool;

use academia_types::SubjectId;

use crate::error::{DbError, DbResult};
use crate::models::CredentialRow;
use crate::source::CredentialSource;

/// Credential source backed by the staff `users` table.
///
/// Staff accounts can be looked up by username, email or DNI.
#[derive(Clone)]
pub struct PgStaffCredentials {
    pool: PgPool,
}

impl PgStaffCredentials {
    /// Create a new staff credential source
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialSource for PgStaffCredentials {
    async fn find_by_identifier(&self, identifier: &str) -> DbResult<Option<CredentialRow>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, username, email, dni, password AS password_hash, privileges AS role
            FROM users
            WHERE username = $1 OR email = $1 OR dni = $1
            LIMIT 1
            "#,
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_subject_id(&self, id: SubjectId) -> DbResult<Option<CredentialRow>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, username, email, dni, password AS password_hash, privileges AS role
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_password_hash(&self, id: SubjectId, new_hash: &str) -> DbResult<()> {
        let result = sqlx::query("UPDATE users SET password = $1 WHERE id = $2")
            .bind(new_hash)
            .bind(id.0)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        Ok(())
    }
}
