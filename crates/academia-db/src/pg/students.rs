//! PostgreSQL student credential source

use async_trait::async_trait;
use sqlx::PgPool;

use academia_types::SubjectId;

use crate::error::{DbError, DbResult};
use crate::models::CredentialRow;
use crate::source::CredentialSource;

/// Credential source backed by the `alumnos` table.
///
/// Students log in with their DNI and always carry the student role; the
/// query maps the student row into the shared credential shape.
#[derive(Clone)]
pub struct PgStudentCredentials {
    pool: PgPool,
}

impl PgStudentCredentials {
    /// Create a new student credential source
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialSource for PgStudentCredentials {
    async fn find_by_identifier(&self, identifier: &str) -> DbResult<Option<CredentialRow>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, dni AS username, mail AS email, dni,
                   password AS password_hash, 'ALUMNO' AS role
            FROM alumnos
            WHERE dni = $1
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
            SELECT id, dni AS username, mail AS email, dni,
                   password AS password_hash, 'ALUMNO' AS role
            FROM alumnos
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_password_hash(&self, id: SubjectId, new_hash: &str) -> DbResult<()> {
        let result = sqlx::query("UPDATE alumnos SET password = $1 WHERE id = $2")
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
