//! Credential row model
//!
//! One shape for every credential-bearing source; student rows are mapped
//! into it by the source's own query.

use sqlx::FromRow;

/// Credential record as read from a credential source.
///
/// `role` stays in its raw string form here; the auth core parses it into
/// the closed [`academia_types::Role`] set exactly once at its boundary.
#[derive(Debug, Clone, FromRow)]
pub struct CredentialRow {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub dni: Option<String>,
    pub password_hash: String,
    pub role: String,
}
