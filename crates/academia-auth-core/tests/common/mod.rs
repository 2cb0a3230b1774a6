//! Shared test helpers

pub mod mock_store;

use academia_auth_core::{AuthConfig, PasswordHasher, SigningKey};
use academia_db::CredentialRow;

/// Config with a fresh per-test signing key and default lifetimes
pub fn test_config() -> AuthConfig {
    AuthConfig::new(SigningKey::generate())
}

/// Build a credential row with a real Argon2 hash of `password`
#[allow(dead_code)]
pub fn credential(
    id: i64,
    username: &str,
    email: Option<&str>,
    dni: Option<&str>,
    password: &str,
    role: &str,
) -> CredentialRow {
    CredentialRow {
        id,
        username: username.to_string(),
        email: email.map(String::from),
        dni: dni.map(String::from),
        password_hash: PasswordHasher::new().hash(password).unwrap(),
        role: role.to_string(),
    }
}
