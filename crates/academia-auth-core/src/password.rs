//! Password hashing and verification
//!
//! One strategy for every credential: salted, adaptive Argon2id. Stored
//! hashes are PHC strings; verification fails closed on anything malformed.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};

use crate::AuthError;

/// Password hasher over Argon2id with the library's default parameters
#[derive(Clone, Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a new password hasher
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a plaintext password with a fresh random salt
    pub fn hash(&self, plaintext: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                tracing::error!("password hashing failed: {}", e);
                AuthError::Internal("password hashing failed".to_string())
            })
    }

    /// Verify a plaintext password against a stored PHC hash string.
    ///
    /// Returns `false` for malformed stored hashes rather than erroring, so
    /// the caller learns nothing about why verification failed.
    pub fn verify(&self, plaintext: &str, stored_hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored_hash) else {
            return false;
        };
        self.argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verify_roundtrip() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("wonderland").unwrap();

        assert!(hasher.verify("wonderland", &hash));
        assert!(!hasher.verify("not-wonderland", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = PasswordHasher::new();
        let first = hasher.hash("same-password").unwrap();
        let second = hasher.hash("same-password").unwrap();

        // Fresh salt per call, so identical passwords never share a hash
        assert_ne!(first, second);
        assert!(hasher.verify("same-password", &first));
        assert!(hasher.verify("same-password", &second));
    }

    #[test]
    fn test_hash_does_not_contain_plaintext() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("hunter2").unwrap();
        assert!(!hash.contains("hunter2"));
    }

    #[test]
    fn test_malformed_hash_fails_closed() {
        let hasher = PasswordHasher::new();
        assert!(!hasher.verify("anything", ""));
        assert!(!hasher.verify("anything", "not-a-phc-string"));
        assert!(!hasher.verify("anything", "$argon2id$v=19$truncated"));
    }

    #[test]
    fn test_empty_password_still_roundtrips() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("").unwrap();
        assert!(hasher.verify("", &hash));
        assert!(!hasher.verify("x", &hash));
    }
}
