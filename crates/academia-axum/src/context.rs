//! Authenticated request context

use academia_auth_core::{AuthError, Claims};
use academia_types::{Role, SubjectId};

/// Authenticated principal information available to request handlers.
///
/// Populated by the gate from verified access-token claims; the role is the
/// snapshot taken at token issuance, not a live read of the store.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The authenticated subject's ID
    pub subject_id: SubjectId,
    /// Role claim from the access token
    pub role: Role,
    /// Username claim, when present
    pub username: Option<String>,
    /// Email claim, when present
    pub email: Option<String>,
}

impl AuthContext {
    /// Build a context from verified access-token claims
    pub fn from_claims(claims: &Claims) -> Result<Self, AuthError> {
        let subject_id = claims.subject_id()?;
        let role = claims.role.ok_or(AuthError::InvalidToken)?;
        Ok(Self {
            subject_id,
            role,
            username: claims.username.clone(),
            email: claims.email.clone(),
        })
    }

    /// Check if the principal holds the universal-override role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
