//! Auth service - ties together credential resolution, password
//! verification, token issuance and the refresh flow

use std::future::Future;
use std::sync::Arc;

use academia_db::{CredentialRow, CredentialSource, DbResult};
use academia_types::{Role, SubjectId, SubjectSummary};

use crate::{
    config::AuthConfig,
    password::PasswordHasher,
    token::{TokenIssuer, TokenKind, TokenVerifier},
    AuthError,
};

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Short-lived access token
    pub access_token: String,
    /// Long-lived refresh token
    pub refresh_token: String,
    /// Authenticated subject
    pub subject: SubjectSummary,
}

/// Authentication service.
///
/// Stateless across requests: the only shared piece is the signing key
/// inside the issuer/verifier, which is immutable after construction. All
/// credential store calls are bounded by the configured timeout and fail
/// closed as [`AuthError::BackendUnavailable`].
pub struct AuthService<C: CredentialSource> {
    config: AuthConfig,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
    hasher: PasswordHasher,
    store: Arc<C>,
}

impl<C: CredentialSource> AuthService<C> {
    /// Create a new auth service
    pub fn new(config: AuthConfig, store: Arc<C>) -> Self {
        Self {
            issuer: TokenIssuer::new(&config),
            verifier: TokenVerifier::new(&config),
            hasher: PasswordHasher::new(),
            store,
            config,
        }
    }

    /// Verifier handle for the authorization gate
    pub fn verifier(&self) -> TokenVerifier {
        self.verifier.clone()
    }

    // =========================================================================
    // Login
    // =========================================================================

    /// Authenticate an identifier/password pair and mint both tokens.
    ///
    /// Unknown identifier and wrong password both come back as
    /// [`AuthError::InvalidCredentials`] so callers cannot tell which part
    /// was wrong.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let record = self
            .bounded(self.store.find_by_identifier(identifier))
            .await??
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.verify_password(password, &record.password_hash).await? {
            tracing::debug!(identifier, "password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let subject = subject_summary(record)?;
        let access_token = self.issuer.issue_access(&subject)?;
        let refresh_token = self.issuer.issue_refresh(subject.id)?;

        tracing::debug!(subject = %subject.id, role = %subject.role, "login succeeded");
        Ok(LoginOutcome {
            access_token,
            refresh_token,
            subject,
        })
    }

    // =========================================================================
    // Refresh
    // =========================================================================

    /// Exchange a valid refresh token for a new access token.
    ///
    /// The role is re-read from the credential store, never trusted from the
    /// old token, so a promotion or demotion takes effect on the very next
    /// refresh. Refresh tokens are not rotated here: the same token stays
    /// redeemable until it expires.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let claims = self.verifier.verify(refresh_token, TokenKind::Refresh)?;
        let subject_id = claims.subject_id()?;

        let record = self
            .bounded(self.store.find_by_subject_id(subject_id))
            .await??
            .ok_or(AuthError::SubjectNotFound)?;

        let subject = subject_summary(record)?;
        tracing::debug!(subject = %subject.id, "access token refreshed");
        self.issuer.issue_access(&subject)
    }

    // =========================================================================
    // Password management
    // =========================================================================

    /// Change a subject's password after re-verifying the current one
    pub async fn change_password(
        &self,
        subject_id: SubjectId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let record = self
            .bounded(self.store.find_by_subject_id(subject_id))
            .await??
            .ok_or(AuthError::SubjectNotFound)?;

        if !self
            .verify_password(current_password, &record.password_hash)
            .await?
        {
            tracing::debug!(subject = %subject_id, "current password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let new_hash = self.hash_password(new_password).await?;
        self.bounded(self.store.update_password_hash(subject_id, &new_hash))
            .await??;

        tracing::debug!(subject = %subject_id, "password changed");
        Ok(())
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// Look up the current summary for a subject
    pub async fn profile(&self, subject_id: SubjectId) -> Result<SubjectSummary, AuthError> {
        let record = self
            .bounded(self.store.find_by_subject_id(subject_id))
            .await??
            .ok_or(AuthError::SubjectNotFound)?;
        subject_summary(record)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Run a credential store call under the configured timeout
    async fn bounded<T>(
        &self,
        fut: impl Future<Output = DbResult<T>>,
    ) -> Result<Result<T, AuthError>, AuthError> {
        match tokio::time::timeout(self.config.store_timeout, fut).await {
            Ok(result) => Ok(result.map_err(AuthError::from)),
            Err(_) => {
                tracing::warn!("credential store call timed out");
                Err(AuthError::BackendUnavailable)
            }
        }
    }

    /// Verify a password off the async runtime; Argon2 is deliberately slow
    async fn verify_password(&self, plaintext: &str, stored_hash: &str) -> Result<bool, AuthError> {
        let hasher = self.hasher.clone();
        let plaintext = plaintext.to_string();
        let stored_hash = stored_hash.to_string();
        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &stored_hash))
            .await
            .map_err(|e| AuthError::Internal(format!("hash worker failed: {e}")))
    }

    /// Hash a password off the async runtime
    async fn hash_password(&self, plaintext: &str) -> Result<String, AuthError> {
        let hasher = self.hasher.clone();
        let plaintext = plaintext.to_string();
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| AuthError::Internal(format!("hash worker failed: {e}")))?
    }
}

/// Parse a credential row into the public subject summary.
///
/// The role string comes from the store; anything outside the closed role
/// set is an internal error, never a default role.
fn subject_summary(record: CredentialRow) -> Result<SubjectSummary, AuthError> {
    let role = record.role.parse::<Role>().map_err(|e| {
        tracing::error!("credential store returned {}", e);
        AuthError::Internal("unknown role in credential store".to_string())
    })?;
    Ok(SubjectSummary {
        id: SubjectId(record.id),
        username: record.username,
        email: record.email,
        role,
    })
}

impl<C: CredentialSource> std::fmt::Debug for AuthService<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
