//! Token issuance and verification
//!
//! Tokens are HS256-signed JWS strings carrying the claims described in the
//! service contract: `sub`, `type`, `iat`, `exp`, plus `role`/`username`/
//! `email` on access tokens only. Refresh tokens carry the minimum so the
//! role is always re-read from the credential store on refresh.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use academia_types::{Role, SubjectId, SubjectSummary};

use crate::{AuthConfig, AuthError};

/// Token type discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Access => write!(f, "access"),
            Self::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims embedded in a signed token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject ID in decimal string form
    pub sub: String,
    /// Token type
    #[serde(rename = "type")]
    pub kind: TokenKind,
    /// Role at issuance time (access tokens only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Username (access tokens only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Email (access tokens only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Issued-at timestamp (epoch seconds)
    pub iat: i64,
    /// Expiration timestamp (epoch seconds)
    pub exp: i64,
}

impl Claims {
    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Parse the subject ID out of the `sub` claim
    pub fn subject_id(&self) -> Result<SubjectId, AuthError> {
        SubjectId::parse(&self.sub).map_err(|_| AuthError::InvalidToken)
    }
}

/// HS256 signing key shared by the issuer and verifier.
///
/// Immutable once constructed; tokens signed under a different key never
/// verify, so two processes with independently generated keys never accept
/// each other's tokens.
#[derive(Clone)]
pub struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKey {
    /// Minimum allowed secret length in bytes (256 bits)
    pub const MIN_SECRET_LENGTH: usize = 32;

    /// Create a signing key from a fixed secret.
    ///
    /// Use this when the secret is persisted so tokens survive a restart.
    ///
    /// # Errors
    /// Returns an error if the secret is shorter than 32 bytes.
    pub fn from_secret(secret: impl AsRef<[u8]>) -> Result<Self, KeyError> {
        let secret = secret.as_ref();
        if secret.len() < Self::MIN_SECRET_LENGTH {
            return Err(KeyError::SecretTooShort {
                actual: secret.len(),
                minimum: Self::MIN_SECRET_LENGTH,
            });
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        })
    }

    /// Generate a fresh random signing key.
    ///
    /// The secret lives only in this process: every token issued under it
    /// becomes unverifiable after a restart, forcing all principals to log
    /// in again. Accepted trade-off for single-instance deployments; use
    /// [`SigningKey::from_secret`] with a persisted secret otherwise.
    pub fn generate() -> Self {
        let mut secret = [0u8; Self::MIN_SECRET_LENGTH];
        rand::thread_rng().fill_bytes(&mut secret);
        Self {
            encoding: EncodingKey::from_secret(&secret),
            decoding: DecodingKey::from_secret(&secret),
        }
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey").finish_non_exhaustive()
    }
}

/// Errors that can occur when creating a signing key
#[derive(Debug, Clone, thiserror::Error)]
pub enum KeyError {
    #[error("signing secret too short: got {actual} bytes, need at least {minimum}")]
    SecretTooShort { actual: usize, minimum: usize },
}

/// Token issuer
#[derive(Clone)]
pub struct TokenIssuer {
    key: SigningKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    /// Create a new issuer from the auth configuration
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            key: config.signing_key.clone(),
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
        }
    }

    /// Issue a short-lived access token carrying the subject's role
    pub fn issue_access(&self, subject: &SubjectSummary) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.id.to_string(),
            kind: TokenKind::Access,
            role: Some(subject.role),
            username: Some(subject.username.clone()),
            email: subject.email.clone(),
            iat: now,
            exp: now + self.access_ttl.as_secs() as i64,
        };
        self.sign(&claims)
    }

    /// Issue a long-lived refresh token.
    ///
    /// Carries only the subject ID: the role must be re-resolved from the
    /// credential store when the token is redeemed.
    pub fn issue_refresh(&self, subject_id: SubjectId) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject_id.to_string(),
            kind: TokenKind::Refresh,
            role: None,
            username: None,
            email: None,
            iat: now,
            exp: now + self.refresh_ttl.as_secs() as i64,
        };
        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.key.encoding).map_err(|e| {
            tracing::error!("token signing failed: {}", e);
            AuthError::Internal("token signing failed".to_string())
        })
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

/// Token verifier
#[derive(Clone)]
pub struct TokenVerifier {
    key: SigningKey,
}

impl TokenVerifier {
    /// Create a new verifier from the auth configuration
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            key: config.signing_key.clone(),
        }
    }

    /// Validate a token and return its claims.
    ///
    /// Checks encoding and signature, then expiry, then token type, and
    /// fails with a distinct error for each so callers can pick the right
    /// recovery action.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;
        // Tokens are verified by the process that minted them; no clock skew
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.key.decoding, &validation).map_err(|e| {
            tracing::debug!("token validation failed: {}", e);
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                _ => AuthError::InvalidToken,
            }
        })?;

        let claims = data.claims;

        if claims.kind != expected {
            tracing::debug!("token type mismatch: expected {}, got {}", expected, claims.kind);
            return Err(AuthError::WrongTokenType);
        }

        // Access tokens always carry a role claim
        if claims.kind == TokenKind::Access && claims.role.is_none() {
            tracing::debug!("access token without role claim");
            return Err(AuthError::InvalidToken);
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier").finish_non_exhaustive()
    }
}
