//! Auth errors

use academia_types::Role;
use thiserror::Error;

/// Authentication and authorization errors.
///
/// Verification and authorization failures are terminal for the request;
/// nothing here is retried and nothing downgrades a failure to success.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown identifier or password mismatch; deliberately one kind for
    /// both so callers cannot probe which part was wrong
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Malformed token or bad signature
    #[error("invalid token")]
    InvalidToken,

    /// Token past its expiry
    #[error("token expired")]
    ExpiredToken,

    /// Access token presented where a refresh token is required, or vice versa
    #[error("wrong token type")]
    WrongTokenType,

    /// No token in the request
    #[error("missing access token")]
    MissingToken,

    /// Authenticated principal without a permitted role
    #[error("insufficient role")]
    Forbidden { required: Vec<Role> },

    /// Token subject no longer exists in the credential store
    #[error("subject not found")]
    SubjectNotFound,

    /// Credential store unreachable or timed out
    #[error("credential store unavailable")]
    BackendUnavailable,

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidCredentials
            | Self::InvalidToken
            | Self::ExpiredToken
            | Self::WrongTokenType
            | Self::MissingToken => 401,
            Self::Forbidden { .. } => 403,
            Self::SubjectNotFound => 404,
            Self::BackendUnavailable => 503,
            Self::Configuration(_) | Self::Internal(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::ExpiredToken => "TOKEN_EXPIRED",
            Self::WrongTokenType => "WRONG_TOKEN_TYPE",
            Self::MissingToken => "MISSING_TOKEN",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::SubjectNotFound => "SUBJECT_NOT_FOUND",
            Self::BackendUnavailable => "AUTH_BACKEND_UNAVAILABLE",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<academia_db::DbError> for AuthError {
    fn from(err: academia_db::DbError) -> Self {
        match err {
            academia_db::DbError::NotFound => Self::SubjectNotFound,
            academia_db::DbError::Sqlx(e) => {
                tracing::error!("credential store error: {}", e);
                Self::BackendUnavailable
            }
        }
    }
}
