//! Rejection type mapping auth errors onto HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use academia_auth_core::AuthError;
use academia_types::Role;

/// JSON envelope for auth failures
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    required_roles: Option<Vec<Role>>,
}

/// Rejection wrapper carrying the specific auth error kind.
///
/// The error code stays distinct per kind so clients can pick the right
/// recovery action: re-login, call refresh, or show a permission error.
#[derive(Debug)]
pub struct AuthRejection(pub AuthError);

impl From<AuthError> for AuthRejection {
    fn from(err: AuthError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(error = ?self.0, "auth gate internal error");
        }

        let required_roles = match &self.0 {
            AuthError::Forbidden { required } => Some(required.clone()),
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: self.0.error_code(),
                message: self.0.to_string(),
                required_roles,
            },
        };

        (status, Json(body)).into_response()
    }
}
