//! Authentication handlers (login, refresh, me, change-password)

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use academia_axum::RequireAuth;
use academia_types::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RefreshRequest, RefreshResponse,
    SubjectSummary,
};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ChangePasswordResponse {
    pub success: bool,
}

/// POST /api/v1/auth/login
///
/// Authenticate an identifier/password pair and mint both tokens
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest(
            "username and password are required".to_string(),
        ));
    }

    let outcome = state.auth.login(&req.username, &req.password).await?;

    Ok(Json(LoginResponse {
        access_token: outcome.access_token,
        refresh_token: outcome.refresh_token,
        user: outcome.subject,
    }))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token for a new access token
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    if req.refresh_token.is_empty() {
        return Err(ApiError::BadRequest(
            "refresh_token is required".to_string(),
        ));
    }

    let access_token = state.auth.refresh(&req.refresh_token).await?;

    Ok(Json(RefreshResponse { access_token }))
}

/// GET /api/v1/auth/me
///
/// Current subject summary, read fresh from the credential store
pub async fn me(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> ApiResult<Json<SubjectSummary>> {
    let subject = state.auth.profile(auth.subject_id).await?;
    Ok(Json(subject))
}

/// POST /api/v1/auth/change-password
///
/// Change the authenticated subject's password
pub async fn change_password(
    State(state): State<AppState>,
    auth: RequireAuth,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<Json<ChangePasswordResponse>> {
    if req.current_password.is_empty() || req.new_password.is_empty() {
        return Err(ApiError::BadRequest(
            "current and new password are required".to_string(),
        ));
    }

    state
        .auth
        .change_password(auth.subject_id, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(ChangePasswordResponse { success: true }))
}
