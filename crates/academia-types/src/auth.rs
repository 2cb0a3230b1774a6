//! Authentication wire types

use serde::{Deserialize, Serialize};

use crate::{Role, SubjectId};

/// Public view of an authenticated principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectSummary {
    /// Subject ID
    pub id: SubjectId,
    /// Primary login identifier (username, or DNI for students)
    pub username: String,
    /// Email, when the account has one
    pub email: Option<String>,
    /// Current role
    pub role: Role,
}

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Username, email or DNI
    pub username: String,
    /// Plaintext password
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Short-lived access token
    pub access_token: String,
    /// Long-lived refresh token
    pub refresh_token: String,
    /// Authenticated subject
    pub user: SubjectSummary,
}

/// Refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Refresh response
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

/// Password change request
#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}
