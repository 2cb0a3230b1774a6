//! Application state

use std::sync::Arc;

use academia_auth_core::AuthService;
use academia_db::CredentialChain;

/// Type alias for the auth service over the concrete credential chain
pub type AuthServiceImpl = AuthService<CredentialChain>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Auth service for login, refresh and password management
    pub auth: Arc<AuthServiceImpl>,
}

impl AppState {
    /// Create new application state
    pub fn new(auth: AuthServiceImpl) -> Self {
        Self {
            auth: Arc::new(auth),
        }
    }
}
