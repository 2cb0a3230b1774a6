//! Configuration types for the auth core

use std::time::Duration;

use crate::token::SigningKey;

/// Auth core configuration.
///
/// The signing key is injected here and never read from ambient state; it
/// must not change while the process serves traffic.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 key shared by issuer and verifier
    pub signing_key: SigningKey,
    /// Access token lifetime
    pub access_ttl: Duration,
    /// Refresh token lifetime; deliberately much longer than the access
    /// lifetime so refresh tokens actually outlive the tokens they renew
    pub refresh_ttl: Duration,
    /// Upper bound on any single credential store call
    pub store_timeout: Duration,
}

impl AuthConfig {
    /// Create a config with default lifetimes (30 minute access tokens,
    /// 7 day refresh tokens, 5 second store timeout)
    pub fn new(signing_key: SigningKey) -> Self {
        Self {
            signing_key,
            access_ttl: Duration::from_secs(30 * 60),
            refresh_ttl: Duration::from_secs(7 * 24 * 60 * 60),
            store_timeout: Duration::from_secs(5),
        }
    }

    /// Set the access token lifetime
    #[must_use]
    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = ttl;
        self
    }

    /// Set the refresh token lifetime
    #[must_use]
    pub fn with_refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = ttl;
        self
    }

    /// Set the credential store call timeout
    #[must_use]
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }
}
