//! Configuration for the Auth API service.

use std::time::Duration;

use academia_auth_core::{AuthConfig, SigningKey};

/// Auth API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,

    /// Database URL
    pub database_url: String,

    /// Auth core configuration
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Database
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        // Server port
        let http_port = std::env::var("HTTP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;

        // Signing secret. Optional: without one the process generates a
        // fresh secret at startup and every outstanding token dies with a
        // restart. Set SECRET_KEY (32+ bytes) to keep tokens valid across
        // restarts and instances.
        let signing_key = match std::env::var("SECRET_KEY") {
            Ok(secret) => SigningKey::from_secret(secret.as_bytes())
                .map_err(|e| ConfigError::SigningKey(e.to_string()))?,
            Err(_) => {
                tracing::warn!("SECRET_KEY not set; generating a per-process signing key");
                SigningKey::generate()
            }
        };

        // Token lifetimes
        let access_ttl_mins: u64 = std::env::var("ACCESS_TTL_MINS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("ACCESS_TTL_MINS"))?;

        let refresh_ttl_days: u64 = std::env::var("REFRESH_TTL_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("REFRESH_TTL_DAYS"))?;

        // Credential store call timeout
        let store_timeout_secs: u64 = std::env::var("STORE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("STORE_TIMEOUT_SECS"))?;

        let auth = AuthConfig::new(signing_key)
            .with_access_ttl(Duration::from_secs(access_ttl_mins * 60))
            .with_refresh_ttl(Duration::from_secs(refresh_ttl_days * 24 * 3600))
            .with_store_timeout(Duration::from_secs(store_timeout_secs));

        Ok(Self {
            http_port,
            database_url,
            auth,
        })
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Signing key error: {0}")]
    SigningKey(String),
}
