//! Academia Auth API
//!
//! Authentication service for the academia backend: login, token refresh,
//! profile lookup and password changes.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tracing_subscriber::EnvFilter;

use academia_auth_core::AuthService;
use academia_axum::AuthGateLayer;
use academia_db::pg::{PgStaffCredentials, PgStudentCredentials};
use academia_db::{create_pool, CredentialChain};

mod config;
mod error;
mod handlers;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Academia Auth API");

    let config = Config::from_env()?;

    let pool = create_pool(&config.database_url).await?;

    // Staff accounts take precedence over students for ambiguous identifiers
    let store = CredentialChain::new()
        .with_source(Arc::new(PgStaffCredentials::new(pool.clone())))
        .with_source(Arc::new(PgStudentCredentials::new(pool)));

    let auth = AuthService::new(config.auth.clone(), Arc::new(store));
    let verifier = auth.verifier();
    let state = AppState::new(auth);

    // Routes that require an authenticated principal
    let protected = Router::new()
        .route("/me", get(handlers::auth::me))
        .route("/change-password", post(handlers::auth::change_password))
        .route_layer(AuthGateLayer::new(verifier));

    let app = Router::new()
        .nest(
            "/api/v1/auth",
            Router::new()
                .route("/login", post(handlers::auth::login))
                .route("/refresh", post(handlers::auth::refresh))
                .merge(protected),
        )
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
