//! Academia Axum Integration
//!
//! Axum middleware and extractors enforcing role-based access on academia
//! services.
//!
//! # Overview
//!
//! - **Gate**: [`AuthGateLayer`] verifies the bearer access token and checks
//!   the caller's role against a per-route allow-list before the handler
//!   runs. An empty allow-list admits any authenticated principal; the
//!   administrator role passes every gate.
//! - **Extractors**: [`RequireAuth`] and [`MaybeAuth`] read the
//!   [`AuthContext`] the gate placed in request extensions.
//!
//! # Quick Start
//!
//! ```ignore
//! use academia_axum::{AuthGateLayer, RequireAuth};
//! use academia_types::Role;
//! use axum::{routing::get, Router};
//!
//! async fn grades(auth: RequireAuth) -> String {
//!     format!("grades for {}", auth.subject_id)
//! }
//!
//! let app = Router::new()
//!     .route("/grades", get(grades))
//!     .route_layer(AuthGateLayer::with_roles(verifier, [Role::Administrador, Role::Profesor]));
//! ```

pub mod context;
pub mod error;
pub mod extractors;
pub mod layer;

pub use context::AuthContext;
pub use error::AuthRejection;
pub use extractors::{MaybeAuth, RequireAuth};
pub use layer::{AuthGateLayer, AuthGateService};
