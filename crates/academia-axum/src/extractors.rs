//! Axum extractors for the authenticated context.
//!
//! These read the [`AuthContext`] placed in request extensions by the gate.
//!
//! # Usage
//!
//! ```ignore
//! use academia_axum::{MaybeAuth, RequireAuth};
//!
//! // Requires the gate to have authenticated the request
//! async fn me(auth: RequireAuth) -> String {
//!     format!("subject {}", auth.subject_id)
//! }
//!
//! // Optional authentication
//! async fn landing(auth: MaybeAuth) -> String {
//!     match auth.0 {
//!         Some(ctx) => format!("hello, {}", ctx.subject_id),
//!         None => "hello, guest".to_string(),
//!     }
//! }
//! ```

use std::ops::Deref;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use academia_auth_core::AuthError;

use crate::context::AuthContext;
use crate::error::AuthRejection;

/// Extension key for storing the auth context in request extensions.
#[derive(Debug, Clone)]
pub struct AuthContextExt(pub AuthContext);

/// Extractor that requires an authenticated context.
///
/// Rejects with 401 when the gate did not authenticate the request.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthContext);

impl Deref for RequireAuth {
    type Target = AuthContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContextExt>()
            .cloned()
            .map(|ext| Self(ext.0))
            .ok_or(AuthRejection(AuthError::MissingToken))
    }
}

/// Extractor for optional authentication.
///
/// Yields `None` instead of rejecting when the request is unauthenticated.
#[derive(Debug, Clone)]
pub struct MaybeAuth(pub Option<AuthContext>);

impl Deref for MaybeAuth {
    type Target = Option<AuthContext>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MaybeAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth = parts
            .extensions
            .get::<AuthContextExt>()
            .cloned()
            .map(|ext| ext.0);
        Ok(Self(auth))
    }
}
