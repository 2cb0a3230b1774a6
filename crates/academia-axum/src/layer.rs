//! Tower middleware layer enforcing the authorization gate.
//!
//! The [`AuthGateLayer`] verifies the request's bearer access token and
//! checks the caller's role against the route's allow-list before the
//! wrapped service runs. Verification is pure local computation, so the
//! whole decision happens before the inner future is ever constructed and
//! a rejected request never partially executes the handler.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::response::IntoResponse;
use pin_project_lite::pin_project;
use tower::{Layer, Service};

use academia_auth_core::{AuthError, TokenKind, TokenVerifier};
use academia_types::Role;

use crate::context::AuthContext;
use crate::error::AuthRejection;
use crate::extractors::AuthContextExt;

/// Tower layer gating routes on a role allow-list.
#[derive(Clone)]
pub struct AuthGateLayer {
    verifier: Arc<TokenVerifier>,
    allowed: Arc<[Role]>,
}

impl AuthGateLayer {
    /// Gate that admits any authenticated principal
    #[must_use]
    pub fn new(verifier: TokenVerifier) -> Self {
        Self {
            verifier: Arc::new(verifier),
            allowed: Vec::new().into(),
        }
    }

    /// Gate that admits only the listed roles.
    ///
    /// The administrator role always passes regardless of the list; this
    /// universal override is deliberate policy, not a fallback.
    #[must_use]
    pub fn with_roles(verifier: TokenVerifier, roles: impl Into<Vec<Role>>) -> Self {
        Self {
            verifier: Arc::new(verifier),
            allowed: roles.into().into(),
        }
    }
}

impl<S> Layer<S> for AuthGateLayer {
    type Service = AuthGateService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthGateService {
            inner,
            verifier: self.verifier.clone(),
            allowed: self.allowed.clone(),
        }
    }
}

/// The authorization gate service.
#[derive(Clone)]
pub struct AuthGateService<S> {
    inner: S,
    verifier: Arc<TokenVerifier>,
    allowed: Arc<[Role]>,
}

impl<S> AuthGateService<S> {
    /// Verify the request's access token and check the allow-list
    fn authorize(&self, req: &Request<Body>) -> Result<AuthContext, AuthError> {
        let token = bearer_token(req).ok_or(AuthError::MissingToken)?;
        let claims = self.verifier.verify(token, TokenKind::Access)?;
        let ctx = AuthContext::from_claims(&claims)?;

        if !self.allowed.is_empty() && !ctx.is_admin() && !self.allowed.contains(&ctx.role) {
            tracing::debug!(subject = %ctx.subject_id, role = %ctx.role, "role not in allow-list");
            return Err(AuthError::Forbidden {
                required: self.allowed.to_vec(),
            });
        }

        Ok(ctx)
    }
}

/// Extract the bearer token from the Authorization header
fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl<S> Service<Request<Body>> for AuthGateService<S>
where
    S: Service<Request<Body>, Response = Response<Body>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = AuthGateFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        match self.authorize(&req) {
            Ok(ctx) => {
                req.extensions_mut().insert(AuthContextExt(ctx));
                AuthGateFuture::Calling {
                    future: self.inner.call(req),
                }
            }
            Err(err) => AuthGateFuture::Reject {
                response: Some(AuthRejection(err).into_response()),
            },
        }
    }
}

pin_project! {
    /// Future for the gate service: either an immediate rejection or the
    /// wrapped service's own future.
    #[project = AuthGateFutureProj]
    pub enum AuthGateFuture<F> {
        Reject { response: Option<Response<Body>> },
        Calling { #[pin] future: F },
    }
}

impl<F, E> Future for AuthGateFuture<F>
where
    F: Future<Output = Result<Response<Body>, E>>,
{
    type Output = Result<Response<Body>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.project() {
            AuthGateFutureProj::Reject { response } => {
                let response = response.take().expect("polled after completion");
                Poll::Ready(Ok(response))
            }
            AuthGateFutureProj::Calling { future } => future.poll(cx),
        }
    }
}
