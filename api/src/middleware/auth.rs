//! Bearer-token gate for protected endpoints.
//!
//! Extracts the access token from the `Authorization` header, verifies it
//! through the token service (signature, expiry, kind and revocation) and
//! injects an [`AuthContext`] into the request. Rejections never reach the
//! wrapped handler:
//!
//! | condition                           | status |
//! |-------------------------------------|--------|
//! | header missing or not `Bearer <t>`  | 401    |
//! | token expired                       | 401    |
//! | bad signature                       | 403    |
//! | any other verification failure      | 403    |
//! | revoked (secondary check)           | 403    |

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use fg_core::{
    errors::{AuthError, DomainError, TokenError},
    services::token::TokenVerifier,
};

use crate::handlers::error::gate_rejection;

/// Identity of the caller, available to handlers behind the gate
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Token subject (user id)
    pub subject: String,
    /// The raw access token, needed to revoke it on logout
    pub token: String,
}

/// Authentication middleware factory
#[derive(Clone)]
pub struct AuthGate {
    verifier: Arc<dyn TokenVerifier>,
}

impl AuthGate {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware {
            service: Rc::new(service),
            verifier: self.verifier.clone(),
        }))
    }
}

/// Authentication middleware service
pub struct AuthGateMiddleware<S> {
    service: Rc<S>,
    verifier: Arc<dyn TokenVerifier>,
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = self.verifier.clone();

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    let response = gate_rejection(&AuthError::MissingToken.into());
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            let claims = match verifier.verify_access(&token).await {
                Ok(claims) => claims,
                Err(e) => {
                    tracing::debug!(error = %e, path = %req.path(), "Rejected bearer token");
                    let response = gate_rejection(&e);
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            // The store may have changed since verification
            if !verifier.check_token(&token).await {
                tracing::debug!(subject = %claims.sub, "Rejected logged out token");
                let response = gate_rejection(&DomainError::Token(TokenError::Revoked));
                return Ok(req.into_response(response).map_into_right_body());
            }

            req.extensions_mut().insert(AuthContext {
                subject: claims.sub,
                token,
            });

            let response = service.call(req).await?;
            Ok(response.map_into_left_body())
        })
    }
}

/// Extracts the token from `Authorization: Bearer <token>`.
///
/// The header must split into exactly two whitespace-separated parts and
/// the scheme is matched case-insensitively.
pub(crate) fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.split_whitespace();

    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => {
            Some(token.to_string())
        }
        _ => None,
    }
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}
