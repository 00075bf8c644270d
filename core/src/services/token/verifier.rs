//! Verification capability handed to the HTTP layer.

use async_trait::async_trait;

use crate::domain::entities::token::{Claims, TokenKind};
use crate::errors::DomainError;
use crate::repositories::SessionStore;

use super::service::TokenService;

/// What the auth gate needs from the token service, and nothing more.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verifies an access token, including its revocation status.
    async fn verify_access(&self, token: &str) -> Result<Claims, DomainError>;

    /// `false` when the token is revoked or the store cannot be asked.
    async fn check_token(&self, token: &str) -> bool;
}

#[async_trait]
impl<S> TokenVerifier for TokenService<S>
where
    S: SessionStore + ?Sized,
{
    async fn verify_access(&self, token: &str) -> Result<Claims, DomainError> {
        self.verify_kind(token, TokenKind::Access).await
    }

    async fn check_token(&self, token: &str) -> bool {
        TokenService::check_token(self, token).await
    }
}
