//! Main token service implementation

use std::sync::Arc;
use std::time::Duration as StdDuration;

use crate::domain::entities::token::{Claims, TokenKind, TokenPair};
use crate::errors::{DomainError, TokenError};
use crate::repositories::SessionStore;

use super::codec::TokenCodec;
use super::config::TokenServiceConfig;

/// Issues, verifies, refreshes and revokes token pairs.
///
/// Revocation state lives in the session store, so any number of service
/// instances sharing one store agree on which tokens are logged out.
pub struct TokenService<S: SessionStore + ?Sized> {
    codec: TokenCodec,
    store: Arc<S>,
    config: TokenServiceConfig,
}

impl<S: SessionStore + ?Sized> TokenService<S> {
    /// Creates a new token service instance
    pub fn new(store: Arc<S>, config: TokenServiceConfig) -> Self {
        Self {
            codec: TokenCodec::new(&config.jwt_secret),
            store,
            config,
        }
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Generates a new access + refresh token pair for `subject`
    pub fn issue_pair(&self, subject: &str) -> Result<TokenPair, DomainError> {
        let access_token = self
            .codec
            .issue(subject, TokenKind::Access, self.config.access_ttl)?;
        let refresh_token = self
            .codec
            .issue(subject, TokenKind::Refresh, self.config.refresh_ttl)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_in: self.config.access_ttl.num_seconds(),
            refresh_expires_in: self.config.refresh_ttl.num_seconds(),
        })
    }

    /// Parses the token and checks it has not been revoked.
    ///
    /// Store failures propagate as `StoreUnavailable`; they are never
    /// treated as "not revoked".
    pub async fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = self.codec.parse(token)?;

        if self.store.is_revoked(token).await? {
            tracing::debug!(subject = %claims.sub, kind = %claims.kind, "Rejected revoked token");
            return Err(TokenError::Revoked.into());
        }

        Ok(claims)
    }

    /// Like [`verify`](Self::verify), but also requires the token to be of `kind`.
    pub async fn verify_kind(&self, token: &str, kind: TokenKind) -> Result<Claims, DomainError> {
        let claims = self.verify(token).await?;
        if claims.kind != kind {
            return Err(TokenError::WrongKind {
                expected: kind.to_string(),
            }
            .into());
        }
        Ok(claims)
    }

    /// Exchanges a refresh token for a new pair, consuming the old one.
    ///
    /// The consumed token is marked revoked with a set-if-absent write. When
    /// two refreshes race on the same token only the one that writes the
    /// marker gets a pair; the other fails with `Revoked`.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        let claims = self.verify_kind(refresh_token, TokenKind::Refresh).await?;
        let pair = self.issue_pair(&claims.sub)?;

        let ttl = claims.remaining_ttl().max(StdDuration::from_secs(1));
        if !self.store.mark_revoked(refresh_token, ttl).await? {
            tracing::warn!(subject = %claims.sub, "Refresh token replayed");
            return Err(TokenError::Revoked.into());
        }

        tracing::info!(subject = %claims.sub, "Token pair refreshed");
        Ok(pair)
    }

    /// Revokes `token` for `remaining_ttl`.
    ///
    /// Idempotent: revoking an already revoked token succeeds. A zero TTL
    /// means the token is already expired and nothing is written.
    pub async fn logout(&self, token: &str, remaining_ttl: StdDuration) -> Result<(), DomainError> {
        if remaining_ttl.is_zero() {
            return Ok(());
        }

        self.store.mark_revoked(token, remaining_ttl).await?;
        Ok(())
    }

    /// Revokes `token` for the rest of its own lifetime.
    pub async fn logout_token(&self, token: &str) -> Result<(), DomainError> {
        let claims = match self.codec.parse(token) {
            Ok(claims) => claims,
            Err(TokenError::Expired) => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        self.logout(token, claims.remaining_ttl()).await
    }

    /// Revokes a refresh token alongside an access-token logout.
    ///
    /// Tokens that fail to parse, are not refresh tokens, or belong to a
    /// different subject are left alone.
    pub async fn logout_refresh(&self, subject: &str, refresh_token: &str) -> Result<(), DomainError> {
        match self.codec.parse(refresh_token) {
            Ok(claims) if claims.kind == TokenKind::Refresh && claims.sub == subject => {
                self.logout(refresh_token, claims.remaining_ttl()).await
            }
            _ => Ok(()),
        }
    }

    /// `true` iff the token is not currently revoked.
    ///
    /// Fails closed: an unreachable store yields `false`.
    pub async fn check_token(&self, token: &str) -> bool {
        match self.store.is_revoked(token).await {
            Ok(revoked) => !revoked,
            Err(e) => {
                tracing::warn!(error = %e, "Revocation check failed, rejecting token");
                false
            }
        }
    }
}
