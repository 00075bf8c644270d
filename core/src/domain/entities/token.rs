//! Token entities for JWT-based authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::errors::TokenError;

/// Which half of a token pair a signed token is.
///
/// Both kinds are signed with the same secret, so the kind travels inside the
/// claims and must be checked wherever one kind is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Token kind
    pub kind: TokenKind,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// JWT ID, unique per issued token
    pub jti: String,
}

impl Claims {
    /// Creates claims for `subject` valid for `ttl` from now.
    ///
    /// Fails when `now + ttl` is not a representable timestamp.
    pub fn new(
        subject: impl Into<String>,
        kind: TokenKind,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::EncodingError {
                message: format!("token lifetime of {}s is out of range", ttl.num_seconds()),
            })?;

        Ok(Self {
            sub: subject.into(),
            kind,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// A token is expired from its `exp` second onwards.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Whole seconds left until expiry, zero once expired.
    pub fn remaining_seconds(&self) -> u64 {
        let remaining = self.exp - Utc::now().timestamp();
        u64::try_from(remaining).unwrap_or(0)
    }

    /// Time left until expiry, used as the lifetime of a revocation marker.
    pub fn remaining_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.remaining_seconds())
    }

    /// Gets the user ID from the claims
    #[cfg(test)]
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

/// Login and password presented at sign-in. Never persisted.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"***")
            .finish()
    }
}
