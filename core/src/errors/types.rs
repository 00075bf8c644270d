//! Authentication and token error types.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown login or wrong password. The two cases are not distinguished.
    #[error("Wrong login or password")]
    WrongLoginOrPassword,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Missing or malformed authorization header")]
    MissingToken,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token generation failed: {message}")]
    EncodingError { message: String },

    #[error("Token signature verification failed")]
    SignatureInvalid,

    #[error("Invalid token format")]
    Malformed,

    #[error("Token expired")]
    Expired,

    #[error("You already logged out")]
    Revoked,

    #[error("Wrong token kind: expected {expected}")]
    WrongKind { expected: String },
}

impl AuthError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::WrongLoginOrPassword => "WRONG_LOGIN_OR_PASSWORD",
            AuthError::InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
            AuthError::MissingToken => "MISSING_TOKEN",
        }
    }
}

impl TokenError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::EncodingError { .. } => "TOKEN_ENCODING_FAILED",
            TokenError::SignatureInvalid => "INVALID_SIGNATURE",
            TokenError::Malformed => "MALFORMED_TOKEN",
            TokenError::Expired => "TOKEN_EXPIRED",
            TokenError::Revoked => "TOKEN_REVOKED",
            TokenError::WrongKind { .. } => "WRONG_TOKEN_KIND",
        }
    }
}
