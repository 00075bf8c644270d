//! Token service module for JWT management
//!
//! This module handles the whole token lifecycle:
//! - HS256 signing and parsing of access and refresh tokens
//! - Revocation through the session store on logout and refresh
//! - The verification capability consumed by the HTTP auth gate

mod codec;
mod config;
mod service;
mod verifier;

#[cfg(test)]
mod tests;

pub use codec::TokenCodec;
pub use config::TokenServiceConfig;
pub use service::TokenService;
pub use verifier::TokenVerifier;
