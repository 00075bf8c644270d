//! Authentication service module
//!
//! Credential checking and the sign-in flow that hands out token pairs.

mod password;
mod service;

#[cfg(test)]
mod tests;

pub use password::{BcryptHasher, PasswordHasher};
pub use service::AuthService;
