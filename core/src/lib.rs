//! # Filmography Core
//!
//! Core business logic and domain layer for the Filmography backend.
//! This crate contains domain entities, the token lifecycle (codec, session
//! store contract, token service), the sign-in flow, catalog services and
//! the repository interfaces the infrastructure layer implements.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
