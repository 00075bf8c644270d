//! Shared configuration and common types for the Filmography server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The JSON error/message envelopes returned by the API

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, DatabaseConfig, Environment, JwtConfig, LogFormat,
    LoggingConfig, RefreshCookieConfig, ServerConfig,
};
pub use types::{ErrorResponse, MessageResponse};
