//! # Infrastructure Layer
//!
//! Concrete implementations of the repository and session-store contracts
//! defined in `fg_core`:
//! - **Database**: PostgreSQL repositories using SQLx
//! - **Cache**: Redis client and the Redis-backed session store

use fg_core::errors::DomainError;

/// Database module - PostgreSQL implementations using SQLx
pub mod database;

/// Cache module - Redis client and revocation markers
pub mod cache;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// An operation did not finish within its deadline
    #[error("{operation} timed out after {millis}ms")]
    Timeout { operation: String, millis: u64 },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Cache(_) | InfrastructureError::Timeout { .. } => {
                DomainError::StoreUnavailable {
                    message: err.to_string(),
                }
            }
            InfrastructureError::Database(_) | InfrastructureError::Migration(_) => {
                DomainError::Database {
                    message: err.to_string(),
                }
            }
            InfrastructureError::Config(message) => DomainError::Internal { message },
        }
    }
}
