//! Database module - PostgreSQL implementations using SQLx
//!
//! This module provides database access layer implementations including:
//! - Connection pool management and migrations
//! - Repository implementations for films, actors and users

pub mod connection;
pub mod postgres;


// Re-export commonly used types
pub use connection::DatabasePool;
pub use postgres::{PgActorRepository, PgFilmRepository, PgUserRepository};
