//! PostgreSQL repository implementations.

mod actor_repository_impl;
mod film_repository_impl;
mod user_repository_impl;

pub use actor_repository_impl::PgActorRepository;
pub use film_repository_impl::PgFilmRepository;
pub use user_repository_impl::PgUserRepository;

use std::future::Future;
use std::time::Duration;

use fg_core::errors::DomainError;

const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";

/// Bounds a repository call by `timeout`.
pub(crate) async fn with_timeout<T, F>(timeout: Duration, operation: F) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(result) => result,
        Err(_) => Err(DomainError::Database {
            message: format!("query exceeded {}s deadline", timeout.as_secs()),
        }),
    }
}

/// Maps a SQLx error onto the domain taxonomy.
pub(crate) fn map_db_error(e: sqlx::Error, context: &str) -> DomainError {
    if let Some(db_error) = e.as_database_error() {
        match db_error.code().as_deref() {
            Some(FOREIGN_KEY_VIOLATION) => {
                return DomainError::validation(format!("{}: referenced row does not exist", context))
            }
            Some(UNIQUE_VIOLATION) => {
                return DomainError::Conflict {
                    message: format!("{}: already exists", context),
                }
            }
            _ => {}
        }
    }

    DomainError::Database {
        message: format!("{}: {}", context, e),
    }
}

pub(crate) fn column_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::Database {
        message: format!("Failed to get {}: {}", column, e),
    }
}
