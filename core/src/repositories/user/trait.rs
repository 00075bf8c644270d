//! User repository trait defining the interface for user data persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::{User, UserUpdate};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Usernames are unique; `create` and `update` return
/// `DomainError::Conflict` when a different user already holds the name.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Looks a user up by login, used by sign-in
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with this username
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    async fn create(&self, user: &User) -> Result<(), DomainError>;

    async fn get_all(&self) -> Result<Vec<User>, DomainError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    async fn update(&self, id: Uuid, update: &UserUpdate) -> Result<(), DomainError>;

    async fn delete_by_id(&self, id: Uuid) -> Result<(), DomainError>;
}
