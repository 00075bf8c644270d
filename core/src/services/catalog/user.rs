use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::user::{NewUser, User, UserUpdate};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::auth::PasswordHasher;

/// Account management
pub struct UserService<R: UserRepository + ?Sized> {
    repository: Arc<R>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<R: UserRepository + ?Sized> UserService<R> {
    pub fn new(repository: Arc<R>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    /// Creates an account, storing only the password hash.
    pub async fn create(&self, new_user: NewUser) -> DomainResult<Uuid> {
        let hasher = self.hasher.clone();
        let password = new_user.password;
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("password hashing aborted: {}", e),
            })??;

        let user = User::new(new_user.username, new_user.role, hash);
        self.repository.create(&user).await?;
        tracing::info!(user_id = %user.id, role = %user.role, "User created");
        Ok(user.id)
    }

    pub async fn list(&self) -> DomainResult<Vec<User>> {
        self.repository.get_all().await
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("user"))
    }

    pub async fn update(&self, id: Uuid, update: &UserUpdate) -> DomainResult<()> {
        self.repository.update(id, update).await
    }

    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.repository.delete_by_id(id).await
    }

    /// Resolves a token subject to an admin account.
    ///
    /// Fails with `InsufficientPermissions` for non-admins and for subjects
    /// that no longer resolve to a user.
    pub async fn require_admin(&self, subject: &str) -> DomainResult<User> {
        let id = Uuid::parse_str(subject).map_err(|_| AuthError::InsufficientPermissions)?;
        match self.repository.get_by_id(id).await? {
            Some(user) if user.is_admin() => Ok(user),
            _ => Err(AuthError::InsufficientPermissions.into()),
        }
    }
}
