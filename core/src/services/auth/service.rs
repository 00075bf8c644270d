//! Main authentication service implementation

use std::sync::{Arc, OnceLock};

use crate::domain::entities::token::{Credentials, TokenPair};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{SessionStore, UserRepository};
use crate::services::token::TokenService;

use super::password::PasswordHasher;

/// Authentication service: checks credentials and issues token pairs
pub struct AuthService<U, S>
where
    U: UserRepository + ?Sized,
    S: SessionStore + ?Sized,
{
    /// User repository for credential lookup
    user_repository: Arc<U>,
    /// Password hasher, run on the blocking pool
    hasher: Arc<dyn PasswordHasher>,
    /// Token service for JWT management
    token_service: Arc<TokenService<S>>,
    /// Hash checked for unknown logins so both failures cost one verify
    dummy_hash: Arc<OnceLock<String>>,
}

const DUMMY_PASSWORD: &str = "unknown-login-placeholder";

impl<U, S> AuthService<U, S>
where
    U: UserRepository + ?Sized,
    S: SessionStore + ?Sized,
{
    pub fn new(
        user_repository: Arc<U>,
        hasher: Arc<dyn PasswordHasher>,
        token_service: Arc<TokenService<S>>,
    ) -> Self {
        Self {
            user_repository,
            hasher,
            token_service,
            dummy_hash: Arc::new(OnceLock::new()),
        }
    }

    pub fn token_service(&self) -> &Arc<TokenService<S>> {
        &self.token_service
    }

    /// Checks credentials and issues a fresh token pair whose subject is the
    /// user id.
    ///
    /// Unknown login and wrong password both fail with
    /// `AuthError::WrongLoginOrPassword`.
    pub async fn sign_in(&self, credentials: &Credentials) -> DomainResult<TokenPair> {
        let user = self.authenticate(credentials).await?;
        let pair = self.token_service.issue_pair(&user.id.to_string())?;

        tracing::info!(user_id = %user.id, username = %user.username, "User signed in");
        Ok(pair)
    }

    async fn authenticate(&self, credentials: &Credentials) -> DomainResult<User> {
        let user = match self
            .user_repository
            .find_by_username(&credentials.login)
            .await?
        {
            Some(user) => user,
            None => {
                tracing::debug!(login = %credentials.login, "Sign-in for unknown login");
                if let Err(e) = self.verify_against_dummy(&credentials.password).await {
                    tracing::warn!(error = %e, "Dummy password check failed");
                }
                return Err(AuthError::WrongLoginOrPassword.into());
            }
        };

        let matches = self
            .verify_blocking(credentials.password.clone(), user.password_hash.clone())
            .await?;

        if !matches {
            tracing::debug!(user_id = %user.id, "Sign-in with wrong password");
            return Err(AuthError::WrongLoginOrPassword.into());
        }

        Ok(user)
    }

    async fn verify_against_dummy(&self, password: &str) -> DomainResult<bool> {
        let hash = match self.dummy_hash.get() {
            Some(hash) => hash.clone(),
            None => {
                let hasher = self.hasher.clone();
                let hash = run_blocking(move || hasher.hash(DUMMY_PASSWORD)).await?;
                self.dummy_hash.get_or_init(|| hash).clone()
            }
        };
        self.verify_blocking(password.to_string(), hash).await
    }

    async fn verify_blocking(&self, password: String, hash: String) -> DomainResult<bool> {
        let hasher = self.hasher.clone();
        run_blocking(move || hasher.verify(&password, &hash)).await
    }
}

async fn run_blocking<T, F>(f: F) -> DomainResult<T>
where
    F: FnOnce() -> DomainResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("password check aborted: {}", e),
        })?
}
