//! Unit tests for the sign-in flow

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::domain::entities::token::{Credentials, TokenKind};
use crate::domain::entities::user::{Role, User};
use crate::errors::{AuthError, DomainError};
use crate::repositories::{InMemorySessionStore, MockUserRepository};
use crate::services::auth::{AuthService, BcryptHasher, PasswordHasher};
use crate::services::token::{TokenService, TokenServiceConfig};

async fn setup() -> (AuthService<MockUserRepository, InMemorySessionStore>, User) {
    let hasher = Arc::new(BcryptHasher::new(4));
    let users = Arc::new(MockUserRepository::new());
    let alice = User::new("alice", Role::User, hasher.hash("correct").unwrap());
    users.insert(alice.clone()).await;

    let store = Arc::new(InMemorySessionStore::new());
    let tokens = Arc::new(TokenService::new(store, TokenServiceConfig::default()));

    (AuthService::new(users, hasher, tokens), alice)
}

#[tokio::test]
async fn test_sign_in_success() {
    let (auth, alice) = setup().await;

    let pair = auth.sign_in(&Credentials::new("alice", "correct")).await.unwrap();

    let tokens = auth.token_service();
    let access = tokens.verify(&pair.access_token).await.unwrap();
    let refresh = tokens.verify(&pair.refresh_token).await.unwrap();
    assert_eq!(access.sub, alice.id.to_string());
    assert_eq!(access.kind, TokenKind::Access);
    assert_eq!(refresh.sub, alice.id.to_string());
    assert_eq!(refresh.kind, TokenKind::Refresh);
}

#[tokio::test]
async fn test_sign_in_wrong_password() {
    let (auth, _) = setup().await;

    let result = auth.sign_in(&Credentials::new("alice", "wrong")).await;

    assert_eq!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::WrongLoginOrPassword)
    );
}

#[tokio::test]
async fn test_sign_in_unknown_login_same_error() {
    let (auth, _) = setup().await;

    let result = auth.sign_in(&Credentials::new("mallory", "correct")).await;

    assert_eq!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::WrongLoginOrPassword)
    );
}

#[tokio::test]
async fn test_sign_in_issues_distinct_pairs() {
    let (auth, _) = setup().await;
    let credentials = Credentials::new("alice", "correct");

    let first = auth.sign_in(&credentials).await.unwrap();
    let second = auth.sign_in(&credentials).await.unwrap();

    assert_ne!(first.access_token, second.access_token);
    assert_ne!(first.refresh_token, second.refresh_token);
}

/// Wraps bcrypt and counts how often a password is checked
struct CountingHasher {
    inner: BcryptHasher,
    verifications: AtomicUsize,
}

impl PasswordHasher for CountingHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        self.inner.hash(password)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        self.verifications.fetch_add(1, Ordering::SeqCst);
        self.inner.verify(password, hash)
    }
}

#[tokio::test]
async fn test_unknown_login_still_checks_a_password() {
    let hasher = Arc::new(CountingHasher {
        inner: BcryptHasher::new(4),
        verifications: AtomicUsize::new(0),
    });
    let users = Arc::new(MockUserRepository::new());
    let alice = User::new("alice", Role::User, hasher.hash("correct").unwrap());
    users.insert(alice).await;
    let store = Arc::new(InMemorySessionStore::new());
    let tokens = Arc::new(TokenService::new(store, TokenServiceConfig::default()));
    let auth = AuthService::new(users, hasher.clone(), tokens);

    let unknown = auth.sign_in(&Credentials::new("mallory", "correct")).await;
    assert_eq!(
        unknown.unwrap_err(),
        DomainError::Auth(AuthError::WrongLoginOrPassword)
    );
    assert_eq!(hasher.verifications.load(Ordering::SeqCst), 1);

    let wrong = auth.sign_in(&Credentials::new("alice", "wrong")).await;
    assert!(wrong.is_err());
    assert_eq!(hasher.verifications.load(Ordering::SeqCst), 2);

    let again = auth.sign_in(&Credentials::new("mallory", "other")).await;
    assert!(again.is_err());
    assert_eq!(hasher.verifications.load(Ordering::SeqCst), 3);
}
