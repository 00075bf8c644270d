//! Shared fixtures for the HTTP integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{dev::ServiceResponse, http::header, web};

use fg_api::AppState;
use fg_core::domain::entities::user::{Role, User};
use fg_core::repositories::{InMemorySessionStore, MockCatalogRepository, MockUserRepository};
use fg_core::services::auth::{BcryptHasher, PasswordHasher};
use fg_shared::{AuthConfig, JwtConfig, RefreshCookieConfig};

pub const SECRET: &str = "integration-test-secret";
pub const PASSWORD: &str = "correct-horse";

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub store: Arc<InMemorySessionStore>,
    pub users: Arc<MockUserRepository>,
    pub admin: User,
    pub member: User,
}

impl TestContext {
    /// Seeds an admin ("root") and a regular user ("alice"), both with [`PASSWORD`].
    pub async fn new() -> Self {
        let hasher = Arc::new(BcryptHasher::new(4));
        let hash = hasher.hash(PASSWORD).unwrap();

        let users = Arc::new(MockUserRepository::new());
        let admin = User::new("root", Role::Admin, hash.clone());
        let member = User::new("alice", Role::User, hash);
        users.insert(admin.clone()).await;
        users.insert(member.clone()).await;

        let catalog = Arc::new(MockCatalogRepository::new());
        let store = Arc::new(InMemorySessionStore::new());

        let auth_config = AuthConfig {
            jwt: JwtConfig::new(SECRET)
                .with_access_expiry_minutes(15)
                .with_refresh_expiry_days(7),
            cookie: RefreshCookieConfig::default(),
        };

        let state = web::Data::new(AppState::new(
            users.clone(),
            catalog.clone(),
            catalog,
            store.clone(),
            hasher,
            auth_config,
        ));

        Self {
            state,
            store,
            users,
            admin,
            member,
        }
    }

    /// Access token for `user`, minted directly by the token service
    pub fn access_token_for(&self, user: &User) -> String {
        self.state
            .token_service
            .issue_pair(&user.id.to_string())
            .unwrap()
            .access_token
    }
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Value of the `refresh_token` cookie set by a response
pub fn refresh_cookie_of<B>(resp: &ServiceResponse<B>) -> Option<String> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "refresh_token")
        .map(|c| c.value().to_string())
}
