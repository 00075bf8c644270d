//! Redis-backed session store.
//!
//! Each revoked token becomes a key `<prefix><sha256(token)>` that Redis
//! expires on its own when the token would have. Raw tokens are never
//! written to Redis.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::time::Duration;

use fg_core::errors::DomainError;
use fg_core::repositories::SessionStore;

use super::RedisClient;

pub struct RedisSessionStore {
    client: RedisClient,
}

impl RedisSessionStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Revocation key for `token`
    pub fn key_for(&self, token: &str) -> String {
        self.client.config().make_key(&hash_token(token))
    }

    /// Remaining marker lifetime, for diagnostics and tests
    pub async fn marker_ttl(&self, token: &str) -> Result<Option<Duration>, DomainError> {
        let ttl = self.client.ttl_millis(&self.key_for(token)).await?;
        Ok(ttl.map(|ms| Duration::from_millis(ms.unsigned_abs())))
    }
}

pub(crate) fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn mark_revoked(&self, token: &str, ttl: Duration) -> Result<bool, DomainError> {
        let inserted = self
            .client
            .set_if_absent_with_expiry(&self.key_for(token), "1", ttl)
            .await?;
        Ok(inserted)
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError> {
        Ok(self.client.exists(&self.key_for(token)).await?)
    }
}
