//! Integration tests for the Redis session store
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p fg_infra --test redis_integration -- --ignored

use std::sync::Arc;
use std::time::Duration;

use fg_core::errors::{DomainError, TokenError};
use fg_core::repositories::SessionStore;
use fg_core::services::token::{TokenService, TokenServiceConfig};
use fg_infra::cache::{CacheConfig, RedisClient, RedisSessionStore};

fn config() -> CacheConfig {
    let mut config = CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    );
    config.key_prefix = format!("test:revoked:{}:", uuid::Uuid::new_v4());
    config
}

async fn store() -> RedisSessionStore {
    RedisSessionStore::new(RedisClient::new(config()).await.unwrap())
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_mark_and_check() {
    let store = store().await;

    assert!(!store.is_revoked("token-a").await.unwrap());
    assert!(store.mark_revoked("token-a", Duration::from_secs(30)).await.unwrap());
    assert!(!store.mark_revoked("token-a", Duration::from_secs(30)).await.unwrap());
    assert!(store.is_revoked("token-a").await.unwrap());

    let ttl = store.marker_ttl("token-a").await.unwrap().unwrap();
    assert!(ttl <= Duration::from_secs(30));
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_marker_expires() {
    let store = store().await;

    store.mark_revoked("short", Duration::from_millis(300)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(600)).await;

    assert!(!store.is_revoked("short").await.unwrap());
    assert!(store.marker_ttl("short").await.unwrap().is_none());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_concurrent_marks_single_winner() {
    let store = Arc::new(store().await);

    let mut handles = Vec::new();
    for _ in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.mark_revoked("contended", Duration::from_secs(30)).await.unwrap()
        }));
    }

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_logout_seen_by_other_instance() {
    let cache = config();
    let token_config = TokenServiceConfig::default();

    let first = TokenService::new(
        Arc::new(RedisSessionStore::new(RedisClient::new(cache.clone()).await.unwrap())),
        token_config.clone(),
    );
    let second = TokenService::new(
        Arc::new(RedisSessionStore::new(RedisClient::new(cache).await.unwrap())),
        token_config,
    );

    let pair = first.issue_pair("alice").unwrap();
    assert!(second.verify(&pair.access_token).await.is_ok());

    first.logout_token(&pair.access_token).await.unwrap();

    assert_eq!(
        second.verify(&pair.access_token).await.unwrap_err(),
        DomainError::Token(TokenError::Revoked)
    );
    assert!(!second.check_token(&pair.access_token).await);
}
