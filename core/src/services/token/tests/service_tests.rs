//! Unit tests for token service

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};

use crate::domain::entities::token::{Claims, TokenKind};
use crate::errors::{DomainError, TokenError};
use crate::repositories::InMemorySessionStore;
use crate::services::token::{TokenService, TokenServiceConfig, TokenVerifier};

fn service_with(
    access_ttl: Duration,
    refresh_ttl: Duration,
) -> (TokenService<InMemorySessionStore>, Arc<InMemorySessionStore>) {
    let store = Arc::new(InMemorySessionStore::new());
    let config = TokenServiceConfig::new("service-test-secret", access_ttl, refresh_ttl);
    (TokenService::new(store.clone(), config), store)
}

fn service() -> (TokenService<InMemorySessionStore>, Arc<InMemorySessionStore>) {
    service_with(Duration::minutes(15), Duration::days(7))
}

fn token_error(result: Result<impl std::fmt::Debug, DomainError>) -> TokenError {
    match result {
        Err(DomainError::Token(e)) => e,
        other => panic!("expected token error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_issued_pair_verifies() {
    let (service, _) = service();
    let pair = service.issue_pair("alice").unwrap();

    let access = service.verify(&pair.access_token).await.unwrap();
    let refresh = service.verify(&pair.refresh_token).await.unwrap();

    assert_eq!(access.sub, "alice");
    assert_eq!(access.kind, TokenKind::Access);
    assert_eq!(refresh.kind, TokenKind::Refresh);
    assert_eq!(pair.access_expires_in, 15 * 60);
    assert_eq!(pair.refresh_expires_in, 7 * 24 * 3600);
}

#[tokio::test]
async fn test_verify_kind_mismatch() {
    let (service, _) = service();
    let pair = service.issue_pair("alice").unwrap();

    let err = token_error(service.verify_kind(&pair.refresh_token, TokenKind::Access).await);
    assert_eq!(
        err,
        TokenError::WrongKind {
            expected: "access".to_string()
        }
    );

    let err = token_error(service.refresh(&pair.access_token).await);
    assert!(matches!(err, TokenError::WrongKind { .. }));
}

#[tokio::test]
async fn test_logout_then_verify_is_revoked() {
    let (service, _) = service();
    let pair = service.issue_pair("alice").unwrap();

    service.logout_token(&pair.access_token).await.unwrap();

    assert_eq!(token_error(service.verify(&pair.access_token).await), TokenError::Revoked);
    assert!(!service.check_token(&pair.access_token).await);
    // The other half of the pair is untouched
    assert!(service.verify(&pair.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_logout_twice_succeeds() {
    let (service, store) = service();
    let pair = service.issue_pair("alice").unwrap();
    let ttl = StdDuration::from_secs(60);

    service.logout(&pair.access_token, ttl).await.unwrap();
    service.logout(&pair.access_token, ttl).await.unwrap();

    assert_eq!(store.len().await, 1);
    assert_eq!(token_error(service.verify(&pair.access_token).await), TokenError::Revoked);
}

#[tokio::test]
async fn test_logout_zero_ttl_is_noop() {
    let (service, store) = service();
    let pair = service.issue_pair("alice").unwrap();

    service.logout(&pair.access_token, StdDuration::ZERO).await.unwrap();

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_revocation_marker_expires_with_token() {
    let (service, store) = service_with(Duration::seconds(1), Duration::days(1));
    let pair = service.issue_pair("alice").unwrap();
    let claims = service.codec().parse(&pair.access_token).unwrap();

    service.logout(&pair.access_token, claims.remaining_ttl()).await.unwrap();
    assert_eq!(token_error(service.verify(&pair.access_token).await), TokenError::Revoked);
    assert!(store.contains_marker(&pair.access_token).await);

    tokio::time::sleep(StdDuration::from_millis(2100)).await;

    assert!(!store.contains_marker(&pair.access_token).await);
    assert_eq!(token_error(service.verify(&pair.access_token).await), TokenError::Expired);
}

#[tokio::test]
async fn test_access_token_expires() {
    let (service, _) = service_with(Duration::seconds(1), Duration::days(1));
    let pair = service.issue_pair("alice").unwrap();

    tokio::time::sleep(StdDuration::from_secs(2)).await;

    assert_eq!(token_error(service.verify(&pair.access_token).await), TokenError::Expired);
}

#[tokio::test]
async fn test_refresh_issues_new_pair_and_consumes_old() {
    let (service, store) = service();
    let pair = service.issue_pair("alice").unwrap();

    let renewed = service.refresh(&pair.refresh_token).await.unwrap();

    assert_ne!(renewed.refresh_token, pair.refresh_token);
    assert_eq!(service.verify(&renewed.access_token).await.unwrap().sub, "alice");
    assert!(store.contains_marker(&pair.refresh_token).await);

    // Replaying the consumed refresh token fails
    assert_eq!(token_error(service.refresh(&pair.refresh_token).await), TokenError::Revoked);
    // The new one still works
    assert!(service.refresh(&renewed.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_concurrent_refresh_single_winner() {
    let (service, _) = service();
    let service = Arc::new(service);
    let pair = service.issue_pair("alice").unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = service.clone();
        let token = pair.refresh_token.clone();
        handles.push(tokio::spawn(async move { service.refresh(&token).await }));
    }

    let mut ok = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => ok += 1,
            Err(e) => assert_eq!(e, DomainError::Token(TokenError::Revoked)),
        }
    }
    assert_eq!(ok, 1);
}

#[tokio::test]
async fn test_refresh_with_expired_token() {
    let (service, store) = service();
    let mut claims = Claims::new("alice", TokenKind::Refresh, Duration::days(1)).unwrap();
    claims.exp = Utc::now().timestamp() - 10;
    let expired = service.codec().encode(&claims).unwrap();

    assert_eq!(token_error(service.refresh(&expired).await), TokenError::Expired);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_logout_refresh_checks_subject_and_kind() {
    let (service, store) = service();
    let alice = service.issue_pair("alice").unwrap();
    let bob = service.issue_pair("bob").unwrap();

    service.logout_refresh("alice", &bob.refresh_token).await.unwrap();
    service.logout_refresh("alice", &alice.access_token).await.unwrap();
    service.logout_refresh("alice", "garbage").await.unwrap();
    assert!(store.is_empty().await);

    service.logout_refresh("alice", &alice.refresh_token).await.unwrap();
    assert!(store.contains_marker(&alice.refresh_token).await);
}

#[tokio::test]
async fn test_store_outage_fails_closed() {
    let (service, store) = service();
    let pair = service.issue_pair("alice").unwrap();
    store.set_unavailable(true);

    assert!(matches!(
        service.verify(&pair.access_token).await,
        Err(DomainError::StoreUnavailable { .. })
    ));
    assert!(!service.check_token(&pair.access_token).await);
    assert!(matches!(
        service.refresh(&pair.refresh_token).await,
        Err(DomainError::StoreUnavailable { .. })
    ));
    assert!(matches!(
        service.logout_token(&pair.access_token).await,
        Err(DomainError::StoreUnavailable { .. })
    ));
}

#[tokio::test]
async fn test_verifier_capability() {
    let (service, _) = service();
    let pair = service.issue_pair("alice").unwrap();
    let verifier: Arc<dyn TokenVerifier> = Arc::new(service);

    assert_eq!(verifier.verify_access(&pair.access_token).await.unwrap().sub, "alice");
    assert!(verifier.verify_access(&pair.refresh_token).await.is_err());
    assert!(verifier.check_token(&pair.access_token).await);
}
