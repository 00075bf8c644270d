//! Process-local session store.
//!
//! Used by tests and by single-instance deployments that run without Redis.
//! Expired markers are dropped lazily on access.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::errors::DomainError;

use super::trait_::SessionStore;

#[derive(Default)]
pub struct InMemorySessionStore {
    markers: Mutex<HashMap<String, Instant>>,
    unavailable: AtomicBool,
    writes_failing: AtomicBool,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates an outage: every call fails with `StoreUnavailable` while set.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Makes only `mark_revoked` fail; lookups keep working.
    pub fn set_writes_failing(&self, failing: bool) {
        self.writes_failing.store(failing, Ordering::SeqCst);
    }

    /// Whether a live marker exists, bypassing the outage switch.
    pub async fn contains_marker(&self, token: &str) -> bool {
        let mut markers = self.markers.lock().await;
        Self::live(&mut markers, token, Instant::now())
    }

    /// Number of live markers.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let mut markers = self.markers.lock().await;
        markers.retain(|_, deadline| *deadline > now);
        markers.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable {
                message: "in-memory session store switched off".to_string(),
            });
        }
        Ok(())
    }

    fn live(markers: &mut HashMap<String, Instant>, token: &str, now: Instant) -> bool {
        match markers.get(token) {
            Some(deadline) if *deadline > now => true,
            Some(_) => {
                markers.remove(token);
                false
            }
            None => false,
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn mark_revoked(&self, token: &str, ttl: Duration) -> Result<bool, DomainError> {
        self.check_available()?;
        if self.writes_failing.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable {
                message: "in-memory session store rejects writes".to_string(),
            });
        }

        let now = Instant::now();
        let mut markers = self.markers.lock().await;
        if Self::live(&mut markers, token, now) {
            return Ok(false);
        }
        markers.insert(token.to_string(), now + ttl);
        Ok(true)
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError> {
        self.check_available()?;

        let mut markers = self.markers.lock().await;
        Ok(Self::live(&mut markers, token, Instant::now()))
    }
}
