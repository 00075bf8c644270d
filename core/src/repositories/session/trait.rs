//! Session store contract: a TTL-bounded set of revoked tokens.
//!
//! A token present in the store has been logged out (or consumed by a
//! refresh) and must be rejected even though its signature and expiry are
//! still valid. Entries only need to live as long as the token itself, so
//! every marker carries a TTL and the store stays bounded.

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::DomainError;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Records `token` as revoked for `ttl`.
    ///
    /// # Returns
    /// * `Ok(true)` - The marker was newly written
    /// * `Ok(false)` - A live marker already existed; nothing changed
    /// * `Err(DomainError::StoreUnavailable)` - The store could not be reached
    ///
    /// The check-and-set is atomic, so of two concurrent calls for the same
    /// token exactly one observes `true`.
    async fn mark_revoked(&self, token: &str, ttl: Duration) -> Result<bool, DomainError>;

    /// Reports whether a live revocation marker exists for `token`.
    ///
    /// Errors must never be read as "not revoked" by callers.
    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError>;
}
