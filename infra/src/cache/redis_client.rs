//! Redis client used by the session store.
//!
//! One multiplexed connection shared by every clone, bounded retries with
//! exponential backoff, and a hard per-operation deadline: an operation
//! finishes within `CacheConfig::operation_timeout_ms` or fails. Callers
//! never wait on a hung connection.
//!
//! Conditional writes are only retried when Redis refused them before
//! running the command. After an IO error or timeout the first attempt may
//! have been applied, and a retry would see its own key.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, ErrorKind, RedisError, RedisResult};
use tokio::time::{sleep, timeout};

use crate::InfrastructureError;

use super::CacheConfig;

const MAX_BACKOFF_MS: u64 = 5000;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Which failures an operation may be repeated after
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Retry {
    /// Reads and idempotent writes
    Transient,
    /// Writes whose outcome depends on prior state
    RejectedOnly,
}

impl Retry {
    pub(crate) fn allows(self, error: &RedisError) -> bool {
        match self {
            Retry::Transient => is_retriable_error(error),
            Retry::RejectedOnly => is_rejected_before_execution(error),
        }
    }
}

#[derive(Clone)]
pub struct RedisClient {
    connection: MultiplexedConnection,
    config: CacheConfig,
}

impl RedisClient {
    /// Opens the multiplexed connection, retrying up to `max_retries` times.
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| InfrastructureError::Config(format!("invalid REDIS_URL: {}", e)))?;

        let attempts = config.max_retries.max(1);
        let mut delay = config.retry_delay_ms;
        let mut attempt = 1;
        let connection = loop {
            match client.get_multiplexed_async_connection().await {
                Ok(connection) => break connection,
                Err(e) if attempt < attempts => {
                    tracing::warn!(
                        url = %mask_url(&config.url),
                        attempt,
                        retry_in_ms = delay,
                        error = %e,
                        "Redis connection failed"
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = next_delay(delay);
                    attempt += 1;
                }
                Err(e) => return Err(InfrastructureError::Cache(e)),
            }
        };

        tracing::info!(url = %mask_url(&config.url), "Redis connection ready");
        Ok(Self { connection, config })
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// `SET key value NX PX ttl`. Returns `true` iff this call created the key.
    pub async fn set_if_absent_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<bool, InfrastructureError> {
        // PX 0 is rejected by Redis
        let millis = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1);
        let key = key.to_string();
        let value = value.to_string();

        let reply: Option<String> = self
            .execute("SET NX", Retry::RejectedOnly, move |mut conn| {
                let (key, value) = (key.clone(), value.clone());
                Box::pin(async move {
                    redis::cmd("SET")
                        .arg(key)
                        .arg(value)
                        .arg("NX")
                        .arg("PX")
                        .arg(millis)
                        .query_async(&mut conn)
                        .await
                })
            })
            .await?;

        Ok(reply.is_some())
    }

    pub async fn exists(&self, key: &str) -> Result<bool, InfrastructureError> {
        let key = key.to_string();
        self.execute("EXISTS", Retry::Transient, move |mut conn| {
            let key = key.clone();
            Box::pin(async move { conn.exists(key).await })
        })
        .await
    }

    /// Milliseconds until `key` expires; `None` when it is absent or persistent.
    pub async fn ttl_millis(&self, key: &str) -> Result<Option<i64>, InfrastructureError> {
        let key = key.to_string();
        let ttl: i64 = self
            .execute("PTTL", Retry::Transient, move |mut conn| {
                let key = key.clone();
                Box::pin(async move { conn.pttl(key).await })
            })
            .await?;

        Ok((ttl >= 0).then_some(ttl))
    }

    #[cfg(test)]
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        let key = key.to_string();
        let removed: u32 = self
            .execute("DEL", Retry::Transient, move |mut conn| {
                let key = key.clone();
                Box::pin(async move { conn.del(key).await })
            })
            .await?;

        Ok(removed > 0)
    }

    pub async fn health_check(&self) -> Result<(), InfrastructureError> {
        let _: String = self
            .execute("PING", Retry::Transient, |mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async(&mut conn).await })
            })
            .await?;
        Ok(())
    }

    /// Runs `operation` with retries, all of it bounded by the operation deadline.
    async fn execute<F, T>(
        &self,
        name: &'static str,
        retry: Retry,
        operation: F,
    ) -> Result<T, InfrastructureError>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let millis = self.config.operation_timeout_ms;

        match timeout(Duration::from_millis(millis), self.execute_with_retry(name, retry, operation)).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::error!(command = name, error = %e, "Redis command failed");
                Err(InfrastructureError::Cache(e))
            }
            Err(_) => {
                tracing::error!(command = name, millis, "Redis command timed out");
                Err(InfrastructureError::Timeout {
                    operation: format!("Redis {}", name),
                    millis,
                })
            }
        }
    }

    async fn execute_with_retry<F, T>(
        &self,
        name: &'static str,
        retry: Retry,
        operation: F,
    ) -> RedisResult<T>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let attempts = self.config.max_retries.max(1);
        let mut delay = self.config.retry_delay_ms;
        let mut attempt = 1;

        loop {
            match operation(self.connection.clone()).await {
                Err(e) if attempt < attempts && retry.allows(&e) => {
                    tracing::warn!(
                        command = name,
                        attempt,
                        retry_in_ms = delay,
                        error = %e,
                        "Retrying Redis command"
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = next_delay(delay);
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}

/// Doubles the backoff, capped at five seconds.
pub(crate) fn next_delay(delay: u64) -> u64 {
    delay.saturating_mul(2).min(MAX_BACKOFF_MS)
}

/// Transient failures worth another attempt.
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    error.is_io_error() || error.is_timeout() || is_rejected_before_execution(error)
}

/// Failures Redis reports without having run the command.
pub(crate) fn is_rejected_before_execution(error: &RedisError) -> bool {
    matches!(error.kind(), ErrorKind::BusyLoadingError | ErrorKind::TryAgain)
}

/// Hides the userinfo part of a Redis URL.
pub(crate) fn mask_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}****{}", &url[..scheme_end + 3], &url[at..])
        }
        _ => url.to_string(),
    }
}
