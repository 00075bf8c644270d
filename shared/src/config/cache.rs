//! Session store (Redis) configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Redis connection and resilience configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Deadline for a single store call, in milliseconds
    #[serde(default = "default_operation_timeout_ms")]
    pub operation_timeout_ms: u64,

    /// Attempts per store call before giving up (at least 1)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between retries, doubled after each attempt
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Prefix prepended to every revocation key
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            operation_timeout_ms: default_operation_timeout_ms(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            key_prefix: default_key_prefix(),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: std::env::var("REDIS_URL").unwrap_or(defaults.url),
            operation_timeout_ms: env_or("REDIS_OPERATION_TIMEOUT_MS", defaults.operation_timeout_ms),
            max_retries: env_or("REDIS_MAX_RETRIES", defaults.max_retries),
            retry_delay_ms: env_or("REDIS_RETRY_DELAY_MS", defaults.retry_delay_ms),
            key_prefix: defaults.key_prefix,
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

fn default_operation_timeout_ms() -> u64 {
    2000
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    50
}

fn default_key_prefix() -> String {
    String::from("revoked:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_key() {
        let config = CacheConfig::default();
        assert_eq!(config.make_key("abc"), "revoked:abc");
    }

    #[test]
    fn test_defaults() {
        let config = CacheConfig::new("redis://cache:6379");
        assert_eq!(config.url, "redis://cache:6379");
        assert_eq!(config.operation_timeout_ms, 2000);
        assert_eq!(config.max_retries, 3);
    }
}
