//! Configuration for the token service

use chrono::Duration;
use fg_shared::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Access token lifetime
    pub access_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_ttl: Duration,
}

impl TokenServiceConfig {
    pub fn new(jwt_secret: impl Into<String>, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            access_ttl,
            refresh_ttl,
        }
    }
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

/// Lifetimes that do not fit a `Duration` become zero, which `issue` rejects.
impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            access_ttl: Duration::try_minutes(config.access_token_expiry_minutes)
                .unwrap_or_else(Duration::zero),
            refresh_ttl: Duration::try_days(config.refresh_token_expiry_days)
                .unwrap_or_else(Duration::zero),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_jwt_config() {
        let config = TokenServiceConfig::from(&JwtConfig::new("secret"));
        assert_eq!(config.access_ttl, Duration::minutes(15));
        assert_eq!(config.refresh_ttl, Duration::days(7));
    }

    #[test]
    fn test_unrepresentable_lifetime_does_not_panic() {
        let jwt = JwtConfig::new("secret").with_refresh_expiry_days(i64::MAX);
        let config = TokenServiceConfig::from(&jwt);
        assert_eq!(config.refresh_ttl, Duration::zero());
    }
}
