//! Authentication configuration

use serde::{Deserialize, Serialize};

use super::env_or;

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// Longest accepted access token lifetime (one day)
pub const MAX_ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 1_440;

/// Longest accepted refresh token lifetime (ten years)
pub const MAX_REFRESH_TOKEN_EXPIRY_DAYS: i64 = 3_650;

/// JWT signing and lifetime configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric secret used to sign and verify every token
    pub secret: String,

    /// Access token lifetime in minutes
    pub access_token_expiry_minutes: i64,

    /// Refresh token lifetime in days
    pub refresh_token_expiry_days: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            access_token_expiry_minutes: 15,
            refresh_token_expiry_days: 7,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry_minutes = minutes;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry_days = days;
        self
    }

    pub fn access_token_expiry_seconds(&self) -> i64 {
        self.access_token_expiry_minutes.saturating_mul(60)
    }

    pub fn refresh_token_expiry_seconds(&self) -> i64 {
        self.refresh_token_expiry_days.saturating_mul(86_400)
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }

    /// Access tokens must be short-lived and strictly shorter than refresh tokens.
    pub fn validate(&self) -> Result<(), String> {
        if self.secret.is_empty() {
            return Err("JWT secret must not be empty".to_string());
        }
        if self.access_token_expiry_minutes <= 0 || self.refresh_token_expiry_days <= 0 {
            return Err("token lifetimes must be positive".to_string());
        }
        if self.access_token_expiry_minutes > MAX_ACCESS_TOKEN_EXPIRY_MINUTES {
            return Err(format!(
                "access token lifetime must not exceed {MAX_ACCESS_TOKEN_EXPIRY_MINUTES} minutes"
            ));
        }
        if self.refresh_token_expiry_days > MAX_REFRESH_TOKEN_EXPIRY_DAYS {
            return Err(format!(
                "refresh token lifetime must not exceed {MAX_REFRESH_TOKEN_EXPIRY_DAYS} days"
            ));
        }
        if self.access_token_expiry_seconds() >= self.refresh_token_expiry_seconds() {
            return Err("access token lifetime must be shorter than refresh token lifetime".to_string());
        }
        Ok(())
    }
}

/// Settings of the cookie that carries the refresh token
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RefreshCookieConfig {
    /// Cookie name
    pub name: String,

    /// Path the cookie is scoped to
    pub path: String,

    /// Only send the cookie over HTTPS
    #[serde(default)]
    pub secure: bool,
}

impl Default for RefreshCookieConfig {
    fn default() -> Self {
        Self {
            name: String::from("refresh_token"),
            path: String::from("/auth"),
            secure: false,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt: JwtConfig,

    #[serde(default)]
    pub cookie: RefreshCookieConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = JwtConfig::default();
        let secret = std::env::var("JWT_SECRET").unwrap_or(defaults.secret);

        Self {
            jwt: JwtConfig {
                secret,
                access_token_expiry_minutes: env_or(
                    "JWT_ACCESS_TOKEN_EXPIRY_MINUTES",
                    defaults.access_token_expiry_minutes,
                ),
                refresh_token_expiry_days: env_or(
                    "JWT_REFRESH_TOKEN_EXPIRY_DAYS",
                    defaults.refresh_token_expiry_days,
                ),
            },
            cookie: RefreshCookieConfig {
                secure: env_or("REFRESH_COOKIE_SECURE", false),
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry_seconds(), 900);
        assert_eq!(config.refresh_token_expiry_seconds(), 604_800);
        assert!(config.is_using_default_secret());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_access_expiry_minutes(30)
            .with_refresh_expiry_days(14);

        assert_eq!(config.access_token_expiry_seconds(), 1800);
        assert_eq!(config.refresh_token_expiry_seconds(), 14 * 86_400);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_access_must_be_shorter_than_refresh() {
        let config = JwtConfig::new("secret")
            .with_access_expiry_minutes(60 * 24 * 2)
            .with_refresh_expiry_days(1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_lifetimes_have_upper_bounds() {
        let huge_refresh = JwtConfig::new("secret").with_refresh_expiry_days(200_000_000);
        assert!(huge_refresh.validate().is_err());
        assert_eq!(huge_refresh.refresh_token_expiry_seconds(), 200_000_000 * 86_400);

        let overflowing = JwtConfig::new("secret").with_refresh_expiry_days(i64::MAX);
        assert_eq!(overflowing.refresh_token_expiry_seconds(), i64::MAX);
        assert!(overflowing.validate().is_err());

        let long_access = JwtConfig::new("secret")
            .with_access_expiry_minutes(MAX_ACCESS_TOKEN_EXPIRY_MINUTES + 1)
            .with_refresh_expiry_days(MAX_REFRESH_TOKEN_EXPIRY_DAYS);
        assert!(long_access.validate().is_err());

        let at_limits = JwtConfig::new("secret")
            .with_access_expiry_minutes(MAX_ACCESS_TOKEN_EXPIRY_MINUTES)
            .with_refresh_expiry_days(MAX_REFRESH_TOKEN_EXPIRY_DAYS);
        assert!(at_limits.validate().is_ok());
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(JwtConfig::new("").validate().is_err());
    }

    #[test]
    fn test_cookie_defaults() {
        let cookie = RefreshCookieConfig::default();
        assert_eq!(cookie.name, "refresh_token");
        assert_eq!(cookie.path, "/auth");
        assert!(!cookie.secure);
    }
}
