//! Authentication route handlers
//!
//! Sign-in returns the access token in the body and the refresh token in an
//! HttpOnly cookie scoped to the auth path. Refresh reads that cookie and
//! rotates it. Logout revokes the bearer token and clears the cookie.

pub mod logout;
pub mod refresh;
pub mod sign_in;

pub use logout::logout;
pub use refresh::refresh;
pub use sign_in::sign_in;

use actix_web::cookie::{time, Cookie, SameSite};

use fg_shared::AuthConfig;

/// Builds the refresh cookie for a newly issued token
pub(crate) fn refresh_cookie(config: &AuthConfig, token: String) -> Cookie<'static> {
    let lifetime = time::Duration::seconds(config.jwt.refresh_token_expiry_seconds());

    Cookie::build(config.cookie.name.clone(), token)
        .path(config.cookie.path.clone())
        .http_only(true)
        .secure(config.cookie.secure)
        .same_site(SameSite::Strict)
        .max_age(lifetime)
        .expires(time::OffsetDateTime::now_utc() + lifetime)
        .finish()
}

/// A cookie that overwrites and immediately expires the refresh cookie
pub(crate) fn expired_refresh_cookie(config: &AuthConfig) -> Cookie<'static> {
    let mut cookie = Cookie::build(config.cookie.name.clone(), "")
        .path(config.cookie.path.clone())
        .http_only(true)
        .secure(config.cookie.secure)
        .same_site(SameSite::Strict)
        .finish();
    cookie.make_removal();
    cookie
}
