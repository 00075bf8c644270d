use serde::{Deserialize, Serialize};
use validator::Validate;

use fg_core::domain::entities::token::{Credentials, TokenPair};

#[derive(Clone, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(length(min = 1, max = 50))]
    pub login: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

impl From<SignInRequest> for Credentials {
    fn from(request: SignInRequest) -> Self {
        Credentials::new(request.login, request.password)
    }
}

/// Body returned by sign-in and refresh. The refresh token travels in a cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl From<&TokenPair> for AccessTokenResponse {
    fn from(pair: &TokenPair) -> Self {
        Self {
            access_token: pair.access_token.clone(),
            token_type: "Bearer".to_string(),
            expires_in: pair.access_expires_in,
        }
    }
}
