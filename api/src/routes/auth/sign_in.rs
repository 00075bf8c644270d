use actix_web::{web, HttpResponse};
use validator::Validate;

use fg_core::domain::entities::token::Credentials;

use super::refresh_cookie;
use crate::app::AppState;
use crate::dto::{AccessTokenResponse, SignInRequest};
use crate::handlers::error::{handle_domain_error, validation_failed};

/// Handler for POST /auth/sign-in
///
/// # Request Body
///
/// ```json
/// { "login": "alice", "password": "secret" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "access_token": "eyJ...", "token_type": "Bearer", "expires_in": 900 }
/// ```
/// The refresh token is set as an HttpOnly `refresh_token` cookie.
///
/// ## Errors
/// - 400 Bad Request: Missing login or password
/// - 403 Forbidden: Unknown login or wrong password
pub async fn sign_in(
    state: web::Data<AppState>,
    request: web::Json<SignInRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_failed(&errors);
    }

    let credentials = Credentials::from(request.into_inner());

    match state.auth_service.sign_in(&credentials).await {
        Ok(pair) => {
            tracing::info!(login = %credentials.login, "User signed in");
            let body = AccessTokenResponse::from(&pair);
            HttpResponse::Ok()
                .cookie(refresh_cookie(&state.auth_config, pair.refresh_token))
                .json(body)
        }
        Err(error) => handle_domain_error(error),
    }
}
