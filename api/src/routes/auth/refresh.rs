use actix_web::{web, HttpRequest, HttpResponse};

use fg_core::errors::{DomainError, TokenError};

use super::refresh_cookie;
use crate::app::AppState;
use crate::dto::AccessTokenResponse;
use crate::handlers::error::handle_domain_error;

/// Handler for GET /auth/refresh
///
/// Exchanges the refresh cookie for a new token pair. The consumed refresh
/// token is revoked, so presenting it again fails with 403.
///
/// ## Errors
/// - 401 Unauthorized: Refresh token expired
/// - 403 Forbidden: Cookie missing, token invalid, wrong kind or already used
pub async fn refresh(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let token = match req.cookie(&state.auth_config.cookie.name) {
        Some(cookie) if !cookie.value().is_empty() => cookie.value().to_string(),
        _ => return handle_domain_error(DomainError::Token(TokenError::Malformed)),
    };

    match state.token_service.refresh(&token).await {
        Ok(pair) => {
            let body = AccessTokenResponse::from(&pair);
            HttpResponse::Ok()
                .cookie(refresh_cookie(&state.auth_config, pair.refresh_token))
                .json(body)
        }
        Err(error) => handle_domain_error(error),
    }
}
