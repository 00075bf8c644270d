use actix_web::{web, HttpRequest, HttpResponse};

use fg_core::errors::DomainError;
use fg_shared::MessageResponse;

use super::expired_refresh_cookie;
use crate::app::AppState;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

/// Handler for POST /auth/logout
///
/// Runs behind the auth gate. Revokes the refresh cookie when it belongs to
/// the same user, then the presented access token. The cookie is cleared on
/// every outcome, including store failures.
pub async fn logout(
    state: web::Data<AppState>,
    ctx: AuthContext,
    req: HttpRequest,
) -> HttpResponse {
    match revoke_session(&state, &ctx, &req).await {
        Ok(()) => {
            tracing::info!(subject = %ctx.subject, "User logged out");
            HttpResponse::Ok()
                .cookie(expired_refresh_cookie(&state.auth_config))
                .json(MessageResponse::new("Logged out"))
        }
        Err(error) => {
            let mut response = handle_domain_error(error);
            if let Err(e) = response.add_cookie(&expired_refresh_cookie(&state.auth_config)) {
                tracing::error!(error = %e, "Failed to attach cookie removal");
            }
            response
        }
    }
}

async fn revoke_session(
    state: &AppState,
    ctx: &AuthContext,
    req: &HttpRequest,
) -> Result<(), DomainError> {
    if let Some(cookie) = req.cookie(&state.auth_config.cookie.name) {
        state
            .token_service
            .logout_refresh(&ctx.subject, cookie.value())
            .await?;
    }

    state.token_service.logout_token(&ctx.token).await
}
