//! Domain error to HTTP response mapping.

use actix_web::{
    error::{InternalError, JsonPayloadError, PathError},
    http::StatusCode,
    Error, HttpRequest, HttpResponse,
};

use validator::ValidationErrors;

use fg_core::errors::{AuthError, DomainError, TokenError};
use fg_shared::ErrorResponse;

/// HTTP status for a domain error outside the auth gate
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Conflict { .. } => StatusCode::CONFLICT,
        DomainError::Auth(AuthError::MissingToken) => StatusCode::UNAUTHORIZED,
        DomainError::Auth(AuthError::WrongLoginOrPassword)
        | DomainError::Auth(AuthError::InsufficientPermissions) => StatusCode::FORBIDDEN,
        DomainError::Token(TokenError::Expired) => StatusCode::UNAUTHORIZED,
        DomainError::Token(TokenError::EncodingError { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Token(_) => StatusCode::FORBIDDEN,
        DomainError::Database { .. }
        | DomainError::StoreUnavailable { .. }
        | DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let status = status_for(&error);
    respond(status, &error)
}

/// Response for a request the auth gate refuses.
///
/// Only a missing header and an expired token are 401; every other failure,
/// including an unreachable session store, is 403.
pub fn gate_rejection(error: &DomainError) -> HttpResponse {
    let status = match error {
        DomainError::Auth(AuthError::MissingToken) | DomainError::Token(TokenError::Expired) => {
            StatusCode::UNAUTHORIZED
        }
        _ => StatusCode::FORBIDDEN,
    };
    respond(status, error)
}

fn respond(status: StatusCode, error: &DomainError) -> HttpResponse {
    // Internal details stay in the logs
    let message = if status.is_server_error() {
        tracing::error!(error = %error, "Request failed");
        "An internal error occurred".to_string()
    } else {
        tracing::debug!(error = %error, status = status.as_u16(), "Request rejected");
        error.to_string()
    };

    HttpResponse::build(status).json(ErrorResponse::new(error.code(), message))
}

/// Response for a request body that failed field validation
pub fn validation_failed(errors: &ValidationErrors) -> HttpResponse {
    handle_domain_error(DomainError::validation(errors.to_string()))
}

/// Renders malformed JSON bodies in the standard error envelope
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let response = HttpResponse::BadRequest()
        .json(ErrorResponse::new("INVALID_REQUEST_BODY", err.to_string()));
    InternalError::from_response(err, response).into()
}

/// Renders unparseable path parameters (such as a bad UUID) as 400
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> Error {
    let response =
        HttpResponse::BadRequest().json(ErrorResponse::new("INVALID_PATH", err.to_string()));
    InternalError::from_response(err, response).into()
}
