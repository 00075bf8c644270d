//! Application state and factory
//!
//! This module wires the services into shared state and provides the
//! factory for creating the Actix-web application.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use fg_core::repositories::{ActorRepository, FilmRepository, SessionStore, UserRepository};
use fg_core::services::auth::{AuthService, PasswordHasher};
use fg_core::services::catalog::{ActorService, FilmService, UserService};
use fg_core::services::token::{TokenService, TokenServiceConfig, TokenVerifier};
use fg_shared::{AuthConfig, ErrorResponse};

use crate::middleware::auth::AuthGate;
use crate::routes;

/// Services shared by every worker
pub struct AppState {
    pub auth_service: Arc<AuthService<dyn UserRepository, dyn SessionStore>>,
    pub token_service: Arc<TokenService<dyn SessionStore>>,
    pub film_service: FilmService<dyn FilmRepository>,
    pub actor_service: ActorService<dyn ActorRepository>,
    pub user_service: UserService<dyn UserRepository>,
    pub auth_config: AuthConfig,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        films: Arc<dyn FilmRepository>,
        actors: Arc<dyn ActorRepository>,
        store: Arc<dyn SessionStore>,
        hasher: Arc<dyn PasswordHasher>,
        auth_config: AuthConfig,
    ) -> Self {
        let token_service = Arc::new(TokenService::new(
            store,
            TokenServiceConfig::from(&auth_config.jwt),
        ));

        Self {
            auth_service: Arc::new(AuthService::new(
                users.clone(),
                hasher.clone(),
                token_service.clone(),
            )),
            token_service,
            film_service: FilmService::new(films),
            actor_service: ActorService::new(actors),
            user_service: UserService::new(users, hasher),
            auth_config,
        }
    }

    /// Verification capability for the auth gate
    pub fn verifier(&self) -> Arc<dyn TokenVerifier> {
        self.token_service.clone()
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let gate = AuthGate::new(state.verifier());

    App::new()
        .app_data(state)
        .app_data(web::JsonConfig::default().error_handler(crate::handlers::error::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(crate::handlers::error::path_error_handler))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/auth")
                .route("/sign-in", web::post().to(routes::auth::sign_in))
                .route("/refresh", web::get().to(routes::auth::refresh))
                .service(
                    web::resource("/logout")
                        .wrap(gate.clone())
                        .route(web::post().to(routes::auth::logout)),
                ),
        )
        .service(
            web::scope("/films")
                .wrap(gate.clone())
                .configure(routes::films::configure),
        )
        .service(
            web::scope("/actors")
                .wrap(gate.clone())
                .configure(routes::actors::configure),
        )
        .service(
            web::scope("/users")
                .wrap(gate)
                .configure(routes::users::configure),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "filmography-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "NOT_FOUND",
        "The requested resource was not found",
    ))
}
