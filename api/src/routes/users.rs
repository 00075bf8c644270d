//! `/users` handlers
//!
//! Reads are open to any signed-in user. Create, update and delete require
//! the caller to be an admin.

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use fg_core::domain::entities::user::{NewUser, UserUpdate};
use fg_shared::MessageResponse;

use crate::app::AppState;
use crate::dto::{CreateUserRequest, CreatedResponse, UpdateUserRequest};
use crate::handlers::error::{handle_domain_error, validation_failed};
use crate::middleware::auth::AuthContext;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_users))
            .route(web::post().to(create_user)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_user))
            .route(web::put().to(update_user))
            .route(web::delete().to(delete_user)),
    );
}

async fn list_users(state: web::Data<AppState>) -> HttpResponse {
    match state.user_service.list().await {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(error) => handle_domain_error(error),
    }
}

async fn create_user(
    state: web::Data<AppState>,
    ctx: AuthContext,
    request: web::Json<CreateUserRequest>,
) -> HttpResponse {
    if let Err(error) = state.user_service.require_admin(&ctx.subject).await {
        return handle_domain_error(error);
    }
    if let Err(errors) = request.validate() {
        return validation_failed(&errors);
    }

    match state.user_service.create(NewUser::from(request.into_inner())).await {
        Ok(id) => {
            tracing::info!(admin = %ctx.subject, user_id = %id, "User created");
            HttpResponse::Created().json(CreatedResponse { id })
        }
        Err(error) => handle_domain_error(error),
    }
}

async fn get_user(state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    match state.user_service.get(path.into_inner()).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(error) => handle_domain_error(error),
    }
}

async fn update_user(
    state: web::Data<AppState>,
    ctx: AuthContext,
    path: web::Path<Uuid>,
    request: web::Json<UpdateUserRequest>,
) -> HttpResponse {
    if let Err(error) = state.user_service.require_admin(&ctx.subject).await {
        return handle_domain_error(error);
    }
    if let Err(errors) = request.validate() {
        return validation_failed(&errors);
    }

    let update = UserUpdate::from(request.into_inner());
    match state.user_service.update(path.into_inner(), &update).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("User updated")),
        Err(error) => handle_domain_error(error),
    }
}

async fn delete_user(
    state: web::Data<AppState>,
    ctx: AuthContext,
    path: web::Path<Uuid>,
) -> HttpResponse {
    if let Err(error) = state.user_service.require_admin(&ctx.subject).await {
        return handle_domain_error(error);
    }

    let id = path.into_inner();
    match state.user_service.delete(id).await {
        Ok(()) => {
            tracing::info!(admin = %ctx.subject, user_id = %id, "User deleted");
            HttpResponse::Ok().json(MessageResponse::new("User deleted"))
        }
        Err(error) => handle_domain_error(error),
    }
}
