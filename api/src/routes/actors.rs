//! `/actors` handlers

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use fg_core::domain::entities::actor::ActorDraft;
use fg_shared::MessageResponse;

use crate::app::AppState;
use crate::dto::{ActorRequest, CreatedResponse};
use crate::handlers::error::{handle_domain_error, validation_failed};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_actors))
            .route(web::post().to(create_actor)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_actor))
            .route(web::put().to(update_actor))
            .route(web::delete().to(delete_actor)),
    )
    .service(web::resource("/{id}/films").route(web::get().to(actor_films)));
}

async fn list_actors(state: web::Data<AppState>) -> HttpResponse {
    match state.actor_service.list().await {
        Ok(actors) => HttpResponse::Ok().json(actors),
        Err(error) => handle_domain_error(error),
    }
}

async fn create_actor(
    state: web::Data<AppState>,
    request: web::Json<ActorRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_failed(&errors);
    }

    let draft = ActorDraft::from(request.into_inner());
    match state.actor_service.create(&draft).await {
        Ok(id) => HttpResponse::Created().json(CreatedResponse { id }),
        Err(error) => handle_domain_error(error),
    }
}

async fn get_actor(state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    match state.actor_service.get(path.into_inner()).await {
        Ok(actor) => HttpResponse::Ok().json(actor),
        Err(error) => handle_domain_error(error),
    }
}

async fn update_actor(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<ActorRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_failed(&errors);
    }

    let draft = ActorDraft::from(request.into_inner());
    match state.actor_service.update(path.into_inner(), &draft).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Actor updated")),
        Err(error) => handle_domain_error(error),
    }
}

async fn delete_actor(state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    match state.actor_service.delete(path.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Actor deleted")),
        Err(error) => handle_domain_error(error),
    }
}

async fn actor_films(state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    match state.actor_service.films_of(path.into_inner()).await {
        Ok(films) => HttpResponse::Ok().json(films),
        Err(error) => handle_domain_error(error),
    }
}
