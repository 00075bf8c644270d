//! `/films` handlers

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use fg_core::domain::entities::film::FilmDraft;
use fg_shared::MessageResponse;

use crate::app::AppState;
use crate::dto::{CreatedResponse, FilmRequest};
use crate::handlers::error::{handle_domain_error, validation_failed};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_films))
            .route(web::post().to(create_film)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_film))
            .route(web::put().to(update_film))
            .route(web::delete().to(delete_film)),
    );
}

async fn list_films(state: web::Data<AppState>) -> HttpResponse {
    match state.film_service.list().await {
        Ok(films) => HttpResponse::Ok().json(films),
        Err(error) => handle_domain_error(error),
    }
}

async fn create_film(state: web::Data<AppState>, request: web::Json<FilmRequest>) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_failed(&errors);
    }

    let draft = FilmDraft::from(request.into_inner());
    match state.film_service.create(&draft).await {
        Ok(id) => HttpResponse::Created().json(CreatedResponse { id }),
        Err(error) => handle_domain_error(error),
    }
}

async fn get_film(state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    match state.film_service.get(path.into_inner()).await {
        Ok(film) => HttpResponse::Ok().json(film),
        Err(error) => handle_domain_error(error),
    }
}

async fn update_film(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<FilmRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_failed(&errors);
    }

    let draft = FilmDraft::from(request.into_inner());
    match state.film_service.update(path.into_inner(), &draft).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Film updated")),
        Err(error) => handle_domain_error(error),
    }
}

async fn delete_film(state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    match state.film_service.delete(path.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Film deleted")),
        Err(error) => handle_domain_error(error),
    }
}
