use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::film::{Film, FilmDraft};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::FilmRepository;

pub struct FilmService<R: FilmRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: FilmRepository + ?Sized> FilmService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, draft: &FilmDraft) -> DomainResult<Uuid> {
        let id = Uuid::new_v4();
        self.repository.create(id, draft).await?;
        tracing::info!(film_id = %id, title = %draft.title, "Film created");
        Ok(id)
    }

    pub async fn list(&self) -> DomainResult<Vec<Film>> {
        self.repository.get_all().await
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Film> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("film"))
    }

    pub async fn update(&self, id: Uuid, draft: &FilmDraft) -> DomainResult<()> {
        self.repository.update(id, draft).await
    }

    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.repository.delete_by_id(id).await?;
        tracing::info!(film_id = %id, "Film deleted");
        Ok(())
    }
}
