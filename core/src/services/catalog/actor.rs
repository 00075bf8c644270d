use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::actor::{Actor, ActorDraft};
use crate::domain::entities::film::Film;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::ActorRepository;

pub struct ActorService<R: ActorRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: ActorRepository + ?Sized> ActorService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, draft: &ActorDraft) -> DomainResult<Uuid> {
        let id = Uuid::new_v4();
        self.repository.create(id, draft).await?;
        tracing::info!(actor_id = %id, "Actor created");
        Ok(id)
    }

    pub async fn list(&self) -> DomainResult<Vec<Actor>> {
        self.repository.get_all().await
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Actor> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("actor"))
    }

    pub async fn update(&self, id: Uuid, draft: &ActorDraft) -> DomainResult<()> {
        self.repository.update(id, draft).await
    }

    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.repository.delete_by_id(id).await
    }

    /// Films featuring the actor; `NotFound` if the actor does not exist.
    pub async fn films_of(&self, id: Uuid) -> DomainResult<Vec<Film>> {
        self.get(id).await?;
        self.repository.find_films(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::actor::Gender;
    use crate::repositories::MockCatalogRepository;
    use crate::services::catalog::FilmService;
    use chrono::NaiveDate;

    fn draft(name: &str) -> ActorDraft {
        ActorDraft {
            name: name.to_string(),
            gender: Gender::Female,
            birthday: NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_films_of_actor() {
        let repository = Arc::new(MockCatalogRepository::new());
        let actors = ActorService::new(repository.clone());
        let films = FilmService::new(repository);

        let actor_id = actors.create(&draft("Tilda")).await.unwrap();
        let other_id = actors.create(&draft("Frances")).await.unwrap();
        let film_id = films
            .create(&crate::domain::entities::film::FilmDraft {
                title: "Orlando".to_string(),
                description: String::new(),
                release_date: NaiveDate::from_ymd_opt(1992, 9, 1).unwrap(),
                rating: 7.1,
                actor_ids: vec![actor_id],
            })
            .await
            .unwrap();

        let featured = actors.films_of(actor_id).await.unwrap();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].id, film_id);
        assert_eq!(featured[0].actors[0].name, "Tilda");

        assert!(actors.films_of(other_id).await.unwrap().is_empty());
        assert_eq!(
            actors.films_of(Uuid::new_v4()).await.unwrap_err(),
            DomainError::not_found("actor")
        );
    }

    #[tokio::test]
    async fn test_delete_missing_actor() {
        let actors = ActorService::new(Arc::new(MockCatalogRepository::new()));
        assert!(matches!(
            actors.delete(Uuid::new_v4()).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
