//! Actor repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::actor::{Actor, ActorDraft};
use crate::domain::entities::film::Film;
use crate::errors::DomainError;

#[async_trait]
pub trait ActorRepository: Send + Sync {
    async fn create(&self, id: Uuid, draft: &ActorDraft) -> Result<(), DomainError>;

    async fn get_all(&self) -> Result<Vec<Actor>, DomainError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Actor>, DomainError>;

    async fn update(&self, id: Uuid, draft: &ActorDraft) -> Result<(), DomainError>;

    async fn delete_by_id(&self, id: Uuid) -> Result<(), DomainError>;

    /// Films the actor appears in, joined through the cast links.
    async fn find_films(&self, actor_id: Uuid) -> Result<Vec<Film>, DomainError>;
}
