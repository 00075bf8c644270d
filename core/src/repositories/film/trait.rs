//! Film repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::film::{Film, FilmDraft};
use crate::errors::DomainError;

/// Persistence operations for films and their cast links.
///
/// Implementations return `DomainError::NotFound` when an update or delete
/// touches no row.
#[async_trait]
pub trait FilmRepository: Send + Sync {
    /// Stores a film under `id` together with its actor links.
    async fn create(&self, id: Uuid, draft: &FilmDraft) -> Result<(), DomainError>;

    /// All films with their casts resolved.
    async fn get_all(&self) -> Result<Vec<Film>, DomainError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Film>, DomainError>;

    /// Replaces film fields and its cast.
    async fn update(&self, id: Uuid, draft: &FilmDraft) -> Result<(), DomainError>;

    async fn delete_by_id(&self, id: Uuid) -> Result<(), DomainError>;
}
