//! Film entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::actor::Actor;

/// Film entity with its cast resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub rating: f64,
    pub actors: Vec<Actor>,
}

/// Film fields supplied on create and update. The cast is referenced by id.
#[derive(Debug, Clone, PartialEq)]
pub struct FilmDraft {
    pub title: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub rating: f64,
    pub actor_ids: Vec<Uuid>,
}
