use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use fg_core::domain::entities::actor::{ActorDraft, Gender};
use fg_core::domain::entities::film::FilmDraft;
use fg_core::domain::entities::user::{NewUser, Role, UserUpdate};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FilmRequest {
    #[validate(length(min = 1, max = 150))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,

    pub release_date: NaiveDate,

    #[validate(range(min = 0.0, max = 10.0))]
    pub rating: f64,

    #[serde(default)]
    pub actor_ids: Vec<Uuid>,
}

impl From<FilmRequest> for FilmDraft {
    fn from(request: FilmRequest) -> Self {
        FilmDraft {
            title: request.title,
            description: request.description,
            release_date: request.release_date,
            rating: request.rating,
            actor_ids: request.actor_ids,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ActorRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    pub gender: Gender,

    pub birthday: NaiveDate,
}

impl From<ActorRequest> for ActorDraft {
    fn from(request: ActorRequest) -> Self {
        ActorDraft {
            name: request.name,
            gender: request.gender,
            birthday: request.birthday,
        }
    }
}

#[derive(Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    #[serde(default)]
    pub role: Role,
}

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        NewUser {
            username: request.username,
            password: request.password,
            role: request.role,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    pub role: Role,
}

impl From<UpdateUserRequest> for UserUpdate {
    fn from(request: UpdateUserRequest) -> Self {
        UserUpdate {
            username: request.username,
            role: request.role,
        }
    }
}

/// Identifier of a newly created resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: Uuid,
}
