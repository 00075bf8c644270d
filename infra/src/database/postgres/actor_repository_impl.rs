//! PostgreSQL implementation of the ActorRepository trait.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::time::Duration;
use uuid::Uuid;

use fg_core::domain::entities::actor::{Actor, ActorDraft, Gender};
use fg_core::domain::entities::film::Film;
use fg_core::errors::DomainError;
use fg_core::repositories::ActorRepository;

use super::film_repository_impl::films_with_casts;
use super::{column_error, map_db_error, with_timeout};

pub struct PgActorRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl PgActorRepository {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

/// Convert an actor row (columns `id, name, gender, birthday`)
pub(crate) fn row_to_actor(row: &PgRow) -> Result<Actor, DomainError> {
    let gender: String = row.try_get("gender").map_err(|e| column_error("gender", e))?;

    Ok(Actor {
        id: row.try_get("id").map_err(|e| column_error("id", e))?,
        name: row.try_get("name").map_err(|e| column_error("name", e))?,
        gender: gender
            .parse::<Gender>()
            .map_err(|message| DomainError::Database { message })?,
        birthday: row
            .try_get::<NaiveDate, _>("birthday")
            .map_err(|e| column_error("birthday", e))?,
    })
}

#[async_trait]
impl ActorRepository for PgActorRepository {
    async fn create(&self, id: Uuid, draft: &ActorDraft) -> Result<(), DomainError> {
        with_timeout(self.query_timeout, async {
            sqlx::query("INSERT INTO actors (id, name, gender, birthday) VALUES ($1, $2, $3, $4)")
                .bind(id)
                .bind(&draft.name)
                .bind(draft.gender.as_str())
                .bind(draft.birthday)
                .execute(&self.pool)
                .await
                .map_err(|e| map_db_error(e, "actor"))?;
            Ok(())
        })
        .await
    }

    async fn get_all(&self) -> Result<Vec<Actor>, DomainError> {
        with_timeout(self.query_timeout, async {
            let rows = sqlx::query("SELECT id, name, gender, birthday FROM actors ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| map_db_error(e, "actors"))?;

            rows.iter().map(row_to_actor).collect()
        })
        .await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Actor>, DomainError> {
        with_timeout(self.query_timeout, async {
            let row = sqlx::query("SELECT id, name, gender, birthday FROM actors WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| map_db_error(e, "actor"))?;

            row.as_ref().map(row_to_actor).transpose()
        })
        .await
    }

    async fn update(&self, id: Uuid, draft: &ActorDraft) -> Result<(), DomainError> {
        with_timeout(self.query_timeout, async {
            let result =
                sqlx::query("UPDATE actors SET name = $2, gender = $3, birthday = $4 WHERE id = $1")
                    .bind(id)
                    .bind(&draft.name)
                    .bind(draft.gender.as_str())
                    .bind(draft.birthday)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| map_db_error(e, "actor"))?;

            if result.rows_affected() == 0 {
                return Err(DomainError::not_found("actor"));
            }
            Ok(())
        })
        .await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), DomainError> {
        with_timeout(self.query_timeout, async {
            let result = sqlx::query("DELETE FROM actors WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| map_db_error(e, "actor"))?;

            if result.rows_affected() == 0 {
                return Err(DomainError::not_found("actor"));
            }
            Ok(())
        })
        .await
    }

    async fn find_films(&self, actor_id: Uuid) -> Result<Vec<Film>, DomainError> {
        with_timeout(self.query_timeout, async {
            let rows = sqlx::query(
                r#"
                SELECT f.id, f.title, f.description, f.release_date, f.rating
                FROM films f
                JOIN actors_films af ON af.film_id = f.id
                WHERE af.actor_id = $1
                ORDER BY f.title
                "#,
            )
            .bind(actor_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "actor films"))?;

            films_with_casts(&self.pool, rows).await
        })
        .await
    }
}
