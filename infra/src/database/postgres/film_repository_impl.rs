//! PostgreSQL implementation of the FilmRepository trait.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;

use fg_core::domain::entities::actor::Actor;
use fg_core::domain::entities::film::{Film, FilmDraft};
use fg_core::errors::DomainError;
use fg_core::repositories::FilmRepository;

use super::actor_repository_impl::row_to_actor;
use super::{column_error, map_db_error, with_timeout};

pub struct PgFilmRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl PgFilmRepository {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    async fn insert_links(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        film_id: Uuid,
        actor_ids: &[Uuid],
    ) -> Result<(), DomainError> {
        for actor_id in actor_ids {
            sqlx::query(
                "INSERT INTO actors_films (actor_id, film_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(actor_id)
            .bind(film_id)
            .execute(&mut **tx)
            .await
            .map_err(|e| map_db_error(e, "actor link"))?;
        }
        Ok(())
    }
}

/// Convert a `films` row without its cast
fn row_to_film(row: &PgRow) -> Result<Film, DomainError> {
    Ok(Film {
        id: row.try_get("id").map_err(|e| column_error("id", e))?,
        title: row.try_get("title").map_err(|e| column_error("title", e))?,
        description: row
            .try_get("description")
            .map_err(|e| column_error("description", e))?,
        release_date: row
            .try_get::<NaiveDate, _>("release_date")
            .map_err(|e| column_error("release_date", e))?,
        rating: row.try_get("rating").map_err(|e| column_error("rating", e))?,
        actors: Vec::new(),
    })
}

/// Converts film rows and fills in each film's cast with one extra query.
pub(crate) async fn films_with_casts(pool: &PgPool, rows: Vec<PgRow>) -> Result<Vec<Film>, DomainError> {
    let mut films = rows.iter().map(row_to_film).collect::<Result<Vec<_>, _>>()?;
    if films.is_empty() {
        return Ok(films);
    }

    let ids: Vec<Uuid> = films.iter().map(|f| f.id).collect();
    let cast_rows = sqlx::query(
        r#"
        SELECT af.film_id, a.id, a.name, a.gender, a.birthday
        FROM actors_films af
        JOIN actors a ON a.id = af.actor_id
        WHERE af.film_id = ANY($1)
        ORDER BY a.name
        "#,
    )
    .bind(&ids)
    .fetch_all(pool)
    .await
    .map_err(|e| map_db_error(e, "film casts"))?;

    let mut casts: HashMap<Uuid, Vec<Actor>> = HashMap::new();
    for row in &cast_rows {
        let film_id: Uuid = row.try_get("film_id").map_err(|e| column_error("film_id", e))?;
        casts.entry(film_id).or_default().push(row_to_actor(row)?);
    }

    for film in &mut films {
        film.actors = casts.remove(&film.id).unwrap_or_default();
    }
    Ok(films)
}

#[async_trait]
impl FilmRepository for PgFilmRepository {
    async fn create(&self, id: Uuid, draft: &FilmDraft) -> Result<(), DomainError> {
        with_timeout(self.query_timeout, async {
            let mut tx = self
                .pool
                .begin()
                .await
                .map_err(|e| map_db_error(e, "begin transaction"))?;

            sqlx::query(
                r#"
                INSERT INTO films (id, title, description, release_date, rating)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(id)
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(draft.release_date)
            .bind(draft.rating)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_db_error(e, "film"))?;

            Self::insert_links(&mut tx, id, &draft.actor_ids).await?;

            tx.commit()
                .await
                .map_err(|e| map_db_error(e, "commit film"))
        })
        .await
    }

    async fn get_all(&self) -> Result<Vec<Film>, DomainError> {
        with_timeout(self.query_timeout, async {
            let rows = sqlx::query("SELECT id, title, description, release_date, rating FROM films ORDER BY title")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| map_db_error(e, "films"))?;

            films_with_casts(&self.pool, rows).await
        })
        .await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Film>, DomainError> {
        with_timeout(self.query_timeout, async {
            let row = sqlx::query("SELECT id, title, description, release_date, rating FROM films WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| map_db_error(e, "film"))?;

            match row {
                Some(row) => Ok(films_with_casts(&self.pool, vec![row]).await?.pop()),
                None => Ok(None),
            }
        })
        .await
    }

    async fn update(&self, id: Uuid, draft: &FilmDraft) -> Result<(), DomainError> {
        with_timeout(self.query_timeout, async {
            let mut tx = self
                .pool
                .begin()
                .await
                .map_err(|e| map_db_error(e, "begin transaction"))?;

            let result = sqlx::query(
                r#"
                UPDATE films
                SET title = $2, description = $3, release_date = $4, rating = $5
                WHERE id = $1
                "#,
            )
            .bind(id)
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(draft.release_date)
            .bind(draft.rating)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_db_error(e, "film"))?;

            if result.rows_affected() == 0 {
                return Err(DomainError::not_found("film"));
            }

            sqlx::query("DELETE FROM actors_films WHERE film_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(|e| map_db_error(e, "actor link"))?;
            Self::insert_links(&mut tx, id, &draft.actor_ids).await?;

            tx.commit()
                .await
                .map_err(|e| map_db_error(e, "commit film"))
        })
        .await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), DomainError> {
        with_timeout(self.query_timeout, async {
            let result = sqlx::query("DELETE FROM films WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| map_db_error(e, "film"))?;

            if result.rows_affected() == 0 {
                return Err(DomainError::not_found("film"));
            }
            Ok(())
        })
        .await
    }
}
