//! In-memory repositories for tests and local wiring.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::actor::{Actor, ActorDraft};
use crate::domain::entities::film::{Film, FilmDraft};
use crate::domain::entities::user::{User, UserUpdate};
use crate::errors::DomainError;

use super::actor::ActorRepository;
use super::film::FilmRepository;
use super::user::UserRepository;

#[derive(Debug, Clone)]
struct FilmRow {
    id: Uuid,
    title: String,
    description: String,
    release_date: chrono::NaiveDate,
    rating: f64,
}

#[derive(Default)]
struct CatalogTables {
    films: HashMap<Uuid, FilmRow>,
    actors: HashMap<Uuid, Actor>,
    /// (film_id, actor_id)
    links: Vec<(Uuid, Uuid)>,
}

impl CatalogTables {
    fn resolve(&self, row: &FilmRow) -> Film {
        let actors = self
            .links
            .iter()
            .filter(|(film_id, _)| *film_id == row.id)
            .filter_map(|(_, actor_id)| self.actors.get(actor_id).cloned())
            .collect();

        Film {
            id: row.id,
            title: row.title.clone(),
            description: row.description.clone(),
            release_date: row.release_date,
            rating: row.rating,
            actors,
        }
    }

    fn check_actors(&self, actor_ids: &[Uuid]) -> Result<(), DomainError> {
        match actor_ids.iter().find(|id| !self.actors.contains_key(id)) {
            Some(missing) => Err(DomainError::validation(format!("unknown actor {}", missing))),
            None => Ok(()),
        }
    }

    fn link(&mut self, film_id: Uuid, actor_ids: &[Uuid]) {
        self.links.retain(|(f, _)| *f != film_id);
        for actor_id in actor_ids {
            if !self.links.contains(&(film_id, *actor_id)) {
                self.links.push((film_id, *actor_id));
            }
        }
    }
}

/// Films, actors and the links between them in one shared table set
#[derive(Clone, Default)]
pub struct MockCatalogRepository {
    tables: Arc<RwLock<CatalogTables>>,
}

impl MockCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn film_row(id: Uuid, draft: &FilmDraft) -> FilmRow {
    FilmRow {
        id,
        title: draft.title.clone(),
        description: draft.description.clone(),
        release_date: draft.release_date,
        rating: draft.rating,
    }
}

#[async_trait]
impl FilmRepository for MockCatalogRepository {
    async fn create(&self, id: Uuid, draft: &FilmDraft) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        tables.check_actors(&draft.actor_ids)?;
        tables.films.insert(id, film_row(id, draft));
        tables.link(id, &draft.actor_ids);
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Film>, DomainError> {
        let tables = self.tables.read().await;
        let mut films: Vec<Film> = tables.films.values().map(|row| tables.resolve(row)).collect();
        films.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(films)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Film>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.films.get(&id).map(|row| tables.resolve(row)))
    }

    async fn update(&self, id: Uuid, draft: &FilmDraft) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.films.contains_key(&id) {
            return Err(DomainError::not_found("film"));
        }
        tables.check_actors(&draft.actor_ids)?;
        tables.films.insert(id, film_row(id, draft));
        tables.link(id, &draft.actor_ids);
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if tables.films.remove(&id).is_none() {
            return Err(DomainError::not_found("film"));
        }
        tables.links.retain(|(film_id, _)| *film_id != id);
        Ok(())
    }
}

#[async_trait]
impl ActorRepository for MockCatalogRepository {
    async fn create(&self, id: Uuid, draft: &ActorDraft) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        tables.actors.insert(id, draft.clone().into_actor(id));
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Actor>, DomainError> {
        let tables = self.tables.read().await;
        let mut actors: Vec<Actor> = tables.actors.values().cloned().collect();
        actors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(actors)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Actor>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.actors.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, draft: &ActorDraft) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        match tables.actors.get_mut(&id) {
            Some(actor) => {
                *actor = draft.clone().into_actor(id);
                Ok(())
            }
            None => Err(DomainError::not_found("actor")),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if tables.actors.remove(&id).is_none() {
            return Err(DomainError::not_found("actor"));
        }
        tables.links.retain(|(_, actor_id)| *actor_id != id);
        Ok(())
    }

    async fn find_films(&self, actor_id: Uuid) -> Result<Vec<Film>, DomainError> {
        let tables = self.tables.read().await;
        let mut films: Vec<Film> = tables
            .links
            .iter()
            .filter(|(_, a)| *a == actor_id)
            .filter_map(|(film_id, _)| tables.films.get(film_id))
            .map(|row| tables.resolve(row))
            .collect();
        films.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(films)
    }
}

/// Mock user repository for testing
#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a user directly, bypassing uniqueness checks.
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn create(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == user.username) {
            return Err(DomainError::Conflict {
                message: format!("username {} is taken", user.username),
            });
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(all)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, update: &UserUpdate) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.id != id && u.username == update.username)
        {
            return Err(DomainError::Conflict {
                message: format!("username {} is taken", update.username),
            });
        }
        match users.get_mut(&id) {
            Some(user) => {
                user.username = update.username.clone();
                user.role = update.role;
                Ok(())
            }
            None => Err(DomainError::not_found("user")),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        match users.remove(&id) {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("user")),
        }
    }
}
