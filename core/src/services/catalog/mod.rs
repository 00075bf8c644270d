//! Catalog services for films, actors and user accounts.
//!
//! Thin orchestration over the repositories: identifiers are assigned here,
//! missing rows surface as `DomainError::NotFound`.

mod actor;
mod film;
mod user;

pub use actor::ActorService;
pub use film::FilmService;
pub use user::UserService;
