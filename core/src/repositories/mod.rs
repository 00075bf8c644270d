pub mod actor;
pub mod film;
pub mod session;
pub mod user;

#[cfg(any(test, feature = "mock-services"))]
pub mod mock;

pub use actor::ActorRepository;
pub use film::FilmRepository;
pub use session::{InMemorySessionStore, SessionStore};
pub use user::UserRepository;

#[cfg(any(test, feature = "mock-services"))]
pub use mock::{MockCatalogRepository, MockUserRepository};
