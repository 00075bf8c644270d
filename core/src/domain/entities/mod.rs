//! Domain entities representing core business objects.

pub mod actor;
pub mod film;
pub mod token;
pub mod user;

pub use actor::{Actor, ActorDraft, Gender};
pub use film::{Film, FilmDraft};
pub use token::{Claims, Credentials, TokenKind, TokenPair};
pub use user::{NewUser, Role, User, UserUpdate};
