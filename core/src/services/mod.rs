//! Business services.

pub mod auth;
pub mod catalog;
pub mod token;

pub use auth::{AuthService, BcryptHasher, PasswordHasher};
pub use catalog::{ActorService, FilmService, UserService};
pub use token::{TokenCodec, TokenService, TokenServiceConfig, TokenVerifier};
