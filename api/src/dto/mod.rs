//! Request and response bodies.

pub mod auth;
pub mod catalog;

pub use auth::{AccessTokenResponse, SignInRequest};
pub use catalog::{
    ActorRequest, CreateUserRequest, CreatedResponse, FilmRequest, UpdateUserRequest,
};
