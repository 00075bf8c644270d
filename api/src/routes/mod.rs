//! HTTP route handlers, one module per resource.

pub mod actors;
pub mod auth;
pub mod films;
pub mod users;
