//! REST API layer

pub mod auth;
pub mod dashboard;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod routes;

pub use auth::{Caller, TokenRegistry};
pub use routes::{register_routes, ApiDoc, API_PREFIX};
