//! API Module
//!
//! HTTP handlers, request gates and routing.
//!
//! # Endpoints
//! - `POST /login` - Credentials check and greeting
//! - `GET /get-users` - Cached upstream user list
//! - `GET /get-user_by_id/:id` - Single upstream user
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod auth;
pub mod handlers;
pub mod routes;

pub use auth::{AuthSettings, AuthenticatedUser};
pub use handlers::*;
pub use routes::create_router;
