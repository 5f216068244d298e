//! Users Proxy - A small HTTP API in front of an upstream user service
//!
//! Serves the upstream user list through a single-slot TTL cache and
//! proxies single-user lookups with a bounded fetch deadline.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod upstream;

pub use api::{create_router, AppState};
pub use cache::UserCache;
pub use config::Config;
pub use upstream::{UpstreamClient, UpstreamError, UserSource};
