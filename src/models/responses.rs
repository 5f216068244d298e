//! Response DTOs for the HTTP API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::sync::Arc;

use serde::Serialize;

use crate::cache::CacheSnapshot;
use crate::upstream::User;

/// Response body for GET /get-users
#[derive(Debug, Clone, Serialize)]
pub struct UsersResponse {
    pub users: Arc<Vec<User>>,
}

impl UsersResponse {
    pub fn new(users: Arc<Vec<User>>) -> Self {
        Self { users }
    }
}

/// Response body for GET /get-user_by_id/:id
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub user: User,
}

impl UserResponse {
    pub fn new(user: User) -> Self {
        Self { user }
    }
}

/// Response body for POST /login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Authenticated username
    pub username: String,
    /// Greeting built from the request body
    pub message: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl LoginResponse {
    /// Creates a new LoginResponse stamped with the current time
    pub fn new(username: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            message: message.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub refreshes: u64,
    pub upstream_failures: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Users in the live entry, null when nothing is cached
    pub cached_users: Option<usize>,
    /// Milliseconds until the live entry expires, null when nothing is cached
    pub ttl_remaining_ms: Option<u64>,
}

impl From<CacheSnapshot> for StatsResponse {
    fn from(snapshot: CacheSnapshot) -> Self {
        Self {
            hit_rate: snapshot.stats.hit_rate(),
            hits: snapshot.stats.hits,
            misses: snapshot.stats.misses,
            refreshes: snapshot.stats.refreshes,
            upstream_failures: snapshot.stats.upstream_failures,
            cached_users: snapshot.cached_users,
            ttl_remaining_ms: snapshot.ttl_remaining_ms,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
