//! API Handlers
//!
//! HTTP request handlers for each endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use tracing::debug;

use super::auth::{AuthSettings, AuthenticatedUser};
use crate::cache::UserCache;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    parse_user_id, HealthResponse, LoginRequest, LoginResponse, StatsResponse, UserResponse,
    UsersResponse,
};
use crate::upstream::{UpstreamClient, UpstreamError, UserSource};

/// Application state shared across all handlers.
///
/// The cache instance is owned here rather than living in a global, so each
/// router (and each test) gets its own.
pub struct AppState<S = UpstreamClient> {
    /// Cached access to the upstream user service
    pub users: Arc<UserCache<S>>,
    /// Gate settings used by the auth middleware
    pub auth: Arc<AuthSettings>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            auth: Arc::clone(&self.auth),
        }
    }
}

impl<S: UserSource> AppState<S> {
    /// Creates a new AppState around an existing cache.
    pub fn new(users: UserCache<S>, auth: AuthSettings) -> Self {
        Self {
            users: Arc::new(users),
            auth: Arc::new(auth),
        }
    }
}

impl AppState<UpstreamClient> {
    /// Creates a new AppState from configuration.
    ///
    /// Builds the upstream client and wraps it in a cache with the configured TTL.
    pub fn from_config(config: &Config) -> std::result::Result<Self, UpstreamError> {
        let client = UpstreamClient::from_config(config)?;
        let users = UserCache::new(client, config.cache_ttl());
        Ok(Self::new(users, AuthSettings::from_config(config)))
    }
}

/// Handler for GET /get-users
pub async fn get_users_handler<S: UserSource>(
    State(state): State<AppState<S>>,
) -> Result<Json<UsersResponse>> {
    let users = state.users.get_users().await?;
    Ok(Json(UsersResponse::new(users)))
}

/// Handler for GET /get-user_by_id/:id
///
/// The id is validated before any upstream call is made.
pub async fn get_user_by_id_handler<S: UserSource>(
    State(state): State<AppState<S>>,
    Path(raw_id): Path<String>,
) -> Result<Json<UserResponse>> {
    let id = parse_user_id(&raw_id).ok_or_else(|| {
        debug!("Rejected user id {:?}", raw_id);
        ApiError::InvalidId
    })?;

    match state.users.get_user_by_id(id).await? {
        Some(user) => Ok(Json(UserResponse::new(user))),
        None => Err(ApiError::UserNotFound),
    }
}

/// Handler for POST /login
///
/// Runs behind the credentials gate; echoes the optional profile body.
pub async fn login_handler(
    Extension(user): Extension<AuthenticatedUser>,
    body: Option<Json<LoginRequest>>,
) -> Json<LoginResponse> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    Json(LoginResponse::new(user.username, req.welcome_message()))
}

/// Handler for GET /stats
pub async fn stats_handler<S: UserSource>(
    State(state): State<AppState<S>>,
) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.users.snapshot().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
