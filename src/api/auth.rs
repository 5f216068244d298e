//! Request Gates
//!
//! Header-based API-key and credentials checks applied as route middleware.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::config::Config;
use crate::error::{ApiError, Result};

pub const API_KEY_HEADER: &str = "api-key";
pub const USERNAME_HEADER: &str = "username";
pub const PASSWORD_HEADER: &str = "password";

/// Accepted credentials and the optional API key.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub username: String,
    pub password: String,
    /// When `None` the API-key gate lets every request through
    pub api_key: Option<String>,
}

impl AuthSettings {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            username: config.auth_username.clone(),
            password: config.auth_password.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

/// Identity attached to the request once the credentials gate passes.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

/// Rejects requests whose `api-key` header does not match the configured key.
pub async fn require_api_key(
    State(auth): State<Arc<AuthSettings>>,
    request: Request,
    next: Next,
) -> Result<Response> {
    if let Some(expected) = auth.api_key.as_deref() {
        if header_value(request.headers(), API_KEY_HEADER) != expected {
            warn!("Rejected {} {}: bad api key", request.method(), request.uri().path());
            return Err(ApiError::Forbidden);
        }
    }

    Ok(next.run(request).await)
}

/// Rejects requests whose `username`/`password` headers do not match.
///
/// On success an [`AuthenticatedUser`] is inserted into the request extensions.
pub async fn require_credentials(
    State(auth): State<Arc<AuthSettings>>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let username = header_value(request.headers(), USERNAME_HEADER).to_string();
    let password = header_value(request.headers(), PASSWORD_HEADER);

    if username != auth.username || password != auth.password {
        warn!(
            "Rejected {} {}: invalid credentials",
            request.method(),
            request.uri().path()
        );
        return Err(ApiError::Unauthorized);
    }

    request
        .extensions_mut()
        .insert(AuthenticatedUser { username });
    Ok(next.run(request).await)
}
