//! Error types for the HTTP layer
//!
//! Maps request and upstream failures onto JSON error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;
use crate::upstream::UpstreamError;

/// Message returned for every upstream failure; details stay in the logs.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to fetch users from upstream";

// == Api Error Enum ==
/// Unified error type for request handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Path id is not a positive integer
    #[error("Invalid id")]
    InvalidId,

    /// Upstream has no user with the requested id
    #[error("User not found")]
    UserNotFound,

    /// Credentials headers missing or wrong
    #[error("Unauthorized: Invalid credentials")]
    Unauthorized,

    /// API key header missing or wrong
    #[error("Forbidden: Invalid API Key")]
    Forbidden,

    /// Any failure talking to the upstream service
    #[error("Upstream failure: {0}")]
    Upstream(#[from] UpstreamError),
}

impl ApiError {
    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidId => StatusCode::BAD_REQUEST,
            ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Upstream(err) => {
                error!("Upstream request failed: {}", err);
                UPSTREAM_FAILURE_MESSAGE.to_string()
            }
            other => other.to_string(),
        };

        (self.status_code(), Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
