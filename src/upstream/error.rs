//! Upstream Error Module
//!
//! Failure taxonomy for calls against the upstream user service.

use std::time::Duration;

use thiserror::Error;

/// Errors produced by a single upstream fetch.
///
/// A missing user is not represented here; `fetch_by_id` reports it as `Ok(None)`.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// The request did not complete before the configured deadline
    #[error("Upstream request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Connection, TLS or body transfer failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Upstream responded with {status}")]
    Status { status: u16 },

    /// Response body was not the expected JSON
    #[error("Failed to parse upstream response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl UpstreamError {
    /// Returns the upstream HTTP status, if this failure carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status } => Some(*status),
            _ => None,
        }
    }

    /// True when the failure was caused by the deadline elapsing.
    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Timeout(_))
    }
}
