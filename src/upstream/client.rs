//! Upstream Client Module
//!
//! Deadline-bounded HTTP access to the upstream user service.

use std::future::Future;
use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::UpstreamError;
use crate::config::Config;

/// A user record as returned by the upstream service, passed through untouched.
pub type User = serde_json::Value;

// == User Source ==
/// Anything that can list users and look one up by id.
///
/// `UserCache` is generic over this so the HTTP client can be swapped for a
/// scripted source in tests.
pub trait UserSource: Send + Sync + 'static {
    /// Fetches the full user list.
    fn fetch_list(&self) -> impl Future<Output = Result<Vec<User>, UpstreamError>> + Send;

    /// Fetches a single user. `Ok(None)` means the upstream has no such user.
    fn fetch_by_id(
        &self,
        id: u64,
    ) -> impl Future<Output = Result<Option<User>, UpstreamError>> + Send;
}

// == Upstream Client ==
/// HTTP client for the upstream user service.
///
/// Every call is a single attempt bounded by `timeout`. When the deadline
/// elapses the in-flight request is dropped and its late result discarded.
/// Clone is cheap; the underlying reqwest client shares its connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl UpstreamClient {
    /// Creates a client for `base_url` with a fresh connection pool.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url, timeout))
    }

    /// Creates a client on top of an existing reqwest client.
    pub fn with_client(client: Client, base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            timeout,
        }
    }

    /// Creates a client from the `USERS_URL` and `FETCH_TIMEOUT_MS` settings.
    pub fn from_config(config: &Config) -> Result<Self, UpstreamError> {
        Self::new(config.users_url.clone(), config.fetch_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    // == Get JSON ==
    /// Issues a GET and decodes the body, all within the deadline.
    ///
    /// Returns `Ok(None)` on 404 so callers can decide whether that is an error.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>, UpstreamError> {
        debug!("GET {}", url);

        match tokio::time::timeout(self.timeout, self.send(url)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    "Upstream GET {} timed out after {}ms",
                    url,
                    self.timeout.as_millis()
                );
                Err(UpstreamError::Timeout(self.timeout))
            }
        }
    }

    async fn send<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>, UpstreamError> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(Some(serde_json::from_slice(&body)?))
    }
}

impl UserSource for UpstreamClient {
    fn fetch_list(&self) -> impl Future<Output = Result<Vec<User>, UpstreamError>> + Send {
        async move {
            self.get_json::<Vec<User>>(&self.base_url)
                .await?
                .ok_or(UpstreamError::Status {
                    status: StatusCode::NOT_FOUND.as_u16(),
                })
        }
    }

    fn fetch_by_id(
        &self,
        id: u64,
    ) -> impl Future<Output = Result<Option<User>, UpstreamError>> + Send {
        async move {
            let url = format!("{}/{}", self.base_url, id);
            self.get_json::<User>(&url).await
        }
    }
}
