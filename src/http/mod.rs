use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::models::AppError;

/// Trait for HTTP client operations to enable testing with mocks.
///
/// This trait abstracts HTTP operations to allow dependency injection
/// for testing purposes, preventing tests from making real network calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send a GET request and return the JSON response as Value.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the status is not a success
    /// status, or the body is not JSON.
    async fn get_json_value(&self, url: &str) -> Result<serde_json::Value, AppError>;
}

/// Production HTTP client implementation using reqwest.
///
/// This client wraps `reqwest::Client` to implement the `HttpClient` trait
/// for production use.
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn with_timeout(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get_json_value(&self, url: &str) -> Result<serde_json::Value, AppError> {
        let response = self.client.get(url).send().await?;
        debug!(status = %response.status(), "Received HTTP response");
        let json = response.error_for_status()?.json().await?;
        Ok(json)
    }
}
