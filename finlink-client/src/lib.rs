//! Finlink HTTP Client
//!
//! A simple, type-safe HTTP client for a financial-data aggregation API.
//!
//! This crate covers the connection lifecycle (create, fetch, update, delete,
//! refresh) and the asynchronous jobs those operations spawn, including a
//! bounded poller that waits for credential verification to settle.
//!
//! # Example
//!
//! ```no_run
//! use finlink_client::AggregatorClient;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = AggregatorClient::new("https://au-api.example.com", "access-token");
//!
//!     // Connect a user to an institution; the API answers with a job.
//!     let job = client
//!         .create_connection("user-1", "AU00000", "gavinBelson", "hooli2016", None)
//!         .await?;
//!
//!     // Poll until the credentials step settles, at most 60 seconds.
//!     let ok = client
//!         .wait_for_credentials(&job, Duration::from_secs(60), Duration::from_secs(2))
//!         .await?;
//!
//!     println!("credentials valid: {}", ok);
//!     Ok(())
//! }
//! ```

mod connections;
pub mod error;
mod jobs;
mod wait;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use finlink_core::domain::connection::{Connection, ConnectionStatus, Institution};
pub use finlink_core::domain::job::{Job, JobStep, StepKind, StepStatus};
pub use wait::{JobSource, wait_for_credentials};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the aggregation API
///
/// This client provides methods for the connection-centric API endpoints,
/// organized into logical groups:
/// - Connection lifecycle (create, get, update, delete, refresh)
/// - Job retrieval and step inspection
/// - Bounded waits on credential verification
#[derive(Debug, Clone)]
pub struct AggregatorClient {
    /// Base URL of the API (e.g., "https://au-api.example.com")
    base_url: String,
    /// Pre-issued access token, attached to every request as a bearer token.
    /// Obtaining and renewing it is the caller's concern.
    access_token: String,
    /// HTTP client instance
    client: Client,
}

impl AggregatorClient {
    /// Create a new API client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the aggregation API
    /// * `access_token` - A valid access token for the API
    ///
    /// # Example
    /// ```
    /// use finlink_client::AggregatorClient;
    ///
    /// let client = AggregatorClient::new("https://au-api.example.com", "token");
    /// ```
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self::with_client(base_url, access_token, Client::new())
    }

    /// Create a new API client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use finlink_client::AggregatorClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = AggregatorClient::with_client("https://au-api.example.com", "token", http_client);
    /// ```
    pub fn with_client(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            client,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Request Building & Response Handling
    // =============================================================================

    /// Build a request for the given method and API path, with auth attached.
    pub(crate) fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        self.client
            .request(method, url)
            .bearer_auth(&self.access_token)
    }

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    pub(crate) async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content (e.g., DELETE operations)
    ///
    /// This method checks the status code and returns an error if the request failed.
    pub(crate) async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = AggregatorClient::new("https://au-api.example.com", "token");
        assert_eq!(client.base_url(), "https://au-api.example.com");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = AggregatorClient::new("https://au-api.example.com/", "token");
        assert_eq!(client.base_url(), "https://au-api.example.com");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client =
            AggregatorClient::with_client("https://au-api.example.com", "token", http_client);
        assert_eq!(client.base_url(), "https://au-api.example.com");
    }
}
