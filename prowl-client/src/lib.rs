//! Prowl HTTP Client
//!
//! A small HTTP client for the administrative API of the indexer-aggregation
//! service being configured.
//!
//! Every request carries the API key in the `X-Api-Key` header. The client
//! does not decide whether a non-2xx answer is fatal: [`Transport::send`]
//! hands back the raw status and body so the caller can apply its own
//! policy.
//!
//! # Example
//!
//! ```no_run
//! use prowl_client::{TargetClient, Transport};
//! use prowl_core::domain::call::{ApiRequest, CallSite};
//! use prowl_core::domain::credential::ApiKey;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TargetClient::new("http://localhost:9696/api/v1", ApiKey::new("secret"));
//!
//!     let response = client.send(&ApiRequest::empty(CallSite::Health)).await?;
//!     println!("health: {}", response.status);
//!     Ok(())
//! }
//! ```

pub mod error;
mod health;

pub use error::{ClientError, Result};

use async_trait::async_trait;
use prowl_core::domain::call::{ApiRequest, ApiResponse, HttpMethod};
use prowl_core::domain::credential::ApiKey;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Sends a single request and returns whatever the server answered
///
/// Only failures to get an answer at all (connection refused, timeout,
/// malformed response) are errors; a 4xx/5xx is a normal [`ApiResponse`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

/// HTTP client for the target API
#[derive(Debug, Clone)]
pub struct TargetClient {
    /// Base URL of the API (e.g., "http://localhost:9696/api/v1")
    base_url: String,
    /// Key sent with every request
    api_key: ApiKey,
    /// HTTP client instance
    client: Client,
}

impl TargetClient {
    /// Create a new client with default reqwest settings
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the API, trailing slash optional
    /// * `api_key` - Credential used for every request
    pub fn new(base_url: impl Into<String>, api_key: ApiKey) -> Self {
        Self::with_client(base_url, api_key, Client::new())
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(
        base_url: impl Into<String>,
        api_key: ApiKey,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, api_key, client))
    }

    /// Create a client around a preconfigured reqwest `Client`
    ///
    /// # Example
    /// ```
    /// use prowl_client::TargetClient;
    /// use prowl_core::domain::credential::ApiKey;
    /// use reqwest::Client;
    ///
    /// let client = TargetClient::with_client(
    ///     "http://localhost:9696/api/v1",
    ///     ApiKey::new("secret"),
    ///     Client::new(),
    /// );
    /// ```
    pub fn with_client(base_url: impl Into<String>, api_key: ApiKey, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for TargetClient {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = self.url(&request.path);
        debug!("{} {}", request.method, url);

        let builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };
        let mut builder = builder.header(API_KEY_HEADER, self.api_key.as_str());
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<unreadable body: {}>", e));

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = TargetClient::new("http://localhost:9696/api/v1", ApiKey::new("k"));
        assert_eq!(client.base_url(), "http://localhost:9696/api/v1");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = TargetClient::new("http://localhost:9696/api/v1/", ApiKey::new("k"));
        assert_eq!(client.base_url(), "http://localhost:9696/api/v1");
    }

    #[test]
    fn test_url_joining() {
        let client = TargetClient::new("http://localhost:9696/api/v1/", ApiKey::new("k"));
        assert_eq!(
            client.url("/indexer/action/checkCaptcha"),
            "http://localhost:9696/api/v1/indexer/action/checkCaptcha"
        );
        assert_eq!(client.url("tag"), "http://localhost:9696/api/v1/tag");
    }

    #[test]
    fn test_client_with_timeout() {
        let client = TargetClient::with_timeout(
            "http://localhost:9696",
            ApiKey::new("k"),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:9696");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Grab a free port and release it so nothing is listening there.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = TargetClient::with_timeout(
            format!("http://127.0.0.1:{}", port),
            ApiKey::new("k"),
            Duration::from_secs(2),
        )
        .unwrap();
        let request = ApiRequest::empty(prowl_core::domain::call::CallSite::Health);
        let err = client.send(&request).await.unwrap_err();
        assert!(matches!(err, ClientError::RequestFailed(_)));
    }
}
