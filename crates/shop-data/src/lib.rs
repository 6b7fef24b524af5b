//! HTTP client utilities for the storefront.
//!
//! Provides a small builder API for outbound requests with automatic JSON
//! handling. The wire is reached through a [`Transport`], so callers can
//! swap the default `reqwest` backend for a canned one in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_data::FetchClient;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Envelope<T> {
//!     data: T,
//! }
//!
//! let client = FetchClient::new().with_base_url("https://v2.api.noroff.dev/online-shop");
//!
//! let product: Envelope<serde_json::Value> = client
//!     .get("/some-id")
//!     .send()
//!     .await?
//!     .json()?;
//! ```

mod error;
mod request;
mod response;
mod transport;

use std::collections::HashMap;
use std::sync::Arc;

pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use transport::{ReqwestTransport, Transport};

/// HTTP client for making outbound requests.
#[derive(Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    transport: Arc<dyn Transport>,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Create a new HTTP client using the default `reqwest` transport.
    pub fn new() -> Self {
        Self::with_transport(Arc::new(ReqwestTransport::default()))
    }

    /// Create a client that sends through `transport`.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: None,
            default_headers: HashMap::new(),
            transport,
        }
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// The configured base URL.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) => {
                if url.starts_with("http://") || url.starts_with("https://") {
                    url
                } else if url.is_empty() {
                    base.clone()
                } else {
                    format!(
                        "{}/{}",
                        base.trim_end_matches('/'),
                        url.trim_start_matches('/')
                    )
                }
            }
            None => url,
        };

        let builder = RequestBuilder::new(method, full_url).headers(
            self.default_headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        ClientRequestBuilder {
            builder,
            transport: Arc::clone(&self.transport),
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// The resolved URL this request will hit.
    pub fn url(&self) -> &str {
        self.builder.url()
    }

    /// Send the request and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        let method = self.builder.method();
        let url = self.builder.url().to_string();
        tracing::debug!(method = method.as_str(), %url, "sending request");

        let response = self.transport.send(self.builder).await?;

        tracing::debug!(status = response.status, %url, "response received");
        Ok(response)
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Method, Response, Transport};
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<RequestBuilder>>,
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
            self.seen.lock().unwrap().push(request);
            Ok(Response::new(200, HashMap::new(), b"[]".to_vec()))
        }
    }

    #[test]
    fn test_base_url_joining() {
        let client = FetchClient::with_transport(Arc::new(Recorder::default()))
            .with_base_url("https://api.example.com/shop/");

        assert_eq!(client.get("/abc").url(), "https://api.example.com/shop/abc");
        assert_eq!(client.get("abc").url(), "https://api.example.com/shop/abc");
        assert_eq!(client.get("").url(), "https://api.example.com/shop/");
        assert_eq!(
            client.get("https://other.example.com/x").url(),
            "https://other.example.com/x"
        );
    }

    #[tokio::test]
    async fn test_send_uses_transport_and_default_headers() {
        let recorder = Arc::new(Recorder::default());
        let client = FetchClient::with_transport(recorder.clone())
            .with_base_url("https://api.example.com")
            .with_default_header("Accept", "application/json");

        let response = client.get("/items").send().await.unwrap();
        assert!(response.is_success());

        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method(), Method::Get);
        assert_eq!(seen[0].url(), "https://api.example.com/items");
        assert_eq!(seen[0].header_value("accept"), Some("application/json"));
    }
}
