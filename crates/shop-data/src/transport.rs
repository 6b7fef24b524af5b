//! Pluggable request transport.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::{FetchError, Method, RequestBuilder, Response};

/// Sends a fully built request and reads the whole response.
///
/// The default implementation is [`ReqwestTransport`]; tests substitute
/// their own to serve canned responses.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

/// [`Transport`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Default overall request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Build a transport with the given overall request timeout.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::RequestError(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
    }
}

fn map_reqwest_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_builder() {
        FetchError::InvalidUrl(e.to_string())
    } else {
        FetchError::RequestError(e.to_string())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url);

        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await.map_err(map_reqwest_error)?.to_vec();

        Ok(Response::new(status, headers, body))
    }
}
