use thiserror::Error;

/// Why an outbound request produced no usable response.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection-level failure: DNS, TLS, reset.
    #[error("Request failed: {0}")]
    RequestError(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Body did not decode into the expected shape.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Request timed out")]
    Timeout,
}
