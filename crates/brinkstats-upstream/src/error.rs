use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by the upstream statistics clients.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Network, TLS, or timeout failure. The request URL is stripped because
    /// some upstreams carry their token in the query string.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// The upstream answered with a non-success status. `body` is the parsed
    /// error body, or [`crate::fallback_error_body`] when it was not JSON.
    #[error("upstream returned {status}")]
    Status {
        status: StatusCode,
        body: serde_json::Value,
    },

    /// A success response whose body was not valid JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.without_url())
    }
}

impl UpstreamError {
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}
