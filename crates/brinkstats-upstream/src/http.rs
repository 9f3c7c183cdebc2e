use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde_json::{Map, Value};

use crate::error::UpstreamError;

const USER_AGENT: &str = "brinkstats/0.1 (social-stats)";

/// Base URLs for every upstream. [`Default`] points at production; tests
/// point them at a mock server.
#[derive(Debug, Clone)]
pub struct UpstreamEndpoints {
    pub twitter: String,
    pub instagram: String,
    pub youtube: String,
    pub linkedin: String,
    pub spotify_accounts: String,
    pub spotify_api: String,
}

impl Default for UpstreamEndpoints {
    fn default() -> Self {
        Self {
            twitter: crate::twitter::DEFAULT_BASE_URL.to_string(),
            instagram: crate::instagram::DEFAULT_BASE_URL.to_string(),
            youtube: crate::youtube::DEFAULT_BASE_URL.to_string(),
            linkedin: crate::linkedin::DEFAULT_BASE_URL.to_string(),
            spotify_accounts: crate::spotify::DEFAULT_ACCOUNTS_URL.to_string(),
            spotify_api: crate::spotify::DEFAULT_API_URL.to_string(),
        }
    }
}

impl UpstreamEndpoints {
    /// Every upstream served from one base URL.
    #[must_use]
    pub fn all_at(base_url: &str) -> Self {
        Self {
            twitter: base_url.to_string(),
            instagram: base_url.to_string(),
            youtube: base_url.to_string(),
            linkedin: base_url.to_string(),
            spotify_accounts: base_url.to_string(),
            spotify_api: base_url.to_string(),
        }
    }
}

/// Body substituted when an upstream error response cannot be parsed as JSON.
#[must_use]
pub fn fallback_error_body() -> Value {
    Value::Object(Map::new())
}

pub(crate) fn build_client(timeout: Duration) -> Result<Client, UpstreamError> {
    let client = Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Parses a base URL, ensuring it ends with exactly one slash so that path
/// segments append rather than replace the last one.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, UpstreamError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    let url = Url::parse(&normalised).map_err(|e| UpstreamError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(UpstreamError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: "URL cannot carry path segments".to_string(),
        });
    }
    Ok(url)
}

/// Appends path segments to `base`, percent-encoding each one.
pub(crate) fn join_segments(base: &Url, segments: &[&str]) -> Result<Url, UpstreamError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| UpstreamError::InvalidBaseUrl {
            url: base.to_string(),
            reason: "URL cannot carry path segments".to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Reads a response body as JSON.
///
/// # Errors
///
/// - [`UpstreamError::Status`] for a non-2xx status, carrying the parsed error
///   body or [`fallback_error_body`].
/// - [`UpstreamError::Decode`] when a 2xx body is not JSON.
/// - [`UpstreamError::Http`] if the body cannot be read.
pub async fn read_json(response: Response) -> Result<Value, UpstreamError> {
    let status = response.status();
    let context = response.url().path().to_string();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let body = serde_json::from_slice(&bytes).unwrap_or_else(|_| fallback_error_body());
        return Err(UpstreamError::Status { status, body });
    }

    serde_json::from_slice(&bytes).map_err(|source| UpstreamError::Decode { context, source })
}

/// Reads a count that may arrive as a JSON number or a numeric string.
pub(crate) fn count_field(value: Option<&Value>) -> Option<u64> {
    let value = value?;
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}
