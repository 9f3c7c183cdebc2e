//! Client for a deployed statistics proxy, used when the caller holds no
//! upstream credentials of its own.

use std::time::Duration;

use brinkstats_core::LiveCounts;
use reqwest::{Client, Url};

use crate::error::UpstreamError;
use crate::http::{build_client, join_segments, parse_base_url, read_json};
use crate::{instagram, twitter};

/// Calls the long-running proxy routes (`/api/twitter/user/{username}`,
/// `/api/instagram/user/{userId}`). The proxy relays upstream JSON unchanged,
/// so counts are extracted exactly as for direct upstream calls.
pub struct ProxyClient {
    client: Client,
    base_url: Url,
}

impl ProxyClient {
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`UpstreamError::InvalidBaseUrl`] if `base_url` is unusable.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: parse_base_url(base_url)?,
        })
    }

    async fn get(&self, segments: &[&str]) -> Result<serde_json::Value, UpstreamError> {
        let url = join_segments(&self.base_url, segments)?;
        let response = self.client.get(url).send().await?;
        read_json(response).await
    }

    /// # Errors
    ///
    /// - [`UpstreamError::Status`] with the proxy's `{ error }` body on a non-2xx status.
    /// - [`UpstreamError::Http`] on network failure or timeout.
    pub async fn twitter_counts(
        &self,
        username: &str,
    ) -> Result<Option<LiveCounts>, UpstreamError> {
        match self.get(&["api", "twitter", "user", username]).await {
            Ok(body) => Ok(twitter::counts_from_user(&body)),
            Err(UpstreamError::Decode { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// # Errors
    ///
    /// - [`UpstreamError::Status`] with the proxy's `{ error }` body on a non-2xx status.
    /// - [`UpstreamError::Http`] on network failure or timeout.
    pub async fn instagram_counts(
        &self,
        user_id: &str,
    ) -> Result<Option<LiveCounts>, UpstreamError> {
        match self.get(&["api", "instagram", "user", user_id]).await {
            Ok(body) => Ok(instagram::counts_from_user(&body)),
            Err(UpstreamError::Decode { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
