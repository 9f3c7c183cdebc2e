//! Instagram Graph API user lookup, authenticated with an `access_token`
//! query parameter.

use std::time::Duration;

use brinkstats_core::{LiveCounts, MetricName};
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::UpstreamError;
use crate::http::{build_client, count_field, join_segments, parse_base_url, read_json};

pub(crate) const DEFAULT_BASE_URL: &str = "https://graph.instagram.com/";

/// Client for the Instagram Graph user-by-id endpoint.
pub struct InstagramClient {
    client: Client,
    access_token: String,
    base_url: Url,
}

impl InstagramClient {
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(access_token: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        Self::with_base_url(access_token, timeout, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`UpstreamError::InvalidBaseUrl`] if `base_url` is unusable.
    pub fn with_base_url(
        access_token: &str,
        timeout: Duration,
        base_url: &str,
    ) -> Result<Self, UpstreamError> {
        Ok(Self {
            client: build_client(timeout)?,
            access_token: access_token.to_owned(),
            base_url: parse_base_url(base_url)?,
        })
    }

    fn user_url(&self, user_id: &str) -> Result<Url, UpstreamError> {
        let mut url = join_segments(&self.base_url, &[user_id])?;
        url.query_pairs_mut()
            .append_pair("fields", "followers_count,media_count")
            .append_pair("access_token", &self.access_token);
        Ok(url)
    }

    /// Looks up a user by id and returns the upstream JSON unchanged.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::Status`] when the API answers with a non-2xx status.
    /// - [`UpstreamError::Http`] on network failure or timeout.
    /// - [`UpstreamError::Decode`] if a success body is not JSON.
    pub async fn lookup_user(&self, user_id: &str) -> Result<Value, UpstreamError> {
        let url = self.user_url(user_id)?;
        let response = self.client.get(url).send().await?;
        read_json(response).await
    }

    /// Fetches follower and media counts. `Ok(None)` means the response did
    /// not carry a follower count.
    ///
    /// # Errors
    ///
    /// Same as [`InstagramClient::lookup_user`], except that an unparseable
    /// success body yields `Ok(None)`.
    pub async fn fetch_counts(&self, user_id: &str) -> Result<Option<LiveCounts>, UpstreamError> {
        match self.lookup_user(user_id).await {
            Ok(body) => Ok(counts_from_user(&body)),
            Err(UpstreamError::Decode { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Extracts counts from a `{ followers_count, media_count }` body.
#[must_use]
pub fn counts_from_user(body: &Value) -> Option<LiveCounts> {
    let followers = count_field(body.get("followers_count"))?;
    Some(
        LiveCounts::new(followers)
            .with_secondary(MetricName::Posts, count_field(body.get("media_count"))),
    )
}
