//! Twitter/X API v2 user lookup, authenticated with an app bearer token.

use std::time::Duration;

use brinkstats_core::{LiveCounts, MetricName};
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::UpstreamError;
use crate::http::{build_client, count_field, join_segments, parse_base_url, read_json};

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.twitter.com/";

/// Client for the Twitter/X user-by-username endpoint.
///
/// Use [`TwitterClient::new`] for production or
/// [`TwitterClient::with_base_url`] to point at a mock server in tests.
pub struct TwitterClient {
    client: Client,
    bearer_token: String,
    base_url: Url,
}

impl TwitterClient {
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(bearer_token: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        Self::with_base_url(bearer_token, timeout, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`UpstreamError::InvalidBaseUrl`] if `base_url` is unusable.
    pub fn with_base_url(
        bearer_token: &str,
        timeout: Duration,
        base_url: &str,
    ) -> Result<Self, UpstreamError> {
        Ok(Self {
            client: build_client(timeout)?,
            bearer_token: bearer_token.to_owned(),
            base_url: parse_base_url(base_url)?,
        })
    }

    fn user_url(&self, username: &str) -> Result<Url, UpstreamError> {
        let mut url = join_segments(&self.base_url, &["2", "users", "by", "username", username])?;
        url.query_pairs_mut()
            .append_pair("user.fields", "public_metrics");
        Ok(url)
    }

    /// Looks up a user by username and returns the upstream JSON unchanged.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::Status`] when the API answers with a non-2xx status.
    /// - [`UpstreamError::Http`] on network failure or timeout.
    /// - [`UpstreamError::Decode`] if a success body is not JSON.
    pub async fn lookup_user(&self, username: &str) -> Result<Value, UpstreamError> {
        let url = self.user_url(username)?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;
        read_json(response).await
    }

    /// Fetches follower and tweet counts. `Ok(None)` means the response did
    /// not carry a follower count.
    ///
    /// # Errors
    ///
    /// Same as [`TwitterClient::lookup_user`], except that an unparseable
    /// success body yields `Ok(None)`.
    pub async fn fetch_counts(&self, username: &str) -> Result<Option<LiveCounts>, UpstreamError> {
        match self.lookup_user(username).await {
            Ok(body) => Ok(counts_from_user(&body)),
            Err(UpstreamError::Decode { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Extracts counts from a `{ data: { public_metrics: { .. } } }` body.
#[must_use]
pub fn counts_from_user(body: &Value) -> Option<LiveCounts> {
    let metrics = body.get("data")?.get("public_metrics")?;
    let followers = count_field(metrics.get("followers_count"))?;
    Some(
        LiveCounts::new(followers)
            .with_secondary(MetricName::Tweets, count_field(metrics.get("tweet_count"))),
    )
}
