//! Spotify show follower lookup via the client-credentials flow.

use std::time::Duration;

use brinkstats_core::LiveCounts;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::UpstreamError;
use crate::http::{build_client, count_field, join_segments, parse_base_url, read_json};

pub(crate) const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com/";
pub(crate) const DEFAULT_API_URL: &str = "https://api.spotify.com/";

/// Client for a Spotify show. Each fetch exchanges the client id and secret
/// for a short-lived access token and then reads the show.
pub struct SpotifyClient {
    client: Client,
    client_id: String,
    client_secret: String,
    accounts_url: Url,
    api_url: Url,
}

impl SpotifyClient {
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        client_id: &str,
        client_secret: &str,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        Self::with_base_urls(
            client_id,
            client_secret,
            timeout,
            DEFAULT_ACCOUNTS_URL,
            DEFAULT_API_URL,
        )
    }

    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`UpstreamError::InvalidBaseUrl`] if either URL is unusable.
    pub fn with_base_urls(
        client_id: &str,
        client_secret: &str,
        timeout: Duration,
        accounts_url: &str,
        api_url: &str,
    ) -> Result<Self, UpstreamError> {
        Ok(Self {
            client: build_client(timeout)?,
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
            accounts_url: parse_base_url(accounts_url)?,
            api_url: parse_base_url(api_url)?,
        })
    }

    async fn access_token(&self) -> Result<Option<String>, UpstreamError> {
        let url = join_segments(&self.accounts_url, &["api", "token"])?;
        let response = self
            .client
            .post(url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;
        let body = read_json(response).await?;
        Ok(body
            .get("access_token")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned))
    }

    /// Fetches the follower total of a show.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::Status`] when either call answers with a non-2xx status.
    /// - [`UpstreamError::Http`] on network failure or timeout.
    pub async fn fetch_counts(&self, show_id: &str) -> Result<Option<LiveCounts>, UpstreamError> {
        let token = match self.access_token().await {
            Ok(Some(token)) => token,
            Ok(None) | Err(UpstreamError::Decode { .. }) => return Ok(None),
            Err(e) => return Err(e),
        };

        let url = join_segments(&self.api_url, &["v1", "shows", show_id])?;
        let response = self.client.get(url).bearer_auth(token).send().await?;
        match read_json(response).await {
            Ok(body) => Ok(counts_from_show(&body)),
            Err(UpstreamError::Decode { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[must_use]
pub fn counts_from_show(body: &Value) -> Option<LiveCounts> {
    count_field(body.get("followers")?.get("total")).map(LiveCounts::new)
}
