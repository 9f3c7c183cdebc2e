//! `LinkedIn` organization follower lookup, authenticated with a bearer token.

use std::time::Duration;

use brinkstats_core::LiveCounts;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::UpstreamError;
use crate::http::{build_client, count_field, join_segments, parse_base_url, read_json};

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.linkedin.com/";

pub struct LinkedinClient {
    client: Client,
    access_token: String,
    base_url: Url,
}

impl LinkedinClient {
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

    /// Fetches the follower count of an organization page.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::Status`] when the API answers with a non-2xx status.
    /// - [`UpstreamError::Http`] on network failure or timeout.
    pub async fn fetch_counts(
        &self,
        company_id: &str,
    ) -> Result<Option<LiveCounts>, UpstreamError> {
        let mut url = join_segments(&self.base_url, &["v2", "organizations", company_id])?;
        url.query_pairs_mut()
            .append_pair("projection", "(id,name,numFollowers)");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        match read_json(response).await {
            Ok(body) => Ok(counts_from_organization(&body)),
            Err(UpstreamError::Decode { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[must_use]
pub fn counts_from_organization(body: &Value) -> Option<LiveCounts> {
    count_field(body.get("numFollowers")).map(LiveCounts::new)
}
