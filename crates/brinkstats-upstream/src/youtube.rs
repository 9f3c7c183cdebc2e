//! `YouTube` Data API v3 channel statistics, authenticated with an API key.

use std::time::Duration;

use brinkstats_core::{LiveCounts, MetricName};
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::UpstreamError;
use crate::http::{build_client, count_field, join_segments, parse_base_url, read_json};

pub(crate) const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/";

pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

/// How a channel is addressed in the `channels` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChannelSelector {
    Username,
    Id,
}

impl ChannelSelector {
    fn param(self) -> &'static str {
        match self {
            ChannelSelector::Username => "forUsername",
            ChannelSelector::Id => "id",
        }
    }
}

impl YoutubeClient {
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        Self::with_base_url(api_key, timeout, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`UpstreamError::InvalidBaseUrl`] if `base_url` is unusable.
    pub fn with_base_url(
        api_key: &str,
        timeout: Duration,
        base_url: &str,
    ) -> Result<Self, UpstreamError> {
        Ok(Self {
            client: build_client(timeout)?,
            api_key: api_key.to_owned(),
            base_url: parse_base_url(base_url)?,
        })
    }

    fn channels_url(&self, selector: ChannelSelector, channel: &str) -> Result<Url, UpstreamError> {
        let mut url = join_segments(&self.base_url, &["youtube", "v3", "channels"])?;
        url.query_pairs_mut()
            .append_pair("part", "statistics")
            .append_pair(selector.param(), channel)
            .append_pair("key", &self.api_key);
        Ok(url)
    }

    async fn channels(
        &self,
        selector: ChannelSelector,
        channel: &str,
    ) -> Result<Value, UpstreamError> {
        let url = self.channels_url(selector, channel)?;
        let response = self.client.get(url).send().await?;
        read_json(response).await
    }

    /// Fetches subscriber, view, and video counts for a channel handle or id.
    ///
    /// The leading `@` of a handle is dropped. The channel is first looked up
    /// as a legacy username; when that matches nothing, or the API rejects the
    /// username query with an error status, it is looked up as a channel id.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::Status`] when the API answers with a non-2xx status.
    /// - [`UpstreamError::Http`] on network failure or timeout.
    pub async fn fetch_counts(&self, channel: &str) -> Result<Option<LiveCounts>, UpstreamError> {
        let channel = channel.trim_start_matches('@');

        let body = match self.channels(ChannelSelector::Username, channel).await {
            Ok(body) if has_items(&body) => body,
            Ok(_) | Err(UpstreamError::Decode { .. } | UpstreamError::Status { .. }) => {
                match self.channels(ChannelSelector::Id, channel).await {
                    Ok(body) => body,
                    Err(UpstreamError::Decode { .. }) => return Ok(None),
                    Err(e) => return Err(e),
                }
            }
            Err(e) => return Err(e),
        };

        Ok(counts_from_channels(&body))
    }
}

fn has_items(body: &Value) -> bool {
    body.get("items")
        .and_then(Value::as_array)
        .is_some_and(|items| !items.is_empty())
}

/// Extracts counts from the first channel's `statistics` object. `YouTube`
/// encodes the counts as strings.
#[must_use]
pub fn counts_from_channels(body: &Value) -> Option<LiveCounts> {
    let stats = body
        .get("items")?
        .as_array()?
        .first()?
        .get("statistics")?;
    let subscribers = count_field(stats.get("subscriberCount"))?;
    Some(
        LiveCounts::new(subscribers)
            .with_secondary(MetricName::Views, count_field(stats.get("viewCount")))
            .with_secondary(MetricName::Videos, count_field(stats.get("videoCount"))),
    )
}
