//! Queries every known platform concurrently and folds the outcomes into one
//! [`AggregatedStats`].
//!
//! [`StatsAggregator::collect`] never fails: a platform that is unconfigured,
//! errors, or exceeds the upstream timeout is reported as unavailable while
//! the others are returned as usual.

mod source;

use std::time::Duration;

use brinkstats_core::{AggregatedStats, AppConfig, Platform, StatResult};
use brinkstats_upstream::{UpstreamEndpoints, UpstreamError};
use futures::future::join_all;

use crate::source::{build_sources, Source};

pub struct StatsAggregator {
    sources: Vec<(Platform, Option<Source>)>,
    timeout: Duration,
}

impl StatsAggregator {
    /// Builds an aggregator against the production upstreams.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] if an HTTP client cannot be built or the
    /// configured proxy URL is unusable.
    pub fn from_config(config: &AppConfig) -> Result<Self, UpstreamError> {
        Self::with_endpoints(config, &UpstreamEndpoints::default())
    }

    /// Builds an aggregator against custom upstream base URLs.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] if an HTTP client cannot be built or a base
    /// URL is unusable.
    pub fn with_endpoints(
        config: &AppConfig,
        endpoints: &UpstreamEndpoints,
    ) -> Result<Self, UpstreamError> {
        Ok(Self {
            sources: build_sources(config, endpoints)?,
            timeout: config.upstream_timeout(),
        })
    }

    /// Platforms that will be queried on [`collect`](Self::collect).
    pub fn configured_platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        self.sources
            .iter()
            .filter(|(_, source)| source.is_some())
            .map(|(platform, _)| *platform)
    }

    /// Fetches every configured platform in parallel.
    pub async fn collect(&self) -> AggregatedStats {
        let fetches = self.sources.iter().map(|(platform, source)| async move {
            (*platform, self.fetch_one(*platform, source.as_ref()).await)
        });
        AggregatedStats::from_results(join_all(fetches).await)
    }

    async fn fetch_one(&self, platform: Platform, source: Option<&Source>) -> StatResult {
        let Some(source) = source else {
            tracing::debug!(platform = %platform, "platform not configured; skipping");
            return StatResult::Unavailable;
        };

        match tokio::time::timeout(self.timeout, source.fetch()).await {
            Ok(Ok(Some(counts))) => StatResult::Live(counts),
            Ok(Ok(None)) => {
                tracing::warn!(platform = %platform, "upstream response carried no count");
                StatResult::Unavailable
            }
            Ok(Err(e)) => {
                tracing::warn!(platform = %platform, error = %e, "platform fetch failed");
                StatResult::Unavailable
            }
            Err(_) => {
                tracing::warn!(
                    platform = %platform,
                    timeout_secs = self.timeout.as_secs(),
                    "platform fetch timed out"
                );
                StatResult::Unavailable
            }
        }
    }
}
