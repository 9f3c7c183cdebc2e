//! One fetch path per configured platform.

use std::sync::Arc;

use brinkstats_core::{AppConfig, LiveCounts, Platform, StatRequest};
use brinkstats_upstream::{
    InstagramClient, LinkedinClient, ProxyClient, SpotifyClient, TwitterClient, UpstreamEndpoints,
    UpstreamError, YoutubeClient,
};

pub(crate) enum Source {
    Twitter(TwitterClient, StatRequest),
    Instagram(InstagramClient, StatRequest),
    ProxiedTwitter(Arc<ProxyClient>, StatRequest),
    ProxiedInstagram(Arc<ProxyClient>, StatRequest),
    Youtube(YoutubeClient, StatRequest),
    Linkedin(LinkedinClient, StatRequest),
    Spotify(SpotifyClient, StatRequest),
}

impl Source {
    pub(crate) async fn fetch(&self) -> Result<Option<LiveCounts>, UpstreamError> {
        match self {
            Source::Twitter(client, req) => client.fetch_counts(req.identifier()).await,
            Source::Instagram(client, req) => client.fetch_counts(req.identifier()).await,
            Source::ProxiedTwitter(proxy, req) => proxy.twitter_counts(req.identifier()).await,
            Source::ProxiedInstagram(proxy, req) => proxy.instagram_counts(req.identifier()).await,
            Source::Youtube(client, req) => client.fetch_counts(req.identifier()).await,
            Source::Linkedin(client, req) => client.fetch_counts(req.identifier()).await,
            Source::Spotify(client, req) => client.fetch_counts(req.identifier()).await,
        }
    }
}

/// Builds the fetch path for every platform. `None` marks a platform whose
/// required configuration is absent; it is reported unavailable without any
/// network call.
///
/// With a proxy configured, Twitter and Instagram go through it and only
/// their account identifiers are required locally.
pub(crate) fn build_sources(
    config: &AppConfig,
    endpoints: &UpstreamEndpoints,
) -> Result<Vec<(Platform, Option<Source>)>, UpstreamError> {
    let creds = &config.credentials;
    let timeout = config.upstream_timeout();
    let proxy = config
        .proxy_url
        .as_deref()
        .map(|url| ProxyClient::new(url, timeout).map(Arc::new))
        .transpose()?;

    let twitter_req = StatRequest::new(Platform::Twitter, Some(creds.twitter.username.as_str()));
    let twitter = match (&proxy, twitter_req) {
        (Some(proxy), Some(req)) => Some(Source::ProxiedTwitter(Arc::clone(proxy), req)),
        (None, Some(req)) => match creds.twitter.bearer_token.as_deref() {
            Some(token) => Some(Source::Twitter(
                TwitterClient::with_base_url(token, timeout, &endpoints.twitter)?,
                req,
            )),
            None => None,
        },
        (_, None) => None,
    };

    let instagram_req = StatRequest::new(Platform::Instagram, creds.instagram.user_id.as_deref());
    let instagram = match (&proxy, instagram_req) {
        (Some(proxy), Some(req)) => Some(Source::ProxiedInstagram(Arc::clone(proxy), req)),
        (None, Some(req)) => match creds.instagram.access_token.as_deref() {
            Some(token) => Some(Source::Instagram(
                InstagramClient::with_base_url(token, timeout, &endpoints.instagram)?,
                req,
            )),
            None => None,
        },
        (_, None) => None,
    };

    let youtube = match (
        creds.youtube.api_key.as_deref(),
        StatRequest::new(Platform::Youtube, Some(creds.youtube.channel.as_str())),
    ) {
        (Some(key), Some(req)) => Some(Source::Youtube(
            YoutubeClient::with_base_url(key, timeout, &endpoints.youtube)?,
            req,
        )),
        _ => None,
    };

    let linkedin = match (
        creds.linkedin.access_token.as_deref(),
        StatRequest::new(Platform::Linkedin, creds.linkedin.company_id.as_deref()),
    ) {
        (Some(token), Some(req)) => Some(Source::Linkedin(
            LinkedinClient::with_base_url(token, timeout, &endpoints.linkedin)?,
            req,
        )),
        _ => None,
    };

    let spotify = match (
        creds.spotify.client_id.as_deref(),
        creds.spotify.client_secret.as_deref(),
        StatRequest::new(Platform::Spotify, creds.spotify.show_id.as_deref()),
    ) {
        (Some(id), Some(secret), Some(req)) => Some(Source::Spotify(
            SpotifyClient::with_base_urls(
                id,
                secret,
                timeout,
                &endpoints.spotify_accounts,
                &endpoints.spotify_api,
            )?,
            req,
        )),
        _ => None,
    };

    Ok(vec![
        (Platform::Youtube, youtube),
        (Platform::Instagram, instagram),
        (Platform::Twitter, twitter),
        (Platform::Linkedin, linkedin),
        (Platform::Spotify, spotify),
        // No public follower API for either.
        (Platform::ApplePodcast, None),
        (Platform::Tiktok, None),
    ])
}
