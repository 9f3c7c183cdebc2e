//! End-to-end aggregation tests against wiremock upstreams.

use std::time::{Duration, Instant};

use brinkstats_aggregator::StatsAggregator;
use brinkstats_core::{
    AppConfig, Environment, InstagramCredentials, Metric, MetricName, Platform,
    PlatformCredentials, TwitterCredentials,
};
use brinkstats_upstream::UpstreamEndpoints;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(credentials: PlatformCredentials, proxy_url: Option<String>) -> AppConfig {
    AppConfig {
        env: Environment::Test,
        bind_addr: "127.0.0.1:0".parse().expect("socket addr"),
        log_level: "info".to_string(),
        upstream_timeout_secs: 1,
        proxy_url,
        credentials,
    }
}

fn twitter_only() -> PlatformCredentials {
    PlatformCredentials {
        twitter: TwitterCredentials {
            bearer_token: Some("tw-token".to_string()),
            username: "brink".to_string(),
        },
        ..PlatformCredentials::default()
    }
}

fn aggregator(cfg: &AppConfig, server: &MockServer) -> StatsAggregator {
    StatsAggregator::with_endpoints(cfg, &UpstreamEndpoints::all_at(&server.uri()))
        .expect("aggregator construction should not fail")
}

#[tokio::test]
async fn configured_twitter_reports_formatted_followers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/by/username/brink"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "public_metrics": { "followers_count": 4200 } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stats = aggregator(&config(twitter_only(), None), &server).collect().await;
    let twitter = stats.get(Platform::Twitter);

    assert_eq!(twitter.primary, Metric::Live(4200));
    assert_eq!(twitter.primary.display(), "4.2K");
    // tweet_count was absent, so the filler value stands in.
    assert_eq!(
        twitter.metric(MetricName::Tweets),
        Some(Metric::Placeholder(342))
    );
}

#[tokio::test]
async fn unconfigured_instagram_makes_no_call_and_others_still_report() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/by/username/brink"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "public_metrics": { "followers_count": 12 } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(any())
        .and(path("/1789"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut creds = twitter_only();
    // User id present, access token absent.
    creds.instagram = InstagramCredentials {
        access_token: None,
        user_id: Some("1789".to_string()),
    };

    let stats = aggregator(&config(creds, None), &server).collect().await;

    assert_eq!(stats.get(Platform::Instagram).primary, Metric::Unavailable);
    assert_eq!(
        stats.get(Platform::Instagram).metric(MetricName::Posts),
        Some(Metric::Placeholder(156))
    );
    assert_eq!(stats.get(Platform::Twitter).primary, Metric::Live(12));
}

#[tokio::test]
async fn nothing_configured_makes_no_calls() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let agg = aggregator(&config(PlatformCredentials::default(), None), &server);
    assert_eq!(agg.configured_platforms().count(), 0);

    let stats = agg.collect().await;
    assert_eq!(stats.iter().count(), Platform::ALL.len());
    assert!(stats.iter().all(|(_, s)| !s.is_available()));
}

#[tokio::test]
async fn hanging_upstream_degrades_after_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({
                    "data": { "public_metrics": { "followers_count": 4200 } }
                }))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let agg = aggregator(&config(twitter_only(), None), &server);
    let started = Instant::now();
    let stats = agg.collect().await;

    assert!(
        started.elapsed() < Duration::from_secs(10),
        "aggregate should resolve once the timeout elapses, took {:?}",
        started.elapsed()
    );
    assert_eq!(stats.get(Platform::Twitter).primary, Metric::Unavailable);
}

#[tokio::test]
async fn one_failing_platform_does_not_affect_another() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/by/username/brink"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({ "title": "oops" })),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/1789"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "followers_count": 2_350_000,
            "media_count": 90
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut creds = twitter_only();
    creds.instagram = InstagramCredentials {
        access_token: Some("ig-token".to_string()),
        user_id: Some("1789".to_string()),
    };

    let stats = aggregator(&config(creds, None), &server).collect().await;

    assert_eq!(stats.get(Platform::Twitter).primary, Metric::Unavailable);
    let instagram = stats.get(Platform::Instagram);
    assert_eq!(instagram.primary.display(), "2.4M");
    assert_eq!(instagram.metric(MetricName::Posts), Some(Metric::Live(90)));
}

#[tokio::test]
async fn platforms_are_fetched_concurrently() {
    let server = MockServer::start().await;
    let delay = Duration::from_millis(600);

    Mock::given(method("GET"))
        .and(path("/2/users/by/username/brink"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({
                    "data": { "public_metrics": { "followers_count": 1 } }
                }))
                .set_delay(delay),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/1789"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "followers_count": 2 }))
                .set_delay(delay),
        )
        .mount(&server)
        .await;

    let mut creds = twitter_only();
    creds.instagram = InstagramCredentials {
        access_token: Some("ig-token".to_string()),
        user_id: Some("1789".to_string()),
    };
    let mut cfg = config(creds, None);
    cfg.upstream_timeout_secs = 5;

    let started = Instant::now();
    let stats = aggregator(&cfg, &server).collect().await;
    let elapsed = started.elapsed();

    assert!(stats.get(Platform::Twitter).is_available());
    assert!(stats.get(Platform::Instagram).is_available());
    assert!(
        elapsed < delay * 2,
        "fetches should overlap, took {elapsed:?}"
    );
}

#[tokio::test]
async fn proxy_mode_routes_through_proxy_without_local_tokens() {
    let proxy = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/twitter/user/BGodbless25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "public_metrics": { "followers_count": 999, "tweet_count": 400 } }
        })))
        .expect(1)
        .mount(&proxy)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/instagram/user/1789"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": { "message": "expired token" }
        })))
        .expect(1)
        .mount(&proxy)
        .await;

    let creds = PlatformCredentials {
        instagram: InstagramCredentials {
            access_token: None,
            user_id: Some("1789".to_string()),
        },
        ..PlatformCredentials::default()
    };
    let cfg = config(creds, Some(proxy.uri()));
    let agg = StatsAggregator::from_config(&cfg).expect("aggregator");

    let stats = agg.collect().await;
    let twitter = stats.get(Platform::Twitter);
    assert_eq!(twitter.primary.display(), "999");
    assert_eq!(twitter.metric(MetricName::Tweets), Some(Metric::Live(400)));
    assert_eq!(stats.get(Platform::Instagram).primary, Metric::Unavailable);
}

#[tokio::test]
async fn zero_followers_stay_live_but_render_dash() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "public_metrics": { "followers_count": 0 } }
        })))
        .mount(&server)
        .await;

    let stats = aggregator(&config(twitter_only(), None), &server).collect().await;
    let twitter = stats.get(Platform::Twitter);
    assert_eq!(twitter.primary, Metric::Live(0));
    assert_eq!(twitter.primary.display(), "—");
}
