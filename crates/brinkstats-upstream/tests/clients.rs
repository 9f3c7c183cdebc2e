//! Integration tests for the upstream clients using wiremock HTTP mocks.

use std::time::Duration;

use brinkstats_core::MetricName;
use brinkstats_upstream::{
    InstagramClient, LinkedinClient, SpotifyClient, TwitterClient, UpstreamError, YoutubeClient,
};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn twitter_lookup_sends_bearer_token_and_returns_body() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "data": { "id": "9", "public_metrics": { "followers_count": 4200, "tweet_count": 12 } }
    });

    Mock::given(method("GET"))
        .and(path("/2/users/by/username/brink"))
        .and(query_param("user.fields", "public_metrics"))
        .and(header("authorization", "Bearer tw-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = TwitterClient::with_base_url("tw-token", TIMEOUT, &server.uri()).unwrap();
    let value = client.lookup_user("brink").await.expect("lookup should succeed");
    assert_eq!(value, body);

    let counts = client.fetch_counts("brink").await.unwrap().unwrap();
    assert_eq!(counts.primary, 4200);
    assert_eq!(counts.secondary.get(&MetricName::Tweets), Some(&12));
}

#[tokio::test]
async fn twitter_error_status_carries_upstream_body() {
    let server = MockServer::start().await;
    let error_body = serde_json::json!({ "title": "Forbidden", "status": 403 });

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(&error_body))
        .expect(1)
        .mount(&server)
        .await;

    let client = TwitterClient::with_base_url("tw-token", TIMEOUT, &server.uri()).unwrap();
    let err = client.lookup_user("brink").await.unwrap_err();
    match err {
        UpstreamError::Status { status, body } => {
            assert_eq!(status.as_u16(), 403);
            assert_eq!(body, error_body);
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn unparseable_error_body_falls_back_to_empty_object() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let client = InstagramClient::with_base_url("ig-token", TIMEOUT, &server.uri()).unwrap();
    let err = client.lookup_user("1789").await.unwrap_err();
    assert!(
        matches!(&err, UpstreamError::Status { status, body } if status.as_u16() == 502 && *body == serde_json::json!({})),
        "got {err:?}"
    );
}

#[tokio::test]
async fn malformed_success_body_is_metric_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = TwitterClient::with_base_url("tw-token", TIMEOUT, &server.uri()).unwrap();
    assert!(matches!(
        client.lookup_user("brink").await,
        Err(UpstreamError::Decode { .. })
    ));
    assert_eq!(client.fetch_counts("brink").await.unwrap(), None);
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client =
        TwitterClient::with_base_url("tw-token", Duration::from_millis(200), &server.uri()).unwrap();
    let err = client.lookup_user("brink").await.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {err:?}");
}

#[tokio::test]
async fn instagram_sends_token_as_query_parameter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1789"))
        .and(query_param("fields", "followers_count,media_count"))
        .and(query_param("access_token", "ig-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "followers_count": 1500, "media_count": 33, "id": "1789" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = InstagramClient::with_base_url("ig-token", TIMEOUT, &server.uri()).unwrap();
    let counts = client.fetch_counts("1789").await.unwrap().unwrap();
    assert_eq!(counts.primary, 1500);
    assert_eq!(counts.secondary.get(&MetricName::Posts), Some(&33));
}

#[tokio::test]
async fn youtube_falls_back_to_channel_id_lookup() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/youtube/v3/channels"))
        .and(query_param("forUsername", "UCbrink"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "pageInfo": { "totalResults": 0 } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/youtube/v3/channels"))
        .and(query_param("id", "UCbrink"))
        .and(query_param("key", "yt-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{ "statistics": { "subscriberCount": "2100", "viewCount": "50000", "videoCount": "20" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = YoutubeClient::with_base_url("yt-key", TIMEOUT, &server.uri()).unwrap();
    let counts = client.fetch_counts("@UCbrink").await.unwrap().unwrap();
    assert_eq!(counts.primary, 2100);
    assert_eq!(counts.secondary.get(&MetricName::Videos), Some(&20));
}

#[tokio::test]
async fn youtube_falls_back_to_channel_id_after_username_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/youtube/v3/channels"))
        .and(query_param("forUsername", "UCbrink"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": { "code": 400, "message": "Invalid forUsername" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/youtube/v3/channels"))
        .and(query_param("id", "UCbrink"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{ "statistics": { "subscriberCount": "3400" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = YoutubeClient::with_base_url("yt-key", TIMEOUT, &server.uri()).unwrap();
    let counts = client.fetch_counts("UCbrink").await.unwrap().unwrap();
    assert_eq!(counts.primary, 3400);
}

#[tokio::test]
async fn youtube_username_match_skips_id_lookup() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("forUsername", "brink"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{ "statistics": { "subscriberCount": "7" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("id", "brink"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = YoutubeClient::with_base_url("yt-key", TIMEOUT, &server.uri()).unwrap();
    let counts = client.fetch_counts("@brink").await.unwrap().unwrap();
    assert_eq!(counts.primary, 7);
}

#[tokio::test]
async fn linkedin_sends_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/organizations/555"))
        .and(query_param("projection", "(id,name,numFollowers)"))
        .and(header("authorization", "Bearer li-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "numFollowers": 640 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = LinkedinClient::with_base_url("li-token", TIMEOUT, &server.uri()).unwrap();
    let counts = client.fetch_counts("555").await.unwrap().unwrap();
    assert_eq!(counts.primary, 640);
}

#[tokio::test]
async fn spotify_exchanges_credentials_then_reads_show() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        // base64("id:secret")
        .and(header("authorization", "Basic aWQ6c2VjcmV0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "access_token": "short-lived", "token_type": "Bearer" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/shows/show1"))
        .and(header("authorization", "Bearer short-lived"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "followers": { "total": 2_500_000 } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client =
        SpotifyClient::with_base_urls("id", "secret", TIMEOUT, &server.uri(), &server.uri()).unwrap();
    let counts = client.fetch_counts("show1").await.unwrap().unwrap();
    assert_eq!(counts.primary, 2_500_000);
}

#[tokio::test]
async fn spotify_without_token_skips_show_lookup() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client =
        SpotifyClient::with_base_urls("id", "secret", TIMEOUT, &server.uri(), &server.uri()).unwrap();
    assert_eq!(client.fetch_counts("show1").await.unwrap(), None);
}
