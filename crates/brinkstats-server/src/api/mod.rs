mod adapters;
mod proxy;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue},
    routing::{any, get},
    Extension, Json, Router,
};
use brinkstats_aggregator::StatsAggregator;
use brinkstats_core::{AggregatedStats, AppConfig};
use brinkstats_upstream::{UpstreamEndpoints, UpstreamError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::middleware::{request_id, RequestId};

pub use proxy::ProxyState;

#[derive(Clone)]
pub struct AppState {
    pub proxy: ProxyState,
    pub aggregator: Arc<StatsAggregator>,
}

impl AppState {
    /// # Errors
    ///
    /// Returns [`UpstreamError`] if an upstream client cannot be built.
    pub fn from_config(
        config: &AppConfig,
        endpoints: &UpstreamEndpoints,
    ) -> Result<Self, UpstreamError> {
        Ok(Self {
            proxy: ProxyState::from_config(config, endpoints)?,
            aggregator: Arc::new(StatsAggregator::with_endpoints(config, endpoints)?),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ResponseMeta {
    fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    message: &'static str,
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stats", get(aggregate_stats))
        .route("/api/twitter/user", any(adapters::server_twitter_without_username))
        .route("/api/twitter/user/{username}", any(adapters::server_twitter))
        .route(
            "/api/instagram/user",
            any(adapters::server_instagram_without_user_id),
        )
        .route("/api/instagram/user/{user_id}", any(adapters::server_instagram))
        .route("/api/twitter-user", any(adapters::function_twitter))
        .route("/api/instagram-user", any(adapters::function_instagram))
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static("*"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_METHODS,
                    HeaderValue::from_static("GET,OPTIONS"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static("Content-Type"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                    HeaderValue::from_static("true"),
                ))
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> Json<HealthData> {
    Json(HealthData {
        status: "ok",
        message: "Proxy server is running",
    })
}

async fn aggregate_stats(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<AggregatedStats>> {
    let data = state.aggregator.collect().await;
    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}
