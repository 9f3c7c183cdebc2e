//! Platform-agnostic proxy request handling.
//!
//! A request moves through method checks, credential and identifier
//! validation, and a single upstream call. Deployment adapters in
//! [`super::adapters`] only translate their routing shape into a call to
//! [`handle`].

use std::sync::Arc;

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use brinkstats_core::{AppConfig, Platform, StatRequest};
use brinkstats_upstream::{InstagramClient, TwitterClient, UpstreamEndpoints, UpstreamError};
use serde_json::{json, Value};

/// Upstream clients for the proxied platforms. `None` means the server-side
/// credential is not configured.
#[derive(Clone, Default)]
pub struct ProxyState {
    pub twitter: Option<Arc<TwitterClient>>,
    pub instagram: Option<Arc<InstagramClient>>,
}

impl ProxyState {
    /// # Errors
    ///
    /// Returns [`UpstreamError`] if a client cannot be built.
    pub fn from_config(
        config: &AppConfig,
        endpoints: &UpstreamEndpoints,
    ) -> Result<Self, UpstreamError> {
        let creds = &config.credentials;
        let timeout = config.upstream_timeout();

        let twitter = creds
            .twitter
            .bearer_token
            .as_deref()
            .map(|token| TwitterClient::with_base_url(token, timeout, &endpoints.twitter))
            .transpose()?
            .map(Arc::new);
        let instagram = creds
            .instagram
            .access_token
            .as_deref()
            .map(|token| InstagramClient::with_base_url(token, timeout, &endpoints.instagram))
            .transpose()?
            .map(Arc::new);

        Ok(Self { twitter, instagram })
    }
}

/// The platforms reachable through the proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ProxyTarget {
    Twitter,
    Instagram,
}

impl ProxyTarget {
    fn platform(self) -> Platform {
        match self {
            ProxyTarget::Twitter => Platform::Twitter,
            ProxyTarget::Instagram => Platform::Instagram,
        }
    }

    fn missing_credential_message(self) -> &'static str {
        match self {
            ProxyTarget::Twitter => "Twitter Bearer Token not configured",
            ProxyTarget::Instagram => "Instagram Access Token not configured",
        }
    }

    fn missing_identifier_message(self) -> &'static str {
        match self {
            ProxyTarget::Twitter => "Username parameter is required",
            ProxyTarget::Instagram => "User ID parameter is required",
        }
    }
}

enum Upstream<'a> {
    Twitter(&'a TwitterClient),
    Instagram(&'a InstagramClient),
}

impl Upstream<'_> {
    fn for_target(state: &ProxyState, target: ProxyTarget) -> Option<Upstream<'_>> {
        match target {
            ProxyTarget::Twitter => state.twitter.as_deref().map(Upstream::Twitter),
            ProxyTarget::Instagram => state.instagram.as_deref().map(Upstream::Instagram),
        }
    }

    async fn lookup(&self, request: &StatRequest) -> Result<Value, UpstreamError> {
        match self {
            Upstream::Twitter(client) => client.lookup_user(request.identifier()).await,
            Upstream::Instagram(client) => client.lookup_user(request.identifier()).await,
        }
    }
}

/// Status plus optional JSON body. A `None` body is sent empty.
#[derive(Debug)]
pub(super) struct ProxyReply {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl ProxyReply {
    fn empty(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    fn error(status: StatusCode, error: impl Into<Value>) -> Self {
        Self::json(status, json!({ "error": error.into() }))
    }
}

impl IntoResponse for ProxyReply {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}

/// Handles one proxy request. Identifiers are never logged.
pub(super) async fn handle(
    state: &ProxyState,
    target: ProxyTarget,
    method: &Method,
    identifier: Option<&str>,
) -> ProxyReply {
    let platform = target.platform();

    if method == Method::OPTIONS {
        return ProxyReply::empty(StatusCode::OK);
    }

    if method != Method::GET {
        tracing::debug!(platform = %platform, method = %method, "rejected proxy method");
        return ProxyReply::error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
    }

    let Some(upstream) = Upstream::for_target(state, target) else {
        tracing::error!(platform = %platform, "proxy credential not configured");
        return ProxyReply::error(
            StatusCode::INTERNAL_SERVER_ERROR,
            target.missing_credential_message(),
        );
    };

    let Some(request) = StatRequest::new(platform, identifier) else {
        tracing::debug!(platform = %platform, "proxy request missing identifier");
        return ProxyReply::error(StatusCode::BAD_REQUEST, target.missing_identifier_message());
    };

    match upstream.lookup(&request).await {
        Ok(body) => ProxyReply::json(StatusCode::OK, body),
        Err(UpstreamError::Status { status, body }) => {
            tracing::warn!(
                platform = %platform,
                status = %status,
                "upstream returned error status"
            );
            ProxyReply::error(status, body)
        }
        Err(e) => {
            tracing::error!(platform = %platform, error = %e, "proxy upstream call failed");
            ProxyReply::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch data from upstream",
            )
        }
    }
}
