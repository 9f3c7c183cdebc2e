//! Two deployment shapes for the same proxy handlers.
//!
//! The long-running server carries the identifier as a path segment
//! (`/api/twitter/user/{username}`). The single-route function shape carries
//! it as a query parameter (`/api/twitter-user?username=`). Both delegate to
//! [`proxy::handle`].

use axum::{
    extract::{Path, Query, State},
    http::Method,
};
use serde::Deserialize;

use super::proxy::{self, ProxyReply, ProxyTarget};
use super::AppState;

#[derive(Debug, Deserialize)]
pub(super) struct TwitterQuery {
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct InstagramQuery {
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

pub(super) async fn server_twitter(
    State(state): State<AppState>,
    method: Method,
    Path(username): Path<String>,
) -> ProxyReply {
    proxy::handle(&state.proxy, ProxyTarget::Twitter, &method, Some(username.as_str())).await
}

pub(super) async fn server_twitter_without_username(
    State(state): State<AppState>,
    method: Method,
) -> ProxyReply {
    proxy::handle(&state.proxy, ProxyTarget::Twitter, &method, None).await
}

pub(super) async fn server_instagram(
    State(state): State<AppState>,
    method: Method,
    Path(user_id): Path<String>,
) -> ProxyReply {
    proxy::handle(&state.proxy, ProxyTarget::Instagram, &method, Some(user_id.as_str())).await
}

pub(super) async fn server_instagram_without_user_id(
    State(state): State<AppState>,
    method: Method,
) -> ProxyReply {
    proxy::handle(&state.proxy, ProxyTarget::Instagram, &method, None).await
}

pub(super) async fn function_twitter(
    State(state): State<AppState>,
    method: Method,
    Query(query): Query<TwitterQuery>,
) -> ProxyReply {
    proxy::handle(
        &state.proxy,
        ProxyTarget::Twitter,
        &method,
        query.username.as_deref(),
    )
    .await
}

pub(super) async fn function_instagram(
    State(state): State<AppState>,
    method: Method,
    Query(query): Query<InstagramQuery>,
) -> ProxyReply {
    proxy::handle(
        &state.proxy,
        ProxyTarget::Instagram,
        &method,
        query.user_id.as_deref(),
    )
    .await
}
