//! HTTP clients for the third-party statistics APIs.
//!
//! Each client knows one platform's URL shape, auth scheme, and where the
//! counts live in its response. Every call is a single attempt; there are no
//! retries.

pub mod error;
mod http;
pub mod instagram;
pub mod linkedin;
pub mod proxy;
pub mod spotify;
pub mod twitter;
pub mod youtube;

pub use error::UpstreamError;
pub use http::{fallback_error_body, read_json, UpstreamEndpoints};
pub use instagram::InstagramClient;
pub use linkedin::LinkedinClient;
pub use proxy::ProxyClient;
pub use spotify::SpotifyClient;
pub use twitter::TwitterClient;
pub use youtube::YoutubeClient;
