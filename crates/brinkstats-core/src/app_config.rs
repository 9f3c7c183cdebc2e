use std::net::SocketAddr;
use std::time::Duration;

pub(crate) const DEFAULT_TWITTER_USERNAME: &str = "BGodbless25";
pub(crate) const DEFAULT_YOUTUBE_CHANNEL: &str = "@brinkwithGodbless";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub upstream_timeout_secs: u64,
    /// Base URL of a deployed proxy. When set, the aggregator reaches the
    /// Twitter and Instagram upstreams through it instead of directly.
    pub proxy_url: Option<String>,
    pub credentials: PlatformCredentials,
}

impl AppConfig {
    #[must_use]
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .field("proxy_url", &self.proxy_url)
            .field("credentials", &self.credentials)
            .finish()
    }
}

fn redact(secret: Option<&String>) -> Option<&'static str> {
    secret.map(|_| "[redacted]")
}

/// Per-platform credentials and account identifiers.
///
/// Every field is optional at load time: an absent credential means the
/// platform is not configured, which is a valid state.
#[derive(Debug, Clone, Default)]
pub struct PlatformCredentials {
    pub twitter: TwitterCredentials,
    pub instagram: InstagramCredentials,
    pub youtube: YoutubeCredentials,
    pub linkedin: LinkedinCredentials,
    pub spotify: SpotifyCredentials,
}

#[derive(Clone)]
pub struct TwitterCredentials {
    pub bearer_token: Option<String>,
    pub username: String,
}

impl Default for TwitterCredentials {
    fn default() -> Self {
        Self {
            bearer_token: None,
            username: DEFAULT_TWITTER_USERNAME.to_string(),
        }
    }
}

impl std::fmt::Debug for TwitterCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterCredentials")
            .field("bearer_token", &redact(self.bearer_token.as_ref()))
            .field("username", &self.username)
            .finish()
    }
}

#[derive(Clone, Default)]
pub struct InstagramCredentials {
    pub access_token: Option<String>,
    pub user_id: Option<String>,
}

impl std::fmt::Debug for InstagramCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstagramCredentials")
            .field("access_token", &redact(self.access_token.as_ref()))
            .field("user_id", &self.user_id)
            .finish()
    }
}

#[derive(Clone)]
pub struct YoutubeCredentials {
    pub api_key: Option<String>,
    /// Channel handle (`@name`) or raw channel id.
    pub channel: String,
}

impl Default for YoutubeCredentials {
    fn default() -> Self {
        Self {
            api_key: None,
            channel: DEFAULT_YOUTUBE_CHANNEL.to_string(),
        }
    }
}

impl std::fmt::Debug for YoutubeCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YoutubeCredentials")
            .field("api_key", &redact(self.api_key.as_ref()))
            .field("channel", &self.channel)
            .finish()
    }
}

#[derive(Clone, Default)]
pub struct LinkedinCredentials {
    pub access_token: Option<String>,
    pub company_id: Option<String>,
}

impl std::fmt::Debug for LinkedinCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkedinCredentials")
            .field("access_token", &redact(self.access_token.as_ref()))
            .field("company_id", &self.company_id)
            .finish()
    }
}

#[derive(Clone, Default)]
pub struct SpotifyCredentials {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub show_id: Option<String>,
}

impl std::fmt::Debug for SpotifyCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotifyCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &redact(self.client_secret.as_ref()))
            .field("show_id", &self.show_id)
            .finish()
    }
}
