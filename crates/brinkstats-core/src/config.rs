use thiserror::Error;

use crate::app_config::{
    AppConfig, Environment, InstagramCredentials, LinkedinCredentials, PlatformCredentials,
    SpotifyCredentials, TwitterCredentials, YoutubeCredentials, DEFAULT_TWITTER_USERNAME,
    DEFAULT_YOUTUBE_CHANNEL,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// No credential is required. Empty or whitespace-only values are treated as
/// unset so that a blank line in `.env` reads as "not configured".
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        optional(var).unwrap_or_else(|| default.to_string())
    };

    let bind_addr = {
        let var = "BRINKSTATS_BIND_ADDR";
        or_default(var, "0.0.0.0:3001")
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?
    };

    let upstream_timeout_secs = {
        let var = "BRINKSTATS_UPSTREAM_TIMEOUT_SECS";
        let secs = or_default(var, "5")
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if secs == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "timeout must be at least one second".to_string(),
            });
        }
        secs
    };

    let env = parse_environment(&or_default("BRINKSTATS_ENV", "development"));
    let log_level = or_default("BRINKSTATS_LOG_LEVEL", "info");
    let proxy_url = optional("BRINKSTATS_PROXY_URL");

    let credentials = PlatformCredentials {
        twitter: TwitterCredentials {
            bearer_token: optional("TWITTER_BEARER_TOKEN"),
            username: or_default("TWITTER_USERNAME", DEFAULT_TWITTER_USERNAME),
        },
        instagram: InstagramCredentials {
            access_token: optional("INSTAGRAM_ACCESS_TOKEN"),
            user_id: optional("INSTAGRAM_USER_ID"),
        },
        youtube: YoutubeCredentials {
            api_key: optional("YOUTUBE_API_KEY"),
            channel: or_default("YOUTUBE_CHANNEL_ID", DEFAULT_YOUTUBE_CHANNEL),
        },
        linkedin: LinkedinCredentials {
            access_token: optional("LINKEDIN_ACCESS_TOKEN"),
            company_id: optional("LINKEDIN_COMPANY_ID"),
        },
        spotify: SpotifyCredentials {
            client_id: optional("SPOTIFY_CLIENT_ID"),
            client_secret: optional("SPOTIFY_CLIENT_SECRET"),
            show_id: optional("SPOTIFY_SHOW_ID"),
        },
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        upstream_timeout_secs,
        proxy_url,
        credentials,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
