//! Shared data model, configuration, and number formatting for the social
//! statistics proxy and aggregator.

mod app_config;
mod config;
pub mod format;
pub mod stats;

pub use app_config::{
    AppConfig, Environment, InstagramCredentials, LinkedinCredentials, PlatformCredentials,
    SpotifyCredentials, TwitterCredentials, YoutubeCredentials,
};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use format::{format_count, format_whole, PLACEHOLDER_DASH};
pub use stats::{
    AggregatedStats, LiveCounts, Metric, MetricName, Platform, PlatformStats, StatRequest,
    StatResult,
};
