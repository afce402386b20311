//! Application configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::Threshold;
use crate::feed::{FeedConfig, SnapshotCacheConfig};
use crate::geocode::GeocoderConfig;
use crate::nearby::DistanceMetric;
use crate::search::SearchConfig;

/// Default listen address, 127.0.0.1:3000.
const DEFAULT_BIND: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);

/// Default feed refresh interval. V'Lille updates availability about
/// once a minute.
const DEFAULT_REFRESH_SECS: u64 = 60;

/// Error for an environment variable that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {var}={value}: {reason}")]
pub struct ConfigError {
    var: &'static str,
    value: String,
    reason: String,
}

/// Everything `main` needs to wire the server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: SocketAddr,
    pub feed: FeedConfig,
    /// Read GeoJSON from this directory instead of the live geoservice
    pub feed_dir: Option<PathBuf>,
    pub geocoder: GeocoderConfig,
    pub refresh_interval: Duration,
    pub cache: SnapshotCacheConfig,
    pub static_dir: PathBuf,
    pub search: SearchConfig,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`; unset or blank variables take
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind: SocketAddr = parse_or(get("VLILLE_BIND"), "VLILLE_BIND", SocketAddr::from(DEFAULT_BIND))?;

        let mut feed = FeedConfig::new().with_paths_layer(get("VLILLE_PATHS_LAYER"));
        if let Some(url) = get("VLILLE_FEED_URL") {
            feed = feed.with_base_url(url);
        }
        if let Some(layer) = get("VLILLE_STATIONS_LAYER") {
            feed = feed.with_stations_layer(layer);
        }

        let mut geocoder = GeocoderConfig::new();
        if let Some(url) = get("VLILLE_GEOCODER_URL") {
            geocoder = geocoder.with_base_url(url);
        }

        let refresh_secs: u64 =
            parse_or(get("VLILLE_REFRESH_SECS"), "VLILLE_REFRESH_SECS", DEFAULT_REFRESH_SECS)?;
        if refresh_secs == 0 {
            return Err(ConfigError {
                var: "VLILLE_REFRESH_SECS",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let defaults = SearchConfig::default();
        let metric: DistanceMetric = parse_or(get("VLILLE_METRIC"), "VLILLE_METRIC", defaults.metric)?;
        let nearest_count: usize =
            parse_or(get("VLILLE_NEAREST"), "VLILLE_NEAREST", defaults.nearest_count)?;
        let threshold_value: f64 =
            parse_or(get("VLILLE_THRESHOLD"), "VLILLE_THRESHOLD", defaults.threshold.value())?;
        let threshold = Threshold::new(threshold_value).map_err(|e| ConfigError {
            var: "VLILLE_THRESHOLD",
            value: threshold_value.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            bind,
            feed,
            feed_dir: get("VLILLE_FEED_DIR").map(PathBuf::from),
            geocoder,
            refresh_interval: Duration::from_secs(refresh_secs),
            cache: SnapshotCacheConfig::new(
                get("VLILLE_CACHE_PATH").unwrap_or_else(|| "stations_cache.json".to_string()),
            ),
            static_dir: PathBuf::from(get("VLILLE_STATIC_DIR").unwrap_or_else(|| "static".to_string())),
            search: SearchConfig::new(
                nearest_count,
                threshold,
                metric,
                defaults.max_results.max(nearest_count),
            ),
        })
    }
}

/// Parse `value` if set, otherwise use `default`.
fn parse_or<T>(value: Option<String>, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(v) => v.trim().parse().map_err(|e: T::Err| ConfigError {
            var,
            reason: e.to_string(),
            value: v,
        }),
        None => Ok(default),
    }
}
