//! WFS client for the metropolitan open-data geoservice.

use tracing::info;

use crate::domain::{CyclePath, Station};

use super::convert::{Converted, convert_paths, convert_stations};
use super::error::FeedError;
use super::types::FeatureCollection;

/// Default base URL of the geoservice.
const DEFAULT_BASE_URL: &str = "https://data.lillemetropole.fr";

/// Real-time V'Lille station layer.
pub const DEFAULT_STATIONS_LAYER: &str = "dsp_ilevia:vlille_temps_reel";

/// Configuration for the WFS client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Base URL (the `/geoserver/wfs` path is appended)
    pub base_url: String,
    /// Layer (WFS type name) holding the stations
    pub stations_layer: String,
    /// Layer holding cycle paths; `None` disables paths
    pub paths_layer: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FeedConfig {
    /// Create a config pointing at the production geoservice.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            stations_layer: DEFAULT_STATIONS_LAYER.to_string(),
            paths_layer: None,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_stations_layer(mut self, layer: impl Into<String>) -> Self {
        self.stations_layer = layer.into();
        self
    }

    pub fn with_paths_layer(mut self, layer: Option<String>) -> Self {
        self.paths_layer = layer;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the WFS GetFeature endpoint.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    config: FeedConfig,
}

impl FeedClient {
    /// Create a new WFS client.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("vlille-map/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Fetch and convert the station layer.
    pub async fn fetch_stations(&self) -> Result<Converted<Station>, FeedError> {
        let collection = self.get_layer(&self.config.stations_layer).await?;
        let converted = convert_stations(&collection);
        info!(
            layer = %self.config.stations_layer,
            stations = converted.items.len(),
            rejected = converted.rejected.len(),
            "fetched stations"
        );
        Ok(converted)
    }

    /// Fetch and convert the cycle-path layer, if one is configured.
    pub async fn fetch_paths(&self) -> Result<Converted<CyclePath>, FeedError> {
        let Some(layer) = &self.config.paths_layer else {
            return Ok(Converted::empty());
        };

        let collection = self.get_layer(layer).await?;
        let converted = convert_paths(&collection);
        info!(
            layer = %layer,
            paths = converted.items.len(),
            rejected = converted.rejected.len(),
            "fetched cycle paths"
        );
        Ok(converted)
    }

    /// Run a GetFeature request for one layer.
    async fn get_layer(&self, layer: &str) -> Result<FeatureCollection, FeedError> {
        let url = wfs_url(&self.config.base_url);

        let response = self
            .http
            .get(&url)
            .query(&get_feature_query(layer))
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;
        parse_collection(&body)
    }
}

/// WFS endpoint under a base URL.
fn wfs_url(base_url: &str) -> String {
    format!("{}/geoserver/wfs", base_url.trim_end_matches('/'))
}

/// Query parameters of a GeoJSON GetFeature request.
fn get_feature_query(layer: &str) -> [(&'static str, &str); 5] {
    [
        ("SERVICE", "WFS"),
        ("REQUEST", "GetFeature"),
        ("VERSION", "2.0.0"),
        ("TYPENAMES", layer),
        ("OUTPUTFORMAT", "json"),
    ]
}

/// Parse a GeoJSON body into a feature collection.
pub(crate) fn parse_collection(body: &str) -> Result<FeatureCollection, FeedError> {
    serde_json::from_str(body).map_err(|e| FeedError::Json {
        message: e.to_string(),
    })
}
