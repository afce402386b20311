//! Address API client.

use serde::Serialize;

use crate::domain::Point;
use crate::feed::{Feature, FeatureCollection, Geometry};

use super::error::GeocodeError;

/// Default base URL of the national address API.
const DEFAULT_BASE_URL: &str = "https://api-adresse.data.gouv.fr";

/// Configuration for the geocoder client.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    /// Base URL (the `/search/` path is appended)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GeocoderConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A resolved address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodedPlace {
    /// Full label, e.g. "Rue Faidherbe 59000 Lille"
    pub label: String,
    pub location: Point,
    /// Geocoder confidence in [0, 1], when given
    pub score: Option<f64>,
}

/// Client for the address search endpoint.
#[derive(Debug, Clone)]
pub struct GeocoderClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeocoderClient {
    pub fn new(config: GeocoderConfig) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("vlille-map/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Resolve free text to the best matching place.
    ///
    /// `near` biases results towards a location. `Ok(None)` means the
    /// geocoder found nothing.
    pub async fn locate(
        &self,
        query: &str,
        near: Option<Point>,
    ) -> Result<Option<GeocodedPlace>, GeocodeError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        let url = format!("{}/search/", self.base_url.trim_end_matches('/'));
        let mut params = vec![("q", query.to_string()), ("limit", "1".to_string())];
        if let Some(p) = near {
            params.push(("lat", p.lat().to_string()));
            params.push(("lon", p.lon().to_string()));
        }

        let response = self.http.get(&url).query(&params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}

/// Pick the first feature with a usable point and label.
fn parse_response(body: &str) -> Result<Option<GeocodedPlace>, GeocodeError> {
    let collection: FeatureCollection = serde_json::from_str(body).map_err(|e| GeocodeError::Json {
        message: e.to_string(),
    })?;

    Ok(collection
        .features
        .into_iter()
        .filter_map(|raw| serde_json::from_value::<Feature>(raw).ok())
        .find_map(|f| place_from_feature(&f)))
}

fn place_from_feature(feature: &Feature) -> Option<GeocodedPlace> {
    let Some(Geometry::Point { coordinates }) = &feature.geometry else {
        return None;
    };
    let coords = coordinates.as_array()?;
    let (lon, lat) = (coords.first()?.as_f64()?, coords.get(1)?.as_f64()?);
    let location = Point::from_lon_lat(lon, lat).ok()?;

    let props = feature.properties.as_ref()?;
    let label = props.get("label")?.as_str()?.trim();
    if label.is_empty() {
        return None;
    }
    let score = props.get("score").and_then(|s| s.as_f64());

    Some(GeocodedPlace {
        label: label.to_string(),
        location,
        score,
    })
}
