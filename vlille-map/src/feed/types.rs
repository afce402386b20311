//! GeoJSON DTOs for the WFS and geocoder responses.
//!
//! These mirror the wire format loosely on purpose: features are kept as
//! raw JSON until conversion, so one malformed feature is rejected on its
//! own instead of failing the whole collection.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A GeoJSON FeatureCollection with unparsed features.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Value>,
}

/// A single GeoJSON feature.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Feature {
    /// Feature id (string or number in practice)
    #[serde(default)]
    pub id: Option<Value>,

    #[serde(default)]
    pub geometry: Option<Geometry>,

    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

/// The geometry kinds we know how to draw.
///
/// Coordinates stay as raw JSON and are validated during conversion.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        #[serde(default)]
        coordinates: Value,
    },
    LineString {
        #[serde(default)]
        coordinates: Value,
    },
    MultiLineString {
        #[serde(default)]
        coordinates: Value,
    },
    #[serde(other)]
    Unsupported,
}
