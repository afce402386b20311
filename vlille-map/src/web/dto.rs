//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Point;
use crate::feed::SnapshotOrigin;
use crate::geocode::GeocodedPlace;
use crate::nearby::DistanceMetric;
use crate::view::{Bounds, Marker, Polyline};

/// Every station in the current snapshot.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    /// When the snapshot was fetched
    pub fetched_at: DateTime<Utc>,

    /// "live", "cache" or "empty"
    pub origin: &'static str,

    /// Features dropped by the last conversion
    pub rejected: usize,

    /// Box around all stations, absent when there are none
    pub bounds: Option<Bounds>,

    pub stations: Vec<Marker>,
}

/// Cycle paths of the current snapshot.
#[derive(Debug, Serialize)]
pub struct PathsResponse {
    pub paths: Vec<Polyline>,
}

/// Request for the stations nearest a point.
#[derive(Debug, Deserialize)]
pub struct NearestRequest {
    pub lat: Option<f64>,
    pub lon: Option<f64>,

    /// How many stations to return (defaults to the configured count)
    pub k: Option<usize>,

    /// "planar" or "haversine" (defaults to the configured metric)
    pub metric: Option<String>,

    /// Only stations within this distance, in the metric's unit
    pub radius: Option<f64>,
}

/// Stations ranked by distance from a reference point.
#[derive(Debug, Serialize)]
pub struct NearestResponse {
    pub reference: Point,
    pub metric: DistanceMetric,

    /// Unit of every `distance` in `stations`
    pub unit: &'static str,

    pub stations: Vec<Marker>,
}

/// Request to search stations by name.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Free-text query; typos are tolerated
    #[serde(default)]
    pub q: String,

    /// Fuzzy tolerance in [0, 1]
    pub threshold: Option<f64>,

    /// Optional reference point to rank matches by distance
    pub lat: Option<f64>,
    pub lon: Option<f64>,

    pub limit: Option<usize>,
}

/// Name search results.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub threshold: f64,

    /// Matches, best first; nearest first when a reference point was given
    pub stations: Vec<Marker>,

    /// Closest match to the reference point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best: Option<Marker>,
}

/// Request to geocode an address and find stations near it.
#[derive(Debug, Deserialize)]
pub struct LocateRequest {
    #[serde(default)]
    pub q: String,
    pub k: Option<usize>,
}

/// A geocoded place and the stations nearest to it.
#[derive(Debug, Serialize)]
pub struct LocateResponse {
    pub place: GeocodedPlace,
    pub metric: DistanceMetric,
    pub unit: &'static str,
    pub stations: Vec<Marker>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

pub(crate) fn origin_label(origin: SnapshotOrigin) -> &'static str {
    match origin {
        SnapshotOrigin::Live => "live",
        SnapshotOrigin::Cache => "cache",
        SnapshotOrigin::Empty => "empty",
    }
}
