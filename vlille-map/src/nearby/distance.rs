//! Distance metrics between points.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::Point;

/// Mean Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// How to measure the distance between two points.
///
/// `Planar` is Euclidean distance on raw (lat, lon) degrees. It ignores
/// the shrinking of longitude degrees away from the equator, so it is only
/// a ranking approximation over a single metropolitan area. It is the
/// default because existing clients compare against these values.
/// `Haversine` is the great-circle distance in metres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    #[default]
    Planar,
    Haversine,
}

impl DistanceMetric {
    /// Distance between two points in this metric's unit.
    pub fn distance(&self, a: &Point, b: &Point) -> f64 {
        match self {
            DistanceMetric::Planar => planar_distance(a, b),
            DistanceMetric::Haversine => haversine_distance(a, b),
        }
    }

    /// Unit of the values returned by [`DistanceMetric::distance`].
    pub fn unit(&self) -> &'static str {
        match self {
            DistanceMetric::Planar => "deg",
            DistanceMetric::Haversine => "m",
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceMetric::Planar => f.write_str("planar"),
            DistanceMetric::Haversine => f.write_str("haversine"),
        }
    }
}

/// Error returned when parsing an unknown metric name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown distance metric: {0} (expected planar or haversine)")]
pub struct UnknownMetric(String);

impl FromStr for DistanceMetric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "planar" | "euclidean" => Ok(DistanceMetric::Planar),
            "haversine" => Ok(DistanceMetric::Haversine),
            other => Err(UnknownMetric(other.to_string())),
        }
    }
}

/// Euclidean distance on raw degrees.
pub fn planar_distance(a: &Point, b: &Point) -> f64 {
    let dlat = a.lat() - b.lat();
    let dlon = a.lon() - b.lon();
    (dlat * dlat + dlon * dlon).sqrt()
}

/// Great-circle distance in metres.
pub fn haversine_distance(a: &Point, b: &Point) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let delta_lat = (b.lat() - a.lat()).to_radians();
    let delta_lon = (b.lon() - a.lon()).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1 for antipodal points
    let c = 2.0 * h.min(1.0).sqrt().asin();

    EARTH_RADIUS_M * c
}
