//! Geographic point type.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A WGS84 coordinate in decimal degrees.
///
/// Both components are finite and inside their valid ranges. This type
/// guarantees that any `Point` value is valid by construction.
///
/// # Examples
///
/// ```
/// use vlille_map::domain::Point;
///
/// let lille = Point::new(50.62925, 3.057256).unwrap();
/// assert_eq!(lille.lat(), 50.62925);
///
/// // Out of range is rejected
/// assert!(Point::new(91.0, 0.0).is_err());
/// assert!(Point::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoint", into = "RawPoint")]
pub struct Point {
    lat: f64,
    lon: f64,
}

impl Point {
    /// Create a point from latitude and longitude.
    pub fn new(lat: f64, lon: f64) -> Result<Self, DomainError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::InvalidLatitude(lat));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(DomainError::InvalidLongitude(lon));
        }
        Ok(Self { lat, lon })
    }

    /// Create a point from literal coordinates known to be in range.
    pub(crate) const fn from_trusted(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Create a point from a GeoJSON position (`[lon, lat]` order).
    pub fn from_lon_lat(lon: f64, lat: f64) -> Result<Self, DomainError> {
        Self::new(lat, lon)
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({}, {})", self.lat, self.lon)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lon)
    }
}

/// Unvalidated serde form of a point.
#[derive(Serialize, Deserialize)]
struct RawPoint {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawPoint> for Point {
    type Error = DomainError;

    fn try_from(raw: RawPoint) -> Result<Self, Self::Error> {
        Point::new(raw.lat, raw.lon)
    }
}

impl From<Point> for RawPoint {
    fn from(p: Point) -> Self {
        RawPoint {
            lat: p.lat,
            lon: p.lon,
        }
    }
}
