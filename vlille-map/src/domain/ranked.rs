//! Distance-ranked station results.

use serde::Serialize;

use super::Station;

/// A station paired with its distance from a reference point.
///
/// Derived and transient: recomputed on every query. The unit of
/// `distance` depends on the metric that produced it (degrees for the
/// planar metric, metres for haversine). Always non-negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedStation {
    pub station: Station,
    pub distance: f64,
}

impl RankedStation {
    pub fn new(station: Station, distance: f64) -> Self {
        Self { station, distance }
    }
}
