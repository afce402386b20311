//! Nearest-station ranking.

use crate::domain::{Point, RankedStation, Station};

use super::DistanceMetric;

/// The `k` stations closest to `point`, nearest first, using the planar
/// metric.
///
/// Returns fewer than `k` results when there are fewer stations, and an
/// empty list for an empty slice or `k == 0`.
pub fn nearest(point: &Point, stations: &[Station], k: usize) -> Vec<RankedStation> {
    nearest_with(DistanceMetric::Planar, point, stations, k)
}

/// The `k` stations closest to `point` under the given metric.
///
/// Stations at equal distance keep their order from `stations`.
pub fn nearest_with(
    metric: DistanceMetric,
    point: &Point,
    stations: &[Station],
    k: usize,
) -> Vec<RankedStation> {
    if k == 0 {
        return Vec::new();
    }

    let mut ranked = rank_by_distance(metric, point, stations);
    ranked.truncate(k);
    ranked
}

/// All stations within `radius` of `point`, nearest first.
///
/// `radius` is in the metric's unit (degrees for planar, metres for
/// haversine). The boundary is inclusive.
pub fn within(
    metric: DistanceMetric,
    point: &Point,
    stations: &[Station],
    radius: f64,
) -> Vec<RankedStation> {
    let mut ranked = rank_by_distance(metric, point, stations);
    ranked.retain(|r| r.distance <= radius);
    ranked
}

/// Pair every station with its distance and stable-sort ascending.
fn rank_by_distance(metric: DistanceMetric, point: &Point, stations: &[Station]) -> Vec<RankedStation> {
    let mut ranked: Vec<RankedStation> = stations
        .iter()
        .map(|s| RankedStation::new(s.clone(), metric.distance(point, &s.location)))
        .collect();

    // sort_by is stable, so ties keep input order
    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranked
}
