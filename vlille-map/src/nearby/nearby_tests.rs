//! Property tests for nearest-station ranking.

use proptest::prelude::*;

use super::*;
use crate::domain::{Point, Station, StationId};

/// Stations scattered over the Lille metropolitan area.
fn stations() -> impl Strategy<Value = Vec<Station>> {
    prop::collection::vec((50.55f64..50.75, 2.95f64..3.20), 0..40).prop_map(|coords| {
        coords
            .into_iter()
            .enumerate()
            .map(|(i, (lat, lon))| {
                Station::new(
                    StationId::parse(&i.to_string()).unwrap(),
                    &format!("Station {i}"),
                    Point::new(lat, lon).unwrap(),
                    None,
                )
                .unwrap()
            })
            .collect()
    })
}

fn point() -> impl Strategy<Value = Point> {
    (50.55f64..50.75, 2.95f64..3.20).prop_map(|(lat, lon)| Point::new(lat, lon).unwrap())
}

fn metric() -> impl Strategy<Value = DistanceMetric> {
    prop_oneof![Just(DistanceMetric::Planar), Just(DistanceMetric::Haversine)]
}

proptest! {
    /// k <= len returns exactly k results in non-decreasing distance
    #[test]
    fn returns_k_sorted(stations in stations(), p in point(), metric in metric(), k_frac in 0.0f64..=1.0) {
        let k = (stations.len() as f64 * k_frac) as usize;
        let result = nearest_with(metric, &p, &stations, k);

        prop_assert_eq!(result.len(), k);
        for pair in result.windows(2) {
            prop_assert!(pair[0].distance <= pair[1].distance);
        }
    }

    /// k > len returns every station, still sorted
    #[test]
    fn large_k_returns_all(stations in stations(), p in point(), extra in 1usize..10) {
        let k = stations.len() + extra;
        let result = nearest(&p, &stations, k);

        prop_assert_eq!(result.len(), stations.len());
        for pair in result.windows(2) {
            prop_assert!(pair[0].distance <= pair[1].distance);
        }
    }

    /// Empty input always yields empty output
    #[test]
    fn empty_input_is_empty(p in point(), k in 0usize..100) {
        prop_assert!(nearest(&p, &[], k).is_empty());
    }

    /// Distances are non-negative and match the metric
    #[test]
    fn distances_match_metric(stations in stations(), p in point(), metric in metric()) {
        for r in nearest_with(metric, &p, &stations, stations.len()) {
            prop_assert!(r.distance >= 0.0);
            prop_assert_eq!(r.distance, metric.distance(&p, &r.station.location));
        }
    }

    /// No unranked station is closer than the last ranked one
    #[test]
    fn nothing_closer_left_out(stations in stations(), p in point(), k in 1usize..10) {
        let result = nearest(&p, &stations, k);
        if let Some(last) = result.last() {
            let kept: Vec<&StationId> = result.iter().map(|r| &r.station.id).collect();
            for s in stations.iter().filter(|s| !kept.contains(&&s.id)) {
                prop_assert!(planar_distance(&p, &s.location) >= last.distance);
            }
        }
    }
}
