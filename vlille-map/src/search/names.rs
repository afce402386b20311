//! Fuzzy station-name search.

use serde::Serialize;

use crate::domain::{Point, RankedStation, Station, Threshold};
use crate::nearby::{DistanceMetric, nearest_with};

use super::fuzzy::FuzzyQuery;

/// A station that matched a query, with its match score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredStation {
    pub station: Station,
    /// Normalized score in [0, 1], lower is better
    pub score: f64,
}

/// Stations whose name approximately matches `query`, best match first.
///
/// A station is kept when its score is within `threshold`; at
/// [`Threshold::EXACT`] only names equal to the query (ignoring case and
/// spacing) are kept. Results are ordered by score, ties in input order.
/// The score already charges a longer name for the characters the query
/// does not cover, which is what puts a full-name match ahead of names
/// that merely contain it. A blank query or no match gives an empty list.
pub fn search(query: &str, stations: &[Station], threshold: Threshold) -> Vec<Station> {
    search_scored(query, stations, threshold)
        .into_iter()
        .map(|m| m.station)
        .collect()
}

/// Like [`search`], keeping the score of every match.
pub fn search_scored(query: &str, stations: &[Station], threshold: Threshold) -> Vec<ScoredStation> {
    let Some(query) = FuzzyQuery::new(query) else {
        return Vec::new();
    };

    let mut matches: Vec<(f64, &Station)> = stations
        .iter()
        .map(|s| (query.score(&s.name), s))
        .filter(|(score, _)| threshold.accepts(*score))
        .collect();

    // Stable: equal scores keep input order
    matches.sort_by(|(a, _), (b, _)| a.total_cmp(b));

    matches
        .into_iter()
        .map(|(score, s)| ScoredStation {
            station: s.clone(),
            score,
        })
        .collect()
}

/// Fuzzy-filter by name, then rank the matches by distance from
/// `reference`, nearest first.
pub fn search_near(
    query: &str,
    stations: &[Station],
    threshold: Threshold,
    reference: &Point,
    metric: DistanceMetric,
) -> Vec<RankedStation> {
    let matches = search(query, stations, threshold);
    nearest_with(metric, reference, &matches, matches.len())
}

/// The single closest station among those matching `query`.
///
/// `None` means no station name matched.
pub fn best_match_near(
    query: &str,
    stations: &[Station],
    threshold: Threshold,
    reference: &Point,
    metric: DistanceMetric,
) -> Option<RankedStation> {
    let matches = search(query, stations, threshold);
    nearest_with(metric, reference, &matches, 1).into_iter().next()
}
