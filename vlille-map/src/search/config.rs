//! Defaults for station lookups.

use crate::domain::Threshold;
use crate::nearby::DistanceMetric;

/// Default parameters for nearest-station and name search requests.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// How many stations a nearest-station query returns.
    pub nearest_count: usize,

    /// Fuzzy-match tolerance for name search.
    pub threshold: Threshold,

    /// Metric used to rank by distance.
    pub metric: DistanceMetric,

    /// Upper bound on results a single request may ask for.
    pub max_results: usize,
}

impl SearchConfig {
    pub fn new(
        nearest_count: usize,
        threshold: Threshold,
        metric: DistanceMetric,
        max_results: usize,
    ) -> Self {
        Self {
            nearest_count,
            threshold,
            metric,
            max_results,
        }
    }

    /// Clamp a requested result count to `max_results`, falling back to
    /// `nearest_count` when none was given.
    pub fn result_count(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.nearest_count)
            .min(self.max_results)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            nearest_count: 5,
            threshold: Threshold::default(),
            metric: DistanceMetric::Planar,
            max_results: 20,
        }
    }
}
