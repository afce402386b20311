//! Nearest-station lookup.
//!
//! Ranks an in-memory station list by distance from a reference point
//! (the user's location or a geocoded search result). Everything here is a
//! pure function of its inputs: no I/O, no shared state.

mod distance;
mod matcher;

#[cfg(test)]
mod nearby_tests;

pub use distance::{DistanceMetric, UnknownMetric, haversine_distance, planar_distance};
pub use matcher::{nearest, nearest_with, within};
