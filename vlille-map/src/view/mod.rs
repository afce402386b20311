//! Map view model.
//!
//! The browser draws the map with Leaflet; this module decides what it
//! draws: the initial view, station markers and cycle-path polylines.

mod map;

pub use map::{Bounds, MapView, Marker, MarkerStatus, Polyline};
