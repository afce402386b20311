//! Station and cycle-path data feed.
//!
//! Fetches the real-time V'Lille station layer (and optionally a cycle-path
//! layer) from the metropolitan WFS geoservice as GeoJSON, validates every
//! feature into domain types, and keeps the latest snapshot in a
//! [`StationRegistry`] that is refreshed in the background.

mod cache;
mod client;
mod convert;
mod error;
mod file;
mod registry;
mod source;
mod types;

pub use cache::{CachedSnapshot, SnapshotCache, SnapshotCacheConfig};
pub use client::{DEFAULT_STATIONS_LAYER, FeedClient, FeedConfig};
pub use convert::{ConversionError, Converted, Rejected, convert_path, convert_paths, convert_station, convert_stations};
pub use error::FeedError;
pub use file::FileFeed;
pub use registry::{NetworkSnapshot, SnapshotOrigin, StationRegistry};
pub use source::FeedSource;
pub use types::{Feature, FeatureCollection, Geometry};
