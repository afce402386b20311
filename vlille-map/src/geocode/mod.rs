//! Free-text address lookup.
//!
//! Resolves a street or place typed by the user to a [`Point`] using the
//! French national address API, so nearby stations can be ranked around
//! it. Results are cached in memory.
//!
//! [`Point`]: crate::domain::Point

mod cache;
mod client;
mod error;

pub use cache::{CachedGeocoder, GeocodeCacheConfig};
pub use client::{GeocodedPlace, GeocoderClient, GeocoderConfig};
pub use error::GeocodeError;
