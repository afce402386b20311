//! In-memory cache for geocoder lookups.
//!
//! Users retype the same streets a lot, and the address API is rate
//! limited per IP. Lookups are keyed by the normalized query plus the
//! rounded bias point, so "Rue  Faidherbe" and "rue faidherbe" share an
//! entry. Misses ("nothing found") are cached too.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::Point;
use crate::search::normalize;

use super::client::{GeocodedPlace, GeocoderClient};
use super::error::GeocodeError;

/// Configuration for the geocoder cache.
#[derive(Debug, Clone)]
pub struct GeocodeCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for GeocodeCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 1000,
        }
    }
}

/// Geocoder client with caching.
pub struct CachedGeocoder {
    client: GeocoderClient,
    places: MokaCache<String, Option<GeocodedPlace>>,
}

impl CachedGeocoder {
    pub fn new(client: GeocoderClient, config: &GeocodeCacheConfig) -> Self {
        let places = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { client, places }
    }

    /// Resolve free text, using the cache if available.
    ///
    /// Errors are not cached.
    pub async fn locate(
        &self,
        query: &str,
        near: Option<Point>,
    ) -> Result<Option<GeocodedPlace>, GeocodeError> {
        let key = cache_key(query, near);

        if let Some(hit) = self.places.get(&key).await {
            debug!(key = %key, "geocoder cache hit");
            return Ok(hit);
        }

        let place = self.client.locate(query, near).await?;
        self.places.insert(key, place.clone()).await;
        Ok(place)
    }
}

/// Normalized query plus the bias point rounded to ~100 m.
fn cache_key(query: &str, near: Option<Point>) -> String {
    let query = normalize(query);
    match near {
        Some(p) => format!("{query}|{:.3},{:.3}", p.lat(), p.lon()),
        None => query,
    }
}
