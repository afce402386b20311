//! Disk cache for the last good stations and cycle paths.
//!
//! Lets the server start with slightly stale data when the geoservice is
//! down at boot.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{CyclePath, Station};

use super::error::FeedError;

/// Default cache TTL: 24 hours.
const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Cached station data with metadata.
#[derive(Debug, Serialize, Deserialize)]
struct CachedStations {
    /// When the stations were fetched.
    cached_at: DateTime<Utc>,
    /// The cached station data.
    stations: Vec<Station>,
    /// Cycle paths; absent in caches written without them.
    #[serde(default)]
    paths: Vec<CyclePath>,
}

/// Stations and paths loaded back from the cache.
#[derive(Debug, Clone)]
pub struct CachedSnapshot {
    pub cached_at: DateTime<Utc>,
    pub stations: Vec<Station>,
    pub paths: Vec<CyclePath>,
}

/// Configuration for the snapshot disk cache.
#[derive(Debug, Clone)]
pub struct SnapshotCacheConfig {
    /// Path to the cache file.
    pub path: PathBuf,
    /// How long the cache remains valid.
    pub ttl: Duration,
}

impl SnapshotCacheConfig {
    /// Create a new cache config with the given path and default TTL (24 hours).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for SnapshotCacheConfig {
    fn default() -> Self {
        Self::new("stations_cache.json")
    }
}

/// Disk cache for station snapshots.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    config: SnapshotCacheConfig,
}

impl SnapshotCache {
    pub fn new(config: SnapshotCacheConfig) -> Self {
        Self { config }
    }

    /// Try to load stations from the cache.
    ///
    /// Returns `None` if the cache doesn't exist, is invalid, or has expired.
    pub fn load(&self) -> Option<CachedSnapshot> {
        let contents = std::fs::read_to_string(&self.config.path).ok()?;
        let cached: CachedStations = serde_json::from_str(&contents).ok()?;

        let age = Utc::now()
            .signed_duration_since(cached.cached_at)
            .to_std()
            .unwrap_or_default();
        if age >= self.config.ttl {
            return None;
        }

        Some(CachedSnapshot {
            cached_at: cached.cached_at,
            stations: cached.stations,
            paths: cached.paths,
        })
    }

    /// Save stations and paths to the cache, stamped with `fetched_at`.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(
        &self,
        stations: &[Station],
        paths: &[CyclePath],
        fetched_at: DateTime<Utc>,
    ) -> Result<(), FeedError> {
        let cached = CachedStations {
            cached_at: fetched_at,
            stations: stations.to_vec(),
            paths: paths.to_vec(),
        };

        if let Some(parent) = self.config.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| FeedError::Cache {
                message: format!("failed to create cache directory: {}", e),
            })?;
        }

        let json = serde_json::to_string(&cached).map_err(|e| FeedError::Cache {
            message: format!("failed to serialize cache: {}", e),
        })?;

        std::fs::write(&self.config.path, json).map_err(|e| FeedError::Cache {
            message: format!("failed to write cache file: {}", e),
        })?;

        Ok(())
    }

    /// Get the cache file path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Point, StationId};
    use tempfile::tempdir;

    fn stations() -> Vec<Station> {
        vec![
            Station::new(
                StationId::parse("1").unwrap(),
                "Gare Lille Flandres",
                Point::new(50.6365, 3.0708).unwrap(),
                Some(3),
            )
            .unwrap(),
            Station::new(
                StationId::parse("2").unwrap(),
                "Opéra",
                Point::new(50.6372, 3.0631).unwrap(),
                None,
            )
            .unwrap()
            .with_docks(Some(10)),
        ]
    }

    fn paths() -> Vec<CyclePath> {
        let line = vec![
            Point::new(50.6372, 3.0631).unwrap(),
            Point::new(50.6365, 3.0708).unwrap(),
        ];
        vec![CyclePath::new(Some("p1".into()), Some("Rue Faidherbe".into()), vec![line]).unwrap()]
    }

    #[test]
    fn save_and_load_cache() {
        let dir = tempdir().unwrap();
        let cache = SnapshotCache::new(SnapshotCacheConfig::new(dir.path().join("stations.json")));

        let now = Utc::now();
        cache.save(&stations(), &paths(), now).unwrap();

        let loaded = cache.load().unwrap();
        assert_eq!(loaded.stations, stations());
        assert_eq!(loaded.paths, paths());
        assert_eq!(loaded.cached_at, now);
    }

    #[test]
    fn cache_without_paths_still_loads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stations.json");
        let body = serde_json::json!({
            "cached_at": Utc::now(),
            "stations": stations(),
        });
        std::fs::write(&path, body.to_string()).unwrap();

        let loaded = SnapshotCache::new(SnapshotCacheConfig::new(&path)).load().unwrap();
        assert_eq!(loaded.stations.len(), 2);
        assert!(loaded.paths.is_empty());
    }

    #[test]
    fn expired_cache_returns_none() {
        let dir = tempdir().unwrap();
        let config =
            SnapshotCacheConfig::new(dir.path().join("stations.json")).with_ttl(Duration::from_secs(0));
        let cache = SnapshotCache::new(config);

        cache.save(&stations(), &[], Utc::now()).unwrap();

        // With 0 TTL, cache should immediately be expired
        assert!(cache.load().is_none());
    }

    #[test]
    fn old_snapshot_expires() {
        let dir = tempdir().unwrap();
        let cache = SnapshotCache::new(SnapshotCacheConfig::new(dir.path().join("stations.json")));

        let two_days_ago = Utc::now() - chrono::Duration::days(2);
        cache.save(&stations(), &[], two_days_ago).unwrap();
        assert!(cache.load().is_none());
    }

    #[test]
    fn missing_cache_returns_none() {
        let cache = SnapshotCache::new(SnapshotCacheConfig::new("/nonexistent/path/stations.json"));
        assert!(cache.load().is_none());
    }

    #[test]
    fn corrupt_cache_returns_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stations.json");
        std::fs::write(&path, "{not json").unwrap();

        let cache = SnapshotCache::new(SnapshotCacheConfig::new(&path));
        assert!(cache.load().is_none());
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let cache_path = dir.path().join("nested").join("dir").join("stations.json");
        let cache = SnapshotCache::new(SnapshotCacheConfig::new(&cache_path));

        cache.save(&stations(), &[], Utc::now()).unwrap();
        assert!(cache_path.exists());
        assert_eq!(cache.path(), cache_path.as_path());
    }
}
