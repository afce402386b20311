//! Live station snapshot.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::domain::{CyclePath, Station};

use super::cache::SnapshotCache;
use super::error::FeedError;
use super::source::FeedSource;

/// Where the current snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOrigin {
    /// Fetched from the feed source
    Live,
    /// Loaded from the disk cache after a failed fetch
    Cache,
    /// Nothing loaded yet
    Empty,
}

/// One complete fetch cycle: every station and path, replaced as a whole.
#[derive(Debug, Clone)]
pub struct NetworkSnapshot {
    pub stations: Vec<Station>,
    pub paths: Vec<CyclePath>,
    pub fetched_at: DateTime<Utc>,
    /// Features dropped during conversion
    pub rejected: usize,
    pub origin: SnapshotOrigin,
}

impl NetworkSnapshot {
    pub fn empty() -> Self {
        Self {
            stations: Vec::new(),
            paths: Vec::new(),
            fetched_at: Utc::now(),
            rejected: 0,
            origin: SnapshotOrigin::Empty,
        }
    }
}

/// Thread-safe holder of the current network snapshot.
///
/// Readers get a cheap `Arc` to an immutable snapshot; a refresh builds a
/// new snapshot and swaps it in.
#[derive(Clone)]
pub struct StationRegistry {
    inner: Arc<RwLock<Arc<NetworkSnapshot>>>,
    source: FeedSource,
    cache: Option<SnapshotCache>,
}

impl StationRegistry {
    /// Create a registry by fetching from the source.
    ///
    /// If the fetch fails and a fresh enough disk cache exists, starts from
    /// the cached stations and paths instead. Otherwise returns the fetch
    /// error.
    pub async fn fetch(source: FeedSource, cache: Option<SnapshotCache>) -> Result<Self, FeedError> {
        let snapshot = match load(&source, &[]).await {
            Ok(snapshot) => {
                save_to_cache(cache.as_ref(), &snapshot);
                snapshot
            }
            Err(e) => {
                let cached = cache.as_ref().and_then(SnapshotCache::load).ok_or(e)?;
                warn!(
                    cached_at = %cached.cached_at,
                    stations = cached.stations.len(),
                    "feed unavailable, starting from disk cache"
                );
                NetworkSnapshot {
                    stations: cached.stations,
                    paths: cached.paths,
                    fetched_at: cached.cached_at,
                    rejected: 0,
                    origin: SnapshotOrigin::Cache,
                }
            }
        };

        Ok(Self {
            inner: Arc::new(RwLock::new(Arc::new(snapshot))),
            source,
            cache,
        })
    }

    /// Create a registry with no data yet.
    pub fn empty(source: FeedSource, cache: Option<SnapshotCache>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(NetworkSnapshot::empty()))),
            source,
            cache,
        }
    }

    /// The current snapshot.
    pub async fn snapshot(&self) -> Arc<NetworkSnapshot> {
        let guard = self.inner.read().await;
        Arc::clone(&guard)
    }

    /// Number of stations in the current snapshot.
    pub async fn len(&self) -> usize {
        self.snapshot().await.stations.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.snapshot().await.stations.is_empty()
    }

    /// Refresh from the source.
    ///
    /// On success, replaces the whole snapshot and returns the station
    /// count; if only the paths failed, the previous paths are kept. On
    /// failure, the existing snapshot is preserved and the error is
    /// returned.
    pub async fn refresh(&self) -> Result<usize, FeedError> {
        let previous = self.snapshot().await;
        let snapshot = load(&self.source, &previous.paths).await?;
        save_to_cache(self.cache.as_ref(), &snapshot);
        let count = snapshot.stations.len();

        let mut guard = self.inner.write().await;
        *guard = Arc::new(snapshot);

        Ok(count)
    }
}

/// Fetch stations and paths concurrently.
///
/// A station failure fails the load; a path failure falls back to
/// `previous_paths`.
async fn load(source: &FeedSource, previous_paths: &[CyclePath]) -> Result<NetworkSnapshot, FeedError> {
    let (stations, paths) = futures::join!(source.fetch_stations(), source.fetch_paths());
    let stations = stations?;

    let (paths, rejected_paths) = match paths {
        Ok(converted) => (converted.items, converted.rejected.len()),
        Err(e) => {
            warn!(
                error = %e,
                kept = previous_paths.len(),
                "failed to fetch cycle paths, keeping previous ones"
            );
            (previous_paths.to_vec(), 0)
        }
    };

    info!(
        source = %source.describe(),
        stations = stations.items.len(),
        paths = paths.len(),
        "loaded network snapshot"
    );

    Ok(NetworkSnapshot {
        rejected: stations.rejected.len() + rejected_paths,
        stations: stations.items,
        paths,
        fetched_at: Utc::now(),
        origin: SnapshotOrigin::Live,
    })
}

fn save_to_cache(cache: Option<&SnapshotCache>, snapshot: &NetworkSnapshot) {
    let Some(cache) = cache else {
        return;
    };
    if let Err(e) = cache.save(&snapshot.stations, &snapshot.paths, snapshot.fetched_at) {
        warn!(path = %cache.path().display(), error = %e, "failed to write station cache");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::cache::SnapshotCacheConfig;
    use crate::feed::file::FileFeed;
    use tempfile::tempdir;

    fn stations_json(names: &[&str]) -> String {
        let features: Vec<String> = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                format!(
                    r#"{{"type":"Feature","id":{i},"geometry":{{"type":"Point","coordinates":[3.06,50.63]}},"properties":{{"nom":"{name}"}}}}"#
                )
            })
            .collect();
        format!(r#"{{"type":"FeatureCollection","features":[{}]}}"#, features.join(","))
    }

    #[tokio::test]
    async fn fetch_loads_snapshot_and_writes_cache() {
        let data = tempdir().unwrap();
        std::fs::write(data.path().join("stations.json"), stations_json(&["Opéra", "Rihour"])).unwrap();
        let cache_path = data.path().join("cache.json");
        let cache = SnapshotCache::new(SnapshotCacheConfig::new(&cache_path));

        let registry = StationRegistry::fetch(FeedSource::Files(FileFeed::new(data.path())), Some(cache))
            .await
            .unwrap();

        let snapshot = registry.snapshot().await;
        assert_eq!(snapshot.stations.len(), 2);
        assert_eq!(snapshot.origin, SnapshotOrigin::Live);
        assert!(cache_path.exists());
    }

    #[tokio::test]
    async fn fetch_falls_back_to_cache() {
        let data = tempdir().unwrap();
        std::fs::write(data.path().join("stations.json"), stations_json(&["Opéra"])).unwrap();
        let cache_config = SnapshotCacheConfig::new(data.path().join("cache.json"));

        // Prime the cache
        StationRegistry::fetch(
            FeedSource::Files(FileFeed::new(data.path())),
            Some(SnapshotCache::new(cache_config.clone())),
        )
        .await
        .unwrap();

        // Point at an empty directory so the feed fails
        let empty = tempdir().unwrap();
        let registry = StationRegistry::fetch(
            FeedSource::Files(FileFeed::new(empty.path())),
            Some(SnapshotCache::new(cache_config)),
        )
        .await
        .unwrap();

        let snapshot = registry.snapshot().await;
        assert_eq!(snapshot.origin, SnapshotOrigin::Cache);
        assert_eq!(snapshot.stations[0].name, "Opéra");
    }

    #[tokio::test]
    async fn fetch_fails_without_cache() {
        let empty = tempdir().unwrap();
        let result = StationRegistry::fetch(FeedSource::Files(FileFeed::new(empty.path())), None).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn refresh_replaces_snapshot() {
        let data = tempdir().unwrap();
        let stations_path = data.path().join("stations.json");
        std::fs::write(&stations_path, stations_json(&["Opéra"])).unwrap();

        let registry = StationRegistry::fetch(FeedSource::Files(FileFeed::new(data.path())), None)
            .await
            .unwrap();
        assert_eq!(registry.len().await, 1);

        std::fs::write(&stations_path, stations_json(&["Opéra", "Rihour", "Cormontaigne"])).unwrap();
        assert_eq!(registry.refresh().await.unwrap(), 3);
        assert_eq!(registry.len().await, 3);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_snapshot() {
        let data = tempdir().unwrap();
        let stations_path = data.path().join("stations.json");
        std::fs::write(&stations_path, stations_json(&["Opéra"])).unwrap();

        let registry = StationRegistry::fetch(FeedSource::Files(FileFeed::new(data.path())), None)
            .await
            .unwrap();

        std::fs::write(&stations_path, "garbage").unwrap();
        assert!(registry.refresh().await.is_err());
        assert_eq!(registry.len().await, 1);
    }

    const PATHS_JSON: &str = r#"{"type":"FeatureCollection","features":[{"type":"Feature","id":"p1","geometry":{"type":"LineString","coordinates":[[3.06,50.63],[3.07,50.64]]},"properties":{"nom":"Rue Faidherbe"}}]}"#;

    #[tokio::test]
    async fn failed_paths_refresh_keeps_previous_paths() {
        let data = tempdir().unwrap();
        let stations_path = data.path().join("stations.json");
        std::fs::write(&stations_path, stations_json(&["Opéra"])).unwrap();
        std::fs::write(data.path().join("paths.json"), PATHS_JSON).unwrap();

        let registry = StationRegistry::fetch(FeedSource::Files(FileFeed::new(data.path())), None)
            .await
            .unwrap();
        assert_eq!(registry.snapshot().await.paths.len(), 1);

        std::fs::write(&stations_path, stations_json(&["Opéra", "Rihour"])).unwrap();
        std::fs::write(data.path().join("paths.json"), "garbage").unwrap();
        assert_eq!(registry.refresh().await.unwrap(), 2);

        let snapshot = registry.snapshot().await;
        assert_eq!(snapshot.stations.len(), 2);
        assert_eq!(snapshot.paths.len(), 1);
        assert_eq!(snapshot.paths[0].name.as_deref(), Some("Rue Faidherbe"));
    }

    #[tokio::test]
    async fn cache_fallback_restores_paths() {
        let data = tempdir().unwrap();
        std::fs::write(data.path().join("stations.json"), stations_json(&["Opéra"])).unwrap();
        std::fs::write(data.path().join("paths.json"), PATHS_JSON).unwrap();
        let cache_config = SnapshotCacheConfig::new(data.path().join("cache.json"));

        StationRegistry::fetch(
            FeedSource::Files(FileFeed::new(data.path())),
            Some(SnapshotCache::new(cache_config.clone())),
        )
        .await
        .unwrap();

        let empty = tempdir().unwrap();
        let registry = StationRegistry::fetch(
            FeedSource::Files(FileFeed::new(empty.path())),
            Some(SnapshotCache::new(cache_config)),
        )
        .await
        .unwrap();

        let snapshot = registry.snapshot().await;
        assert_eq!(snapshot.origin, SnapshotOrigin::Cache);
        assert_eq!(snapshot.paths.len(), 1);
    }

    #[tokio::test]
    async fn empty_registry_has_no_stations() {
        let dir = tempdir().unwrap();
        let registry = StationRegistry::empty(FeedSource::Files(FileFeed::new(dir.path())), None);
        assert!(registry.is_empty().await);
        assert_eq!(registry.snapshot().await.origin, SnapshotOrigin::Empty);
    }
}
