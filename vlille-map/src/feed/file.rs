//! Offline feed backed by GeoJSON files.
//!
//! Serves saved WFS responses from a directory so the map can be developed
//! without network access. Expects `stations.json` and, optionally,
//! `paths.json`.

use std::path::{Path, PathBuf};

use crate::domain::{CyclePath, Station};

use super::client::parse_collection;
use super::convert::{Converted, convert_paths, convert_stations};
use super::error::FeedError;

const STATIONS_FILE: &str = "stations.json";
const PATHS_FILE: &str = "paths.json";

/// Feed that reads GeoJSON files from a directory.
#[derive(Debug, Clone)]
pub struct FileFeed {
    dir: PathBuf,
}

impl FileFeed {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read and convert `stations.json`.
    pub async fn fetch_stations(&self) -> Result<Converted<Station>, FeedError> {
        let path = self.dir.join(STATIONS_FILE);
        let body = read(&path).await?;
        Ok(convert_stations(&parse_collection(&body)?))
    }

    /// Read and convert `paths.json`; a missing file means no paths.
    pub async fn fetch_paths(&self) -> Result<Converted<CyclePath>, FeedError> {
        let path = self.dir.join(PATHS_FILE);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(Converted::empty());
        }
        let body = read(&path).await?;
        Ok(convert_paths(&parse_collection(&body)?))
    }
}

async fn read(path: &Path) -> Result<String, FeedError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| FeedError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}
