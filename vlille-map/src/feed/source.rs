//! Where station and path data comes from.

use crate::domain::{CyclePath, Station};

use super::client::FeedClient;
use super::convert::Converted;
use super::error::FeedError;
use super::file::FileFeed;

/// A station/path data source: the live geoservice or saved files.
#[derive(Debug, Clone)]
pub enum FeedSource {
    Live(FeedClient),
    Files(FileFeed),
}

impl FeedSource {
    pub async fn fetch_stations(&self) -> Result<Converted<Station>, FeedError> {
        match self {
            FeedSource::Live(client) => client.fetch_stations().await,
            FeedSource::Files(feed) => feed.fetch_stations().await,
        }
    }

    pub async fn fetch_paths(&self) -> Result<Converted<CyclePath>, FeedError> {
        match self {
            FeedSource::Live(client) => client.fetch_paths().await,
            FeedSource::Files(feed) => feed.fetch_paths().await,
        }
    }

    /// Short description for logs.
    pub fn describe(&self) -> String {
        match self {
            FeedSource::Live(client) => format!("WFS {}", client.config().base_url),
            FeedSource::Files(feed) => format!("files in {}", feed.dir().display()),
        }
    }
}
