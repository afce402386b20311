use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vlille_map::config::AppConfig;
use vlille_map::feed::{FeedClient, FeedSource, FileFeed, SnapshotCache, StationRegistry};
use vlille_map::geocode::{CachedGeocoder, GeocodeCacheConfig, GeocoderClient};
use vlille_map::view::MapView;
use vlille_map::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vlille_map=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = AppConfig::from_env()?;

    let source = match &config.feed_dir {
        Some(dir) => FeedSource::Files(FileFeed::new(dir)),
        None => FeedSource::Live(FeedClient::new(config.feed.clone())?),
    };
    let cache = SnapshotCache::new(config.cache.clone());

    // Serve the map even when the feed is down; the refresh task fills it in
    let registry = match StationRegistry::fetch(source.clone(), Some(cache.clone())).await {
        Ok(registry) => registry,
        Err(e) => {
            warn!(error = %e, "initial station fetch failed, starting empty");
            StationRegistry::empty(source, Some(cache))
        }
    };
    info!(stations = registry.len().await, "station registry ready");

    let refresh = registry.clone();
    let interval = config.refresh_interval;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await; // First tick is immediate, skip it
        loop {
            ticker.tick().await;
            match refresh.refresh().await {
                Ok(count) => info!(stations = count, "refreshed stations"),
                Err(e) => warn!(error = %e, "station refresh failed, keeping previous snapshot"),
            }
        }
    });

    let geocoder = CachedGeocoder::new(
        GeocoderClient::new(config.geocoder.clone())?,
        &GeocodeCacheConfig::default(),
    );

    let state = AppState::new(registry, geocoder, MapView::lille(), config.search.clone());
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(addr = %config.bind, metric = %config.search.metric, "V'Lille map listening");
    axum::serve(listener, app).await?;

    Ok(())
}
