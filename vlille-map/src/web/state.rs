//! Application state for the web layer.

use std::sync::Arc;

use crate::feed::StationRegistry;
use crate::geocode::CachedGeocoder;
use crate::search::SearchConfig;
use crate::view::MapView;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Current station and path snapshot
    pub registry: StationRegistry,

    /// Cached address lookups
    pub geocoder: Arc<CachedGeocoder>,

    /// Map surface markers are drawn on
    pub view: Arc<MapView>,

    /// Default lookup parameters
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        registry: StationRegistry,
        geocoder: CachedGeocoder,
        view: MapView,
        config: SearchConfig,
    ) -> Self {
        Self {
            registry,
            geocoder: Arc::new(geocoder),
            view: Arc::new(view),
            config: Arc::new(config),
        }
    }
}
