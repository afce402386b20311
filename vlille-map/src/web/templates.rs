//! Askama templates for the web frontend.

use askama::Template;

use crate::view::MapView;

/// The map page.
///
/// The initial view is handed to `static/map.js` through data attributes.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
    pub station_count: usize,
}

impl IndexTemplate {
    pub fn new(view: &MapView, station_count: usize) -> Self {
        Self {
            center_lat: view.center().lat(),
            center_lon: view.center().lon(),
            zoom: view.zoom(),
            tile_url: view.tile_url().to_string(),
            attribution: view.attribution().to_string(),
            station_count,
        }
    }
}
