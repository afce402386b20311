//! The map view and the markers it draws.

use serde::Serialize;

use crate::domain::{CyclePath, Point, RankedStation, Station};

/// Centre of Lille, the initial view.
const LILLE_CENTER: Point = Point::from_trusted(50.62925, 3.057256);
const DEFAULT_ZOOM: u8 = 13;
const OSM_TILES: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const OSM_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";

/// The map surface shown to the user.
///
/// Built once at startup and owned by the application state; handlers
/// borrow it to turn stations and paths into drawable layers. Holds no
/// per-request state.
#[derive(Debug, Clone)]
pub struct MapView {
    center: Point,
    zoom: u8,
    tile_url: String,
    attribution: String,
}

impl MapView {
    pub fn new(center: Point, zoom: u8) -> Self {
        Self {
            center,
            zoom,
            tile_url: OSM_TILES.to_string(),
            attribution: OSM_ATTRIBUTION.to_string(),
        }
    }

    /// Use a different tile server.
    pub fn with_tiles(mut self, url: impl Into<String>, attribution: impl Into<String>) -> Self {
        self.tile_url = url.into();
        self.attribution = attribution.into();
        self
    }

    /// View centred on Lille with OpenStreetMap tiles.
    pub fn lille() -> Self {
        Self::new(LILLE_CENTER, DEFAULT_ZOOM)
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn tile_url(&self) -> &str {
        &self.tile_url
    }

    pub fn attribution(&self) -> &str {
        &self.attribution
    }

    /// One marker per station.
    pub fn markers(&self, stations: &[Station]) -> Vec<Marker> {
        stations.iter().map(|s| Marker::from_station(s, None)).collect()
    }

    /// Markers for ranked results, carrying their distance.
    pub fn ranked_markers(&self, ranked: &[RankedStation]) -> Vec<Marker> {
        ranked
            .iter()
            .map(|r| Marker::from_station(&r.station, Some(r.distance)))
            .collect()
    }

    /// One polyline per drawable line of every path.
    pub fn polylines(&self, paths: &[CyclePath]) -> Vec<Polyline> {
        paths
            .iter()
            .flat_map(|path| {
                path.lines.iter().map(|line| Polyline {
                    name: path.name.clone(),
                    points: line.iter().map(|p| [p.lat(), p.lon()]).collect(),
                })
            })
            .collect()
    }

    /// Smallest box containing every station, if there are any.
    pub fn bounds(&self, stations: &[Station]) -> Option<Bounds> {
        let first = stations.first()?.location;
        let init = Bounds {
            south: first.lat(),
            west: first.lon(),
            north: first.lat(),
            east: first.lon(),
        };
        Some(stations.iter().fold(init, |b, s| Bounds {
            south: b.south.min(s.location.lat()),
            west: b.west.min(s.location.lon()),
            north: b.north.max(s.location.lat()),
            east: b.east.max(s.location.lon()),
        }))
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::lille()
    }
}

/// Availability shown by a marker's colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStatus {
    Available,
    Empty,
    Unknown,
}

/// A station marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    pub name: String,
    pub status: MarkerStatus,
    /// Popup line describing availability
    pub availability: String,
    pub bikes: Option<u32>,
    pub docks: Option<u32>,
    pub address: Option<String>,
    /// Distance from the reference point, for ranked results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl Marker {
    fn from_station(station: &Station, distance: Option<f64>) -> Self {
        let status = match station.bikes_available {
            Some(0) => MarkerStatus::Empty,
            Some(_) => MarkerStatus::Available,
            None => MarkerStatus::Unknown,
        };

        let address = match (&station.address, &station.city) {
            (Some(a), Some(c)) => Some(format!("{a}, {c}")),
            (Some(a), None) => Some(a.clone()),
            (None, c) => c.clone(),
        };

        Self {
            id: station.id.to_string(),
            lat: station.location.lat(),
            lon: station.location.lon(),
            name: station.name.clone(),
            status,
            availability: availability_text(station.bikes_available),
            bikes: station.bikes_available,
            docks: station.docks_available,
            address,
            distance,
        }
    }
}

/// Popup wording, in French like the rest of the page.
fn availability_text(bikes: Option<u32>) -> String {
    match bikes {
        None => "Disponibilité inconnue".to_string(),
        Some(0) => "Aucun vélo disponible".to_string(),
        Some(1) => "1 vélo disponible".to_string(),
        Some(n) => format!("{n} vélos disponibles"),
    }
}

/// A drawable cycle-path line as `[lat, lon]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub name: Option<String>,
    pub points: Vec<[f64; 2]>,
}

/// Geographic bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}
