//! Conversion from GeoJSON features to domain types.
//!
//! The WFS layers are loosely typed: ids may be strings or numbers, counts
//! sometimes arrive as strings, and coordinates can be missing. Every
//! feature goes through a validated parse here. Bad features are rejected
//! with a reason and counted; they never reach the domain as partial
//! records.

use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::{CyclePath, DomainError, Point, Station, StationId};

use super::types::{Feature, FeatureCollection, Geometry};

/// Why a feature was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Feature is not a JSON object with the expected shape
    #[error("malformed feature: {0}")]
    Malformed(String),

    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Geometry has the wrong type or shape
    #[error("invalid geometry: {0}")]
    InvalidGeometry(&'static str),

    /// A value failed domain validation
    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// A rejected feature and why.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    /// Position in the collection
    pub index: usize,
    /// Feature id, when one could be read
    pub id: Option<String>,
    pub reason: ConversionError,
}

/// Result of converting a whole collection.
#[derive(Debug, Clone)]
pub struct Converted<T> {
    pub items: Vec<T>,
    pub rejected: Vec<Rejected>,
}

impl<T> Converted<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

/// Convert a station layer. Invalid features are logged and skipped.
pub fn convert_stations(collection: &FeatureCollection) -> Converted<Station> {
    convert_all(collection, "station", convert_station)
}

/// Convert a cycle-path layer. Invalid features are logged and skipped.
pub fn convert_paths(collection: &FeatureCollection) -> Converted<CyclePath> {
    convert_all(collection, "cycle path", convert_path)
}

fn convert_all<T>(
    collection: &FeatureCollection,
    kind: &str,
    convert: fn(&Feature) -> Result<T, ConversionError>,
) -> Converted<T> {
    let mut items = Vec::with_capacity(collection.features.len());
    let mut rejected = Vec::new();

    for (index, raw) in collection.features.iter().enumerate() {
        let result = serde_json::from_value::<Feature>(raw.clone())
            .map_err(|e| ConversionError::Malformed(e.to_string()))
            .and_then(|feature| convert(&feature));

        match result {
            Ok(item) => items.push(item),
            Err(reason) => {
                let id = raw.get("id").and_then(value_to_text);
                warn!(kind, index, id = ?id, %reason, "skipping feature");
                rejected.push(Rejected { index, id, reason });
            }
        }
    }

    Converted { items, rejected }
}

/// Convert a single station feature.
///
/// Required: an id (feature id, else `libelle` or `@id`), a non-blank name
/// (`nom`, else `name`) and a Point geometry with exactly two coordinates.
pub fn convert_station(feature: &Feature) -> Result<Station, ConversionError> {
    let empty = Map::new();
    let props = feature.properties.as_ref().unwrap_or(&empty);

    let id = feature
        .id
        .as_ref()
        .and_then(value_to_text)
        .or_else(|| text_property(props, &["libelle", "@id"]))
        .ok_or(ConversionError::MissingField("id"))?;
    let id = StationId::parse(&id)?;

    let name = text_property(props, &["nom", "name"]).ok_or(ConversionError::MissingField("name"))?;

    let location = match &feature.geometry {
        Some(Geometry::Point { coordinates }) => point_from_position(coordinates)?,
        Some(_) => return Err(ConversionError::InvalidGeometry("expected Point")),
        None => return Err(ConversionError::MissingField("geometry")),
    };

    let bikes = count_property(props, &["nb_velos_dispo", "bikes_available"]);
    let docks = count_property(props, &["nb_places_dispo", "docks_available"]);
    let address = text_property(props, &["adresse", "address"]);
    let city = text_property(props, &["commune", "city"]);

    Ok(Station::new(id, &name, location, bikes)?
        .with_docks(docks)
        .with_address(address, city))
}

/// Convert a single cycle-path feature.
///
/// Accepts LineString and MultiLineString geometries. Invalid vertices are
/// skipped, lines left with fewer than two points are dropped, and the
/// feature is rejected if no line remains.
pub fn convert_path(feature: &Feature) -> Result<CyclePath, ConversionError> {
    let empty = Map::new();
    let props = feature.properties.as_ref().unwrap_or(&empty);

    let raw_lines: Vec<&Value> = match &feature.geometry {
        Some(Geometry::LineString { coordinates }) => vec![coordinates],
        Some(Geometry::MultiLineString { coordinates }) => coordinates
            .as_array()
            .ok_or(ConversionError::InvalidGeometry("MultiLineString must be an array"))?
            .iter()
            .collect(),
        Some(_) => {
            return Err(ConversionError::InvalidGeometry(
                "expected LineString or MultiLineString",
            ));
        }
        None => return Err(ConversionError::MissingField("geometry")),
    };

    let lines: Vec<Vec<Point>> = raw_lines.into_iter().map(line_from_positions).collect();

    let id = feature.id.as_ref().and_then(value_to_text);
    let name = text_property(props, &["nom", "name", "libelle"]);

    CyclePath::new(id, name, lines).ok_or(ConversionError::InvalidGeometry("no drawable line"))
}

/// Parse a station position: exactly `[lon, lat]`.
fn point_from_position(position: &Value) -> Result<Point, ConversionError> {
    let coords = position
        .as_array()
        .ok_or(ConversionError::InvalidGeometry("coordinates must be an array"))?;
    if coords.len() != 2 {
        return Err(ConversionError::InvalidGeometry(
            "point must have exactly two coordinates",
        ));
    }
    vertex(&coords[0], &coords[1])
}

/// The valid vertices of a line of `[lon, lat]` or `[lon, lat, alt]`
/// positions. Anything that is not an array yields no vertices.
fn line_from_positions(line: &Value) -> Vec<Point> {
    let Some(positions) = line.as_array() else {
        return Vec::new();
    };

    positions
        .iter()
        .filter_map(|pos| match pos.as_array() {
            Some(c) if c.len() == 2 || c.len() == 3 => vertex(&c[0], &c[1]).ok(),
            _ => None,
        })
        .collect()
}

fn vertex(lon: &Value, lat: &Value) -> Result<Point, ConversionError> {
    let (Some(lon), Some(lat)) = (lon.as_f64(), lat.as_f64()) else {
        return Err(ConversionError::InvalidGeometry("coordinates must be numbers"));
    };
    Ok(Point::from_lon_lat(lon, lat)?)
}

/// Strings are trimmed; numbers are rendered as text. Blank is `None`.
fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First non-blank text value among `keys`.
fn text_property(props: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| props.get(*k))
        .find_map(value_to_text)
}

/// First non-negative integer among `keys`, accepting numeric strings.
fn count_property(props: &Map<String, Value>, keys: &[&str]) -> Option<u32> {
    keys.iter().filter_map(|k| props.get(*k)).find_map(|v| match v {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(value: Value) -> Feature {
        serde_json::from_value(value).unwrap()
    }

    fn collection(features: Vec<Value>) -> FeatureCollection {
        FeatureCollection { features }
    }

    fn station_json(id: Value, name: &str, lon: f64, lat: f64) -> Value {
        json!({
            "type": "Feature",
            "id": id,
            "geometry": {"type": "Point", "coordinates": [lon, lat]},
            "properties": {
                "nom": name,
                "nb_velos_dispo": 5,
                "nb_places_dispo": "12",
                "adresse": "PLACE DES BUISSONS",
                "commune": "LILLE"
            }
        })
    }

    #[test]
    fn convert_full_station() {
        let f = feature(station_json(json!("vlille_temps_reel.1"), "LILLE FLANDRES", 3.0708, 50.6365));
        let s = convert_station(&f).unwrap();

        assert_eq!(s.id.as_str(), "vlille_temps_reel.1");
        assert_eq!(s.name, "LILLE FLANDRES");
        assert_eq!(s.location.lat(), 50.6365);
        assert_eq!(s.location.lon(), 3.0708);
        assert_eq!(s.bikes_available, Some(5));
        assert_eq!(s.docks_available, Some(12));
        assert_eq!(s.address.as_deref(), Some("PLACE DES BUISSONS"));
        assert_eq!(s.city.as_deref(), Some("LILLE"));
    }

    #[test]
    fn numeric_id_and_name_fallback() {
        let f = feature(json!({
            "id": 36,
            "geometry": {"type": "Point", "coordinates": [3.0631, 50.6372]},
            "properties": {"name": "Opéra"}
        }));
        let s = convert_station(&f).unwrap();
        assert_eq!(s.id.as_str(), "36");
        assert_eq!(s.name, "Opéra");
        assert_eq!(s.bikes_available, None);
    }

    #[test]
    fn id_falls_back_to_libelle() {
        let f = feature(json!({
            "geometry": {"type": "Point", "coordinates": [3.0631, 50.6372]},
            "properties": {"libelle": 12, "nom": "Opéra"}
        }));
        assert_eq!(convert_station(&f).unwrap().id.as_str(), "12");
    }

    #[test]
    fn missing_id_rejected() {
        let f = feature(json!({
            "geometry": {"type": "Point", "coordinates": [3.0631, 50.6372]},
            "properties": {"nom": "Opéra"}
        }));
        assert_eq!(convert_station(&f), Err(ConversionError::MissingField("id")));
    }

    #[test]
    fn missing_or_blank_name_rejected() {
        let f = feature(json!({
            "id": 1,
            "geometry": {"type": "Point", "coordinates": [3.0631, 50.6372]},
            "properties": {"nom": "   "}
        }));
        assert_eq!(convert_station(&f), Err(ConversionError::MissingField("name")));

        let f = feature(json!({
            "id": 1,
            "geometry": {"type": "Point", "coordinates": [3.0631, 50.6372]}
        }));
        assert_eq!(convert_station(&f), Err(ConversionError::MissingField("name")));
    }

    #[test]
    fn bad_coordinates_rejected() {
        let cases = [
            json!([3.0631]),
            json!([3.0631, 50.6372, 10.0]),
            json!([null, 50.6372]),
            json!(["3.06", "50.63"]),
            json!([3.0631, 95.0]),
            json!(null),
        ];
        for coords in cases {
            let f = feature(json!({
                "id": 1,
                "geometry": {"type": "Point", "coordinates": coords},
                "properties": {"nom": "Opéra"}
            }));
            assert!(convert_station(&f).is_err(), "accepted {coords}");
        }
    }

    #[test]
    fn wrong_or_missing_geometry_rejected() {
        let f = feature(json!({
            "id": 1,
            "geometry": {"type": "LineString", "coordinates": [[3.0, 50.0], [3.1, 50.1]]},
            "properties": {"nom": "Opéra"}
        }));
        assert_eq!(
            convert_station(&f),
            Err(ConversionError::InvalidGeometry("expected Point"))
        );

        let f = feature(json!({"id": 1, "properties": {"nom": "Opéra"}}));
        assert_eq!(
            convert_station(&f),
            Err(ConversionError::MissingField("geometry"))
        );
    }

    #[test]
    fn negative_or_garbage_counts_are_unknown() {
        let f = feature(json!({
            "id": 1,
            "geometry": {"type": "Point", "coordinates": [3.0631, 50.6372]},
            "properties": {"nom": "Opéra", "nb_velos_dispo": -1, "nb_places_dispo": "n/a"}
        }));
        let s = convert_station(&f).unwrap();
        assert_eq!(s.bikes_available, None);
        assert_eq!(s.docks_available, None);
    }

    #[test]
    fn collection_keeps_valid_and_reports_rejected() {
        let fc = collection(vec![
            station_json(json!(1), "Gare Lille Flandres", 3.0708, 50.6365),
            json!("not a feature"),
            station_json(json!(2), "Opéra", 3.0631, 50.6372),
            json!({"id": 3, "geometry": {"type": "Point", "coordinates": [3.0, 200.0]}, "properties": {"nom": "Nowhere"}}),
        ]);

        let converted = convert_stations(&fc);
        let names: Vec<&str> = converted.items.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Gare Lille Flandres", "Opéra"]);

        assert_eq!(converted.rejected.len(), 2);
        assert_eq!(converted.rejected[0].index, 1);
        assert!(matches!(
            converted.rejected[0].reason,
            ConversionError::Malformed(_)
        ));
        assert_eq!(converted.rejected[1].index, 3);
        assert_eq!(converted.rejected[1].id.as_deref(), Some("3"));
        assert_eq!(
            converted.rejected[1].reason,
            ConversionError::Invalid(DomainError::InvalidLatitude(200.0))
        );
    }

    #[test]
    fn convert_line_string_path() {
        let f = feature(json!({
            "id": "amenagements.1",
            "geometry": {"type": "LineString", "coordinates": [[3.06, 50.63], [3.07, 50.64, 12.0]]},
            "properties": {"nom": "Avenue du Peuple Belge"}
        }));
        let path = convert_path(&f).unwrap();
        assert_eq!(path.id.as_deref(), Some("amenagements.1"));
        assert_eq!(path.name.as_deref(), Some("Avenue du Peuple Belge"));
        assert_eq!(path.lines.len(), 1);
        assert_eq!(path.lines[0][1].lat(), 50.64);
    }

    #[test]
    fn multi_line_drops_short_lines() {
        let f = feature(json!({
            "geometry": {"type": "MultiLineString", "coordinates": [
                [[3.06, 50.63], [3.07, 50.64]],
                [[3.06, 50.63], [null, 50.64]],
                [[3.08, 50.65]],
                "not a line"
            ]}
        }));
        let path = convert_path(&f).unwrap();
        assert_eq!(path.lines.len(), 1);
        assert!(path.id.is_none());
    }

    #[test]
    fn bad_vertex_skipped_line_kept() {
        let f = feature(json!({
            "geometry": {"type": "LineString", "coordinates": [
                [3.06, 50.63], [3.07, 50.64], [null, 50.65], [3.09, 95.0], [3.1]
            ]}
        }));
        let path = convert_path(&f).unwrap();
        assert_eq!(path.lines.len(), 1);
        assert_eq!(path.lines[0].len(), 2);
        assert_eq!(path.lines[0][1].lon(), 3.07);

        let f = feature(json!({
            "geometry": {"type": "MultiLineString", "coordinates": [
                [[3.06, 50.63], ["x", 50.64], [3.08, 50.65]]
            ]}
        }));
        let path = convert_path(&f).unwrap();
        assert_eq!(path.lines[0].len(), 2);
    }

    #[test]
    fn path_without_drawable_line_rejected() {
        let f = feature(json!({
            "geometry": {"type": "LineString", "coordinates": [[3.06, 50.63]]}
        }));
        assert_eq!(
            convert_path(&f),
            Err(ConversionError::InvalidGeometry("no drawable line"))
        );

        let f = feature(json!({
            "geometry": {"type": "Point", "coordinates": [3.06, 50.63]}
        }));
        assert!(convert_path(&f).is_err());
    }

    #[test]
    fn convert_paths_collection() {
        let fc = collection(vec![
            json!({"geometry": {"type": "LineString", "coordinates": [[3.06, 50.63], [3.07, 50.64]]}}),
            json!({"geometry": {"type": "Polygon", "coordinates": []}}),
        ]);
        let converted = convert_paths(&fc);
        assert_eq!(converted.items.len(), 1);
        assert_eq!(converted.rejected.len(), 1);
    }
}
