//! Bike station types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DomainError, Point};

/// Identifier of a bike station, as given by the feed.
///
/// Never empty. The feed uses either numeric ids or `layer.n` strings, so
/// both are kept as text.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationId(String);

impl StationId {
    /// Parse a station id, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyStationId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StationId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        StationId::parse(&s)
    }
}

impl From<StationId> for String {
    fn from(id: StationId) -> Self {
        id.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A bike-share docking station.
///
/// Immutable once built: each feed refresh replaces the whole collection
/// rather than updating stations in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Feed identifier
    pub id: StationId,

    /// Display name (never blank)
    pub name: String,

    /// Station location
    pub location: Point,

    /// Bikes ready to be taken, if the feed reported it
    pub bikes_available: Option<u32>,

    /// Free docks, if the feed reported it
    #[serde(default)]
    pub docks_available: Option<u32>,

    /// Street address
    #[serde(default)]
    pub address: Option<String>,

    /// Municipality
    #[serde(default)]
    pub city: Option<String>,
}

impl Station {
    /// Create a station with the required fields.
    ///
    /// The name is trimmed and must not be empty.
    pub fn new(
        id: StationId,
        name: &str,
        location: Point,
        bikes_available: Option<u32>,
    ) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyStationName);
        }
        Ok(Self {
            id,
            name: name.to_string(),
            location,
            bikes_available,
            docks_available: None,
            address: None,
            city: None,
        })
    }

    /// Set the number of free docks.
    pub fn with_docks(mut self, docks: Option<u32>) -> Self {
        self.docks_available = docks;
        self
    }

    /// Set the street address and municipality.
    pub fn with_address(mut self, address: Option<String>, city: Option<String>) -> Self {
        self.address = address;
        self.city = city;
        self
    }
}
