//! Domain error types.
//!
//! These errors represent validation failures when constructing domain
//! values. They are distinct from feed/IO errors.

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Latitude is NaN, infinite or outside [-90, 90]
    #[error("invalid latitude: {0}")]
    InvalidLatitude(f64),

    /// Longitude is NaN, infinite or outside [-180, 180]
    #[error("invalid longitude: {0}")]
    InvalidLongitude(f64),

    /// Match threshold is NaN or outside [0, 1]
    #[error("invalid threshold {0}: must be between 0 and 1")]
    InvalidThreshold(f64),

    /// Station identifier is empty
    #[error("station id must not be empty")]
    EmptyStationId,

    /// Station name is empty or only whitespace
    #[error("station name must not be empty")]
    EmptyStationName,
}
