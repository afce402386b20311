//! Geocoder error types.

/// Errors from the address geocoder.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Geocoder returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response was not the expected GeoJSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Query was blank
    #[error("query must not be empty")]
    EmptyQuery,
}
