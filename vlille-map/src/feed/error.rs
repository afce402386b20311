//! Feed error types.

/// Errors that can occur when loading station or path data.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Geoservice returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not a GeoJSON feature collection
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Reading an offline feed file failed
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// Cache operation failed
    #[error("cache error: {message}")]
    Cache { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FeedError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");

        let err = FeedError::Json {
            message: "expected value".into(),
        };
        assert_eq!(err.to_string(), "JSON parse error: expected value");

        let err = FeedError::Io {
            path: "data/stations.json".into(),
            message: "not found".into(),
        };
        assert_eq!(err.to_string(), "failed to read data/stations.json: not found");
    }
}
