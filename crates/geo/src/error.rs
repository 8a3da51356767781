//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur while building or running a proximity search.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Latitude/longitude parameters are missing, malformed or out of range
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// Search radius is negative or not a finite number
    #[error("Invalid radius: {0}")]
    InvalidRadius(String),

    /// A paging or filter parameter could not be parsed
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Query parameter name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// Endpoint name does not match any known listing endpoint
    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Error code for integration with pulperia-core error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Invalid coordinate values
    InvalidCoordinates = 10001,
    /// Invalid radius
    InvalidRadius = 10002,
    /// Invalid paging/filter parameter
    InvalidParameter = 10003,
    /// Unknown endpoint
    UnknownEndpoint = 10004,
    /// JSON parsing error
    JsonParsing = 10005,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidCoordinates(_) => GeoErrorCode::InvalidCoordinates,
            GeoError::InvalidRadius(_) => GeoErrorCode::InvalidRadius,
            GeoError::InvalidParameter { .. } => GeoErrorCode::InvalidParameter,
            GeoError::UnknownEndpoint(_) => GeoErrorCode::UnknownEndpoint,
            GeoError::JsonError(_) => GeoErrorCode::JsonParsing,
        }
    }

    /// Returns true if the error was caused by request input (HTTP 400 equivalent).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, GeoError::JsonError(_))
    }

    pub(crate) fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        GeoError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
