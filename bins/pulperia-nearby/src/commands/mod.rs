//! CLI command implementations

pub mod distance;
pub mod policies;
pub mod search;
pub mod validate;

use pulperia_core::{Error, ErrorCode};
use pulperia_geo::GeoError;

/// Converts a geo error into the workspace error type, keeping its category.
pub fn geo_error(err: GeoError) -> Error {
    let code = match &err {
        GeoError::InvalidCoordinates(_) => ErrorCode::InvalidCoordinates,
        GeoError::InvalidRadius(_) => ErrorCode::InvalidRadius,
        GeoError::InvalidParameter { .. } => ErrorCode::InvalidParameter,
        GeoError::UnknownEndpoint(_) => ErrorCode::UnknownEndpoint,
        GeoError::JsonError(_) => ErrorCode::MalformedCandidates,
    };
    let message = err.to_string();
    let suggestion = match code {
        ErrorCode::UnknownEndpoint => {
            Some("Use one of: stores, products, jobs, chambas, announcements")
        }
        ErrorCode::InvalidCoordinates => Some("Pass both lat and lng, or neither"),
        _ => None,
    };

    let error = Error::new(code, message).with_source(err);
    match suggestion {
        Some(s) => error.with_suggestion(s),
        None => error,
    }
}
