//! Validate command - check latitude/longitude parameters

use crate::commands::geo_error;
use pulperia_cli::{OutputFormat, Status};
use pulperia_core::Result;
use pulperia_geo::validate_optional;

/// Run validate command
///
/// Omitting both values is valid and means no geo filter.
pub fn run(lat: Option<&str>, lng: Option<&str>, format: OutputFormat) -> Result<()> {
    let point = validate_optional(lat, lng).map_err(geo_error)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&point)?),
        OutputFormat::Text => match point {
            Some(point) => Status::success(&format!("Valid coordinates {}", point)),
            None => Status::info("No coordinates given: geo filtering would be skipped"),
        },
    }

    Ok(())
}
