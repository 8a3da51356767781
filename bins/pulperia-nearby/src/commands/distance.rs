//! Distance command - great-circle distance between two points

use crate::commands::geo_error;
use pulperia_cli::OutputFormat;
use pulperia_core::Result;
use pulperia_geo::{distance_in, validate, DistanceUnit, GeoPoint};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct JsonDistanceOutput {
    from: GeoPoint,
    to: GeoPoint,
    distance: f64,
    unit: DistanceUnit,
}

/// Run distance command
pub fn run(
    from: (f64, f64),
    to: (f64, f64),
    unit: DistanceUnit,
    format: OutputFormat,
) -> Result<()> {
    let from = validate(from.0, from.1).map_err(geo_error)?;
    let to = validate(to.0, to.1).map_err(geo_error)?;

    let distance = distance_in(&from, &to, unit);

    match format {
        OutputFormat::Json => {
            let output = JsonDistanceOutput { from, to, distance, unit };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => println!("{:.3} {}", distance, unit.suffix()),
    }

    Ok(())
}
