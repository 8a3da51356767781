//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes. The kilometer variant is
//! derived from the meter result so both entry points always agree.

use crate::GeoPoint;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Unit a distance or radius is expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    /// Kilometers
    #[default]
    #[serde(alias = "km")]
    Kilometers,
    /// Meters
    #[serde(alias = "m")]
    Meters,
}

impl DistanceUnit {
    /// Number of meters in one of this unit.
    #[inline]
    pub fn meters_per_unit(self) -> f64 {
        match self {
            DistanceUnit::Kilometers => 1000.0,
            DistanceUnit::Meters => 1.0,
        }
    }

    /// Short suffix used for display.
    pub fn suffix(self) -> &'static str {
        match self {
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Meters => "m",
        }
    }
}

impl std::str::FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "km" | "kilometers" | "kilometres" => Ok(DistanceUnit::Kilometers),
            "m" | "meters" | "metres" => Ok(DistanceUnit::Meters),
            other => Err(format!("unknown distance unit: {other}")),
        }
    }
}

/// Calculates the great-circle distance between two points in meters.
///
/// # Example
/// ```
/// use pulperia_geo::{haversine_meters, GeoPoint};
///
/// let a = GeoPoint::new(14.0818, -87.2068);
/// let b = GeoPoint::new(14.0918, -87.2068);
///
/// let meters = haversine_meters(&a, &b);
/// assert!((meters - 1112.0).abs() < 5.0);
/// ```
#[inline]
pub fn haversine_meters(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let phi1 = from.latitude * PI / 180.0;
    let phi2 = to.latitude * PI / 180.0;
    let d_phi = (to.latitude - from.latitude) * PI / 180.0;
    let d_lambda = (to.longitude - from.longitude) * PI / 180.0;

    // Rounding can push `a` just past 1 for near-antipodal points.
    let a = ((d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2))
    .min(1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Calculates the great-circle distance between two points in kilometers.
///
/// Equal to [`haversine_meters`] divided by 1000.
#[inline]
pub fn haversine_km(from: &GeoPoint, to: &GeoPoint) -> f64 {
    haversine_meters(from, to) / 1000.0
}

/// Calculates the distance between two points in the requested unit.
#[inline]
pub fn distance_in(from: &GeoPoint, to: &GeoPoint, unit: DistanceUnit) -> f64 {
    haversine_meters(from, to) / unit.meters_per_unit()
}
