//! Proximity search for La Pulpería listings.
//!
//! This crate provides:
//! - Haversine distance calculations in meters and kilometers
//! - Validation of latitude/longitude request parameters
//! - Radius filtering with an explicit policy for listings without a location
//! - Pagination applied after filtering
//! - Per-endpoint search policies and query-parameter parsing
//!
//! # Example
//!
//! ```
//! use pulperia_geo::{haversine_km, GeoPoint};
//!
//! let tegucigalpa = GeoPoint::new(14.0818, -87.2068);
//! let san_pedro_sula = GeoPoint::new(15.5042, -88.0250);
//!
//! let distance_km = haversine_km(&tegucigalpa, &san_pedro_sula);
//! assert!((distance_km - 180.0).abs() < 10.0);
//! ```

mod error;
mod haversine;
pub mod location;
pub mod paginate;
pub mod policy;
pub mod proximity;
pub mod query;
pub mod validate;

pub use error::{GeoError, GeoErrorCode, Result};
pub use haversine::{
    distance_in, haversine_km, haversine_meters, DistanceUnit, EARTH_RADIUS_KM, EARTH_RADIUS_M,
};
pub use location::{Listing, Locatable, LocationSource, ResolvedLocation};
pub use paginate::{paginate, Page, PageRequest};
pub use policy::{
    CoordinateRequirement, Endpoint, EndpointPolicy, InclusionMode, PolicyOverride, PolicySet,
};
pub use proximity::{filter_by_distance, Radius, RankedResult};
pub use query::{search, QueryParams, SearchQuery};
pub use validate::{validate, validate_optional, RawValue};

/// A geographic point with latitude and longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a new point.
    ///
    /// No range check is performed here; see [`GeoPoint::is_valid`] and
    /// [`validate`] for request input.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if both components are finite and within range.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Returns `Some(self)` when the point is valid.
    #[inline]
    pub fn checked(self) -> Option<Self> {
        self.is_valid().then_some(self)
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}
