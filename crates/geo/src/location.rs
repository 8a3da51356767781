//! Candidate location resolution.
//!
//! A listing may carry its own coordinates, inherit them from the store
//! (pulpería) that owns it, or have none at all. [`Locatable`] makes that
//! chain explicit: the own location is tried first, then the parent's.
//!
//! [`Listing`] is the JSON shape handed over by the data layer. Its
//! coordinate fields are parsed leniently: a malformed or out-of-range value
//! simply leaves the listing unresolved instead of failing the request.

use crate::{GeoPoint, RawValue};
use serde::{Deserialize, Serialize};

/// Where a resolved location came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    /// The candidate's own coordinates
    Own,
    /// The owning store's coordinates
    Parent,
}

/// A location together with the link in the fallback chain that supplied it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedLocation {
    /// Resolved point
    pub point: GeoPoint,
    /// Which field supplied it
    pub source: LocationSource,
}

/// Anything that can be placed on the map for a proximity search.
pub trait Locatable {
    /// The candidate's own coordinates, if recorded.
    fn own_location(&self) -> Option<GeoPoint>;

    /// Coordinates to fall back on when the candidate has none of its own.
    fn parent_location(&self) -> Option<GeoPoint> {
        None
    }

    /// Walks the fallback chain and returns the first valid location.
    fn resolve_location(&self) -> Option<ResolvedLocation> {
        let own = self
            .own_location()
            .and_then(GeoPoint::checked)
            .map(|point| ResolvedLocation {
                point,
                source: LocationSource::Own,
            });

        own.or_else(|| {
            self.parent_location()
                .and_then(GeoPoint::checked)
                .map(|point| ResolvedLocation {
                    point,
                    source: LocationSource::Parent,
                })
        })
    }
}

impl Locatable for GeoPoint {
    fn own_location(&self) -> Option<GeoPoint> {
        Some(*self)
    }
}

impl<T: Locatable> Locatable for Option<T> {
    fn own_location(&self) -> Option<GeoPoint> {
        self.as_ref().and_then(Locatable::own_location)
    }

    fn parent_location(&self) -> Option<GeoPoint> {
        self.as_ref().and_then(Locatable::parent_location)
    }
}

/// Parses a coordinate pair from two loosely-typed JSON values.
///
/// Accepts numbers and numeric strings. Anything else, including a single
/// missing component, yields `None`.
pub fn point_from_json(
    latitude: Option<&serde_json::Value>,
    longitude: Option<&serde_json::Value>,
) -> Option<GeoPoint> {
    let lat = RawValue::from(latitude).parse_finite()?;
    let lng = RawValue::from(longitude).parse_finite()?;
    GeoPoint::new(lat, lng).checked()
}

/// Keys that may hold the owning store, tried in order.
const PARENT_KEYS: [&str; 2] = ["pulperia", "store"];

/// A listing (store, product, job, chamba or announcement) as returned by
/// the data layer.
///
/// The JSON object is kept as-is and serialized back unchanged; only the
/// coordinate fields are interpreted.
///
/// # Example
/// ```
/// use pulperia_geo::{Listing, Locatable, LocationSource};
/// use serde_json::json;
///
/// let job: Listing = serde_json::from_value(json!({
///     "id": "job-1",
///     "title": "Ayudante de bodega",
///     "latitude": null,
///     "pulperia": { "latitude": "14.0818", "longitude": -87.2068 }
/// }))
/// .unwrap();
///
/// let resolved = job.resolve_location().unwrap();
/// assert_eq!(resolved.source, LocationSource::Parent);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Listing {
    fields: serde_json::Map<String, serde_json::Value>,
}

impl Listing {
    /// Wraps an already-parsed JSON object.
    pub fn from_fields(fields: serde_json::Map<String, serde_json::Value>) -> Self {
        Self { fields }
    }

    /// Listing identifier, if present (ids may be numbers or strings).
    pub fn id(&self) -> Option<&serde_json::Value> {
        self.get("id")
    }

    /// Raw value of any field.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields.get(key)
    }

    /// All fields, exactly as received.
    pub fn fields(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.fields
    }

    /// Parses a JSON array of listings.
    ///
    /// Elements that are not objects are skipped with a warning; only a body
    /// that is not an array is an error.
    pub fn parse_many(json: &str) -> crate::Result<Vec<Listing>> {
        let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
        let total = values.len();

        let listings: Vec<Listing> = values
            .into_iter()
            .filter_map(|value| match value {
                serde_json::Value::Object(fields) => Some(Listing::from_fields(fields)),
                _ => None,
            })
            .collect();

        if listings.len() < total {
            tracing::warn!(
                skipped = total - listings.len(),
                kept = listings.len(),
                "skipped listings that are not JSON objects"
            );
        }

        Ok(listings)
    }
}

impl Locatable for Listing {
    fn own_location(&self) -> Option<GeoPoint> {
        point_from_json(self.get("latitude"), self.get("longitude"))
    }

    fn parent_location(&self) -> Option<GeoPoint> {
        PARENT_KEYS.iter().find_map(|key| match self.get(key) {
            Some(serde_json::Value::Object(store)) => {
                point_from_json(store.get("latitude"), store.get("longitude"))
            }
            _ => None,
        })
    }
}
