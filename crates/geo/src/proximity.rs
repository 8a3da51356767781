//! Radius filtering and distance ranking.
//!
//! Candidates are borrowed, never mutated: each output record pairs a
//! reference to the candidate with the distance computed for this call, so the
//! same slice can be ranked against several centers in one request.

use crate::{
    haversine_km, DistanceUnit, GeoError, GeoPoint, InclusionMode, Locatable, LocationSource,
    Result,
};
use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;

/// A search radius with an explicit unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Radius {
    value: f64,
    unit: DistanceUnit,
}

impl Radius {
    /// Creates a radius, rejecting negative and non-finite values.
    pub fn new(value: f64, unit: DistanceUnit) -> Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(GeoError::InvalidRadius(format!(
                "{value} {} (must be a finite, non-negative number)",
                unit.suffix()
            )));
        }
        Ok(Self { value, unit })
    }

    /// Creates a radius in kilometers.
    pub fn km(value: f64) -> Result<Self> {
        Self::new(value, DistanceUnit::Kilometers)
    }

    /// Creates a radius in meters.
    pub fn meters(value: f64) -> Result<Self> {
        Self::new(value, DistanceUnit::Meters)
    }

    /// The radius in its original unit.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The unit the radius was given in.
    pub fn unit(&self) -> DistanceUnit {
        self.unit
    }

    /// The radius converted to kilometers.
    #[inline]
    pub fn as_km(&self) -> f64 {
        match self.unit {
            DistanceUnit::Kilometers => self.value,
            DistanceUnit::Meters => self.value / 1000.0,
        }
    }

    /// Returns true if a distance in kilometers lies within the radius.
    /// The boundary is inclusive.
    #[inline]
    pub fn contains_km(&self, distance_km: f64) -> bool {
        distance_km <= self.as_km()
    }
}

impl std::fmt::Display for Radius {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.unit.suffix())
    }
}

/// A candidate annotated with its distance from the search center.
#[derive(Debug)]
pub struct RankedResult<'a, T> {
    /// The candidate, borrowed from the caller's list
    pub candidate: &'a T,
    /// Distance in kilometers, `None` when the candidate has no usable location
    pub distance_km: Option<f64>,
    /// Which location field the distance was measured from
    pub source: Option<LocationSource>,
}

// Manual impls: derive would require `T: Clone`/`T: Copy`.
impl<T> Clone for RankedResult<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RankedResult<'_, T> {}

impl<T> PartialEq for RankedResult<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.candidate, other.candidate)
            && self.distance_km == other.distance_km
            && self.source == other.source
    }
}

impl<'a, T> RankedResult<'a, T> {
    /// A result that carries no distance (geo filtering not requested, or
    /// location unknown).
    pub fn unranked(candidate: &'a T) -> Self {
        Self {
            candidate,
            distance_km: None,
            source: None,
        }
    }

    /// Distance converted to the requested unit.
    pub fn distance_in(&self, unit: DistanceUnit) -> Option<f64> {
        self.distance_km
            .map(|km| km * 1000.0 / unit.meters_per_unit())
    }
}

/// Serializes as the candidate's own fields plus `distance` (kilometers or
/// `null`), which is the shape listing endpoints return.
///
/// A `distance` or `distanceSource` the candidate already carries is replaced
/// by the values computed for this search. The candidate must serialize as a
/// map.
impl<T: Serialize> Serialize for RankedResult<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let fields = match serde_json::to_value(self.candidate).map_err(S::Error::custom)? {
            serde_json::Value::Object(fields) => fields,
            other => {
                return Err(S::Error::custom(format!(
                    "ranked candidate must serialize as a map, got {other}"
                )));
            }
        };

        let mut map = serializer.serialize_map(None)?;
        for (key, value) in fields.iter().filter(|(key, _)| !is_annotation(key)) {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry(DISTANCE_KEY, &self.distance_km)?;
        if let Some(source) = self.source {
            map.serialize_entry(DISTANCE_SOURCE_KEY, &source)?;
        }
        map.end()
    }
}

const DISTANCE_KEY: &str = "distance";
const DISTANCE_SOURCE_KEY: &str = "distanceSource";

fn is_annotation(key: &str) -> bool {
    key == DISTANCE_KEY || key == DISTANCE_SOURCE_KEY
}

/// Filters candidates to those within `radius` of `center`, sorted nearest first.
///
/// - Candidates farther than the radius are always dropped.
/// - Candidates without a resolvable location are dropped under
///   [`InclusionMode::Strict`] and kept after every located candidate, in
///   input order, under [`InclusionMode::Inclusive`].
///
/// # Example
/// ```
/// use pulperia_geo::{filter_by_distance, GeoPoint, InclusionMode, Radius};
///
/// let center = GeoPoint::new(14.0818, -87.2068);
/// let stores = vec![
///     GeoPoint::new(14.20, -87.20),
///     GeoPoint::new(14.0918, -87.2068),
///     GeoPoint::new(14.0818, -87.2068),
/// ];
///
/// let radius = Radius::km(2.0).unwrap();
/// let ranked = filter_by_distance(&stores, center, radius, InclusionMode::Strict);
/// assert_eq!(ranked.len(), 2);
/// assert_eq!(ranked[0].distance_km, Some(0.0));
/// ```
pub fn filter_by_distance<T>(
    candidates: &[T],
    center: GeoPoint,
    radius: Radius,
    mode: InclusionMode,
) -> Vec<RankedResult<'_, T>>
where
    T: Locatable + Sync,
{
    let mut results = annotate(candidates, &center);
    let annotated = results.len();

    results.retain(|r| match r.distance_km {
        Some(distance) => radius.contains_km(distance),
        None => mode == InclusionMode::Inclusive,
    });

    sort_by_distance(&mut results);

    tracing::debug!(
        candidates = annotated,
        kept = results.len(),
        radius = %radius,
        mode = ?mode,
        "proximity filter applied"
    );

    results
}

/// Computes distances for every candidate, preserving input order.
fn annotate<'a, T>(candidates: &'a [T], center: &GeoPoint) -> Vec<RankedResult<'a, T>>
where
    T: Locatable + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        candidates
            .par_iter()
            .map(|candidate| rank_single(center, candidate))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        candidates
            .iter()
            .map(|candidate| rank_single(center, candidate))
            .collect()
    }
}

#[inline]
fn rank_single<'a, T: Locatable>(center: &GeoPoint, candidate: &'a T) -> RankedResult<'a, T> {
    match candidate.resolve_location() {
        Some(resolved) => RankedResult {
            candidate,
            distance_km: Some(haversine_km(center, &resolved.point)),
            source: Some(resolved.source),
        },
        None => RankedResult::unranked(candidate),
    }
}

/// Stable ascending sort; unknown distances go last in their original order.
fn sort_by_distance<T>(results: &mut [RankedResult<'_, T>]) {
    results.sort_by(|a, b| match (a.distance_km, b.distance_km) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
