//! Query-parameter parsing and the filter-then-paginate pipeline.
//!
//! | Parameter | Aliases | Default |
//! |---|---|---|
//! | `lat` | `latitude` | none (no geo filter) |
//! | `lng` | `lon`, `longitude` | none (no geo filter) |
//! | `radius` | | endpoint default, in km |
//! | `limit` | | endpoint default |
//! | `offset` | | `0` |

use crate::{
    filter_by_distance, validate, validate_optional, CoordinateRequirement, EndpointPolicy,
    GeoError, GeoPoint, Locatable, Page, PageRequest, Radius, RankedResult, RawValue, Result,
};
use std::collections::{BTreeMap, HashMap};

const LATITUDE_KEYS: [&str; 2] = ["lat", "latitude"];
const LONGITUDE_KEYS: [&str; 3] = ["lng", "lon", "longitude"];

/// Read access to raw request parameters.
pub trait QueryParams {
    /// Returns the raw value of a parameter, if present.
    fn param(&self, name: &str) -> Option<&str>;

    /// Returns the first present parameter among `names`.
    fn first_of(&self, names: &[&str]) -> Option<&str> {
        names.iter().find_map(|name| self.param(name))
    }
}

impl QueryParams for HashMap<String, String> {
    fn param(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl QueryParams for BTreeMap<String, String> {
    fn param(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl QueryParams for [(&str, &str)] {
    fn param(&self, name: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }
}

/// A parsed proximity search request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchQuery {
    /// Search center; `None` means no geo filtering was requested
    pub center: Option<GeoPoint>,
    /// Search radius
    pub radius: Radius,
    /// Page window, applied after filtering
    pub page: PageRequest,
}

impl SearchQuery {
    /// Builds a query from raw parameters using an endpoint's defaults.
    ///
    /// # Example
    /// ```
    /// use pulperia_geo::{Endpoint, SearchQuery};
    /// use std::collections::HashMap;
    ///
    /// let params: HashMap<String, String> = [
    ///     ("lat", "14.0818"),
    ///     ("lon", "-87.2068"),
    ///     ("radius", "3"),
    /// ]
    /// .into_iter()
    /// .map(|(k, v)| (k.to_string(), v.to_string()))
    /// .collect();
    ///
    /// let query = SearchQuery::from_params(&params, &Endpoint::Stores.default_policy()).unwrap();
    /// assert!(query.center.is_some());
    /// assert_eq!(query.radius.as_km(), 3.0);
    /// assert_eq!(query.page.limit, 20);
    /// ```
    pub fn from_params<P>(params: &P, policy: &EndpointPolicy) -> Result<Self>
    where
        P: QueryParams + ?Sized,
    {
        let raw_lat = RawValue::from(params.first_of(&LATITUDE_KEYS));
        let raw_lng = RawValue::from(params.first_of(&LONGITUDE_KEYS));

        let center = match policy.coordinates {
            CoordinateRequirement::Optional => validate_optional(raw_lat, raw_lng)?,
            CoordinateRequirement::Required => Some(validate(raw_lat, raw_lng)?),
        };

        let radius_km = match params.param("radius") {
            Some(raw) => parse_radius(raw, policy.max_radius_km)?,
            None => policy.default_radius_km,
        };

        let limit = match params.param("limit") {
            Some(raw) => {
                let limit = parse_count("limit", raw)?;
                if limit > policy.max_limit {
                    tracing::warn!(requested = limit, max = policy.max_limit, "limit clamped");
                }
                limit.min(policy.max_limit)
            }
            None => policy.default_limit,
        };

        let offset = match params.param("offset") {
            Some(raw) => parse_count("offset", raw)?,
            None => 0,
        };

        Ok(Self {
            center,
            radius: Radius::km(radius_km)?,
            page: PageRequest::new(limit, offset),
        })
    }
}

fn parse_radius(raw: &str, max_km: f64) -> Result<f64> {
    let value = RawValue::Text(raw)
        .parse_finite()
        .ok_or_else(|| GeoError::InvalidRadius(format!("{raw:?} is not a number")))?;

    if value < 0.0 {
        return Err(GeoError::InvalidRadius(format!("{value} km is negative")));
    }

    if value > max_km {
        tracing::warn!(requested = value, max = max_km, "radius clamped");
        return Ok(max_km);
    }

    Ok(value)
}

fn parse_count(name: &str, raw: &str) -> Result<usize> {
    raw.trim().parse::<usize>().map_err(|_| {
        GeoError::invalid_parameter(name, format!("{raw:?} is not a non-negative integer"))
    })
}

/// Runs a search: radius filtering (when a center was given) followed by
/// pagination of the filtered list.
///
/// Without a center every candidate is returned in its original order with no
/// distance.
pub fn search<'a, T>(
    candidates: &'a [T],
    query: &SearchQuery,
    policy: &EndpointPolicy,
) -> Page<RankedResult<'a, T>>
where
    T: Locatable + Sync,
{
    let results = match query.center {
        Some(center) => filter_by_distance(candidates, center, query.radius, policy.inclusion),
        None => candidates.iter().map(RankedResult::unranked).collect(),
    };

    Page::from_results(results, query.page)
}
