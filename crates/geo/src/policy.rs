//! Per-endpoint search policy.
//!
//! Every listing endpoint picks its defaults and, in particular, what happens
//! to listings with no known location. The choice is made here, once, instead
//! of being implied by whichever filter loop an endpoint happens to use.

use crate::{GeoError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// What to do with candidates whose location cannot be resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InclusionMode {
    /// Drop them
    #[default]
    Strict,
    /// Keep them after all located candidates
    Inclusive,
}

/// Whether a request must carry coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateRequirement {
    /// No coordinates means no geo filtering
    #[default]
    Optional,
    /// Requests without coordinates are rejected
    Required,
}

/// Listing endpoints that support proximity search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    /// Pulperías
    Stores,
    /// Products sold by pulperías
    Products,
    /// Job postings
    Jobs,
    /// Gig listings
    Chambas,
    /// Store announcements
    Announcements,
}

impl Endpoint {
    /// All endpoints, in display order.
    pub const ALL: [Endpoint; 5] = [
        Endpoint::Stores,
        Endpoint::Products,
        Endpoint::Jobs,
        Endpoint::Chambas,
        Endpoint::Announcements,
    ];

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Endpoint::Stores => "stores",
            Endpoint::Products => "products",
            Endpoint::Jobs => "jobs",
            Endpoint::Chambas => "chambas",
            Endpoint::Announcements => "announcements",
        }
    }

    /// Built-in policy for this endpoint.
    pub fn default_policy(self) -> EndpointPolicy {
        let base = EndpointPolicy::default();
        match self {
            Endpoint::Stores => EndpointPolicy {
                default_radius_km: 5.0,
                ..base
            },
            Endpoint::Products => EndpointPolicy {
                default_radius_km: 10.0,
                default_limit: 50,
                ..base
            },
            Endpoint::Jobs | Endpoint::Chambas => EndpointPolicy {
                default_radius_km: 10.0,
                inclusion: InclusionMode::Inclusive,
                ..base
            },
            Endpoint::Announcements => EndpointPolicy {
                default_radius_km: 2.0,
                ..base
            },
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Endpoint {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stores" | "store" | "pulperias" | "pulperia" => Ok(Endpoint::Stores),
            "products" | "product" => Ok(Endpoint::Products),
            "jobs" | "job" => Ok(Endpoint::Jobs),
            "chambas" | "chamba" => Ok(Endpoint::Chambas),
            "announcements" | "announcement" => Ok(Endpoint::Announcements),
            _ => Err(GeoError::UnknownEndpoint(s.to_string())),
        }
    }
}

/// Search defaults and limits for one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointPolicy {
    /// Radius used when the request has none, in kilometers
    pub default_radius_km: f64,
    /// Largest radius a request may ask for, in kilometers
    pub max_radius_km: f64,
    /// Page size used when the request has none
    pub default_limit: usize,
    /// Largest page size a request may ask for
    pub max_limit: usize,
    /// Treatment of listings without a location
    pub inclusion: InclusionMode,
    /// Whether coordinates are mandatory
    pub coordinates: CoordinateRequirement,
}

impl Default for EndpointPolicy {
    fn default() -> Self {
        Self {
            default_radius_km: 5.0,
            max_radius_km: 50.0,
            default_limit: 20,
            max_limit: 100,
            inclusion: InclusionMode::Strict,
            coordinates: CoordinateRequirement::Optional,
        }
    }
}

impl EndpointPolicy {
    /// Checks that the policy is internally consistent.
    pub fn validate(&self) -> Result<()> {
        let radius_ok = self.default_radius_km.is_finite()
            && self.max_radius_km.is_finite()
            && self.default_radius_km >= 0.0
            && self.default_radius_km <= self.max_radius_km;
        if !radius_ok {
            return Err(GeoError::InvalidRadius(format!(
                "default radius {} km must lie within [0, {}] km",
                self.default_radius_km, self.max_radius_km
            )));
        }

        if self.max_limit == 0 || self.default_limit > self.max_limit {
            return Err(GeoError::invalid_parameter(
                "limit",
                format!(
                    "default limit {} must lie within [0, {}] and the maximum must be positive",
                    self.default_limit, self.max_limit
                ),
            ));
        }

        Ok(())
    }
}

/// Partial policy read from configuration; unset fields keep the endpoint's
/// built-in value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyOverride {
    /// Replaces [`EndpointPolicy::default_radius_km`]
    #[serde(default)]
    pub default_radius_km: Option<f64>,
    /// Replaces [`EndpointPolicy::max_radius_km`]
    #[serde(default)]
    pub max_radius_km: Option<f64>,
    /// Replaces [`EndpointPolicy::default_limit`]
    #[serde(default)]
    pub default_limit: Option<usize>,
    /// Replaces [`EndpointPolicy::max_limit`]
    #[serde(default)]
    pub max_limit: Option<usize>,
    /// Replaces [`EndpointPolicy::inclusion`]
    #[serde(default)]
    pub inclusion: Option<InclusionMode>,
    /// Replaces [`EndpointPolicy::coordinates`]
    #[serde(default)]
    pub coordinates: Option<CoordinateRequirement>,
}

impl PolicyOverride {
    /// Applies the set fields on top of `base`.
    pub fn apply_to(&self, base: EndpointPolicy) -> EndpointPolicy {
        EndpointPolicy {
            default_radius_km: self.default_radius_km.unwrap_or(base.default_radius_km),
            max_radius_km: self.max_radius_km.unwrap_or(base.max_radius_km),
            default_limit: self.default_limit.unwrap_or(base.default_limit),
            max_limit: self.max_limit.unwrap_or(base.max_limit),
            inclusion: self.inclusion.unwrap_or(base.inclusion),
            coordinates: self.coordinates.unwrap_or(base.coordinates),
        }
    }
}

/// Effective policy for every endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicySet {
    policies: BTreeMap<Endpoint, EndpointPolicy>,
}

impl Default for PolicySet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PolicySet {
    /// The built-in policies.
    pub fn builtin() -> Self {
        Self {
            policies: Endpoint::ALL
                .into_iter()
                .map(|endpoint| (endpoint, endpoint.default_policy()))
                .collect(),
        }
    }

    /// Built-in policies with configuration overrides applied and validated.
    pub fn with_overrides(overrides: &BTreeMap<Endpoint, PolicyOverride>) -> Result<Self> {
        let mut set = Self::builtin();
        for (endpoint, patch) in overrides {
            let merged = patch.apply_to(endpoint.default_policy());
            merged.validate().map_err(|e| match e {
                GeoError::InvalidParameter { name, reason } => GeoError::InvalidParameter {
                    name,
                    reason: format!("{reason} (endpoint {endpoint})"),
                },
                GeoError::InvalidRadius(reason) => {
                    GeoError::InvalidRadius(format!("{reason} (endpoint {endpoint})"))
                }
                other => other,
            })?;
            set.policies.insert(*endpoint, merged);
        }
        Ok(set)
    }

    /// Policy for one endpoint.
    pub fn get(&self, endpoint: Endpoint) -> EndpointPolicy {
        self.policies
            .get(&endpoint)
            .copied()
            .unwrap_or_else(|| endpoint.default_policy())
    }

    /// All policies in endpoint order.
    pub fn iter(&self) -> impl Iterator<Item = (Endpoint, EndpointPolicy)> + '_ {
        self.policies.iter().map(|(e, p)| (*e, *p))
    }
}
