//! Configuration schema for pulperia-nearby
//!
//! ```toml
//! [general]
//! format = "json"
//!
//! [logging]
//! log_level = "info"
//! format = "json"
//!
//! [endpoints.jobs]
//! default_radius_km = 8.0
//! inclusion = "strict"
//! ```

use pulperia_core::config::GeneralConfig;
use pulperia_core::{Error, Result};
use pulperia_geo::{Endpoint, PolicyOverride, PolicySet};
use pulperia_telemetry::TelemetryConfig;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Root configuration schema
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub logging: TelemetryConfig,

    /// Per-endpoint overrides on top of the built-in search policies
    #[serde(default)]
    pub endpoints: BTreeMap<Endpoint, PolicyOverride>,
}

impl ToolConfig {
    /// Effective search policies with overrides applied.
    pub fn policies(&self) -> Result<PolicySet> {
        PolicySet::with_overrides(&self.endpoints).map_err(|e| {
            Error::invalid_config_value(e.to_string())
                .with_context("In the [endpoints] configuration section")
        })
    }
}
