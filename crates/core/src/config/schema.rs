//! Configuration sections shared by every tool

use serde::{Deserialize, Serialize};

/// General project configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Project name
    #[serde(default = "default_project_name")]
    pub project_name: String,

    /// Default output format for commands (text or json)
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            project_name: default_project_name(),
            format: default_format(),
        }
    }
}

fn default_project_name() -> String {
    "La Pulpería".to_string()
}

fn default_format() -> String {
    "text".to_string()
}
