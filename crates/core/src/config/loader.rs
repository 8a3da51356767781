//! Configuration file loading

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// File names searched, in order, when no path is given.
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
    [".pulperia.toml", "pulperia.toml", ".config/pulperia.toml"];

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config<T> {
    /// Parsed configuration
    pub schema: T,
    /// File the configuration was read from, if any
    pub path: Option<PathBuf>,
}

impl<T: DeserializeOwned + Default> Config<T> {
    /// Load configuration from a file path or use defaults.
    ///
    /// An explicit path must exist. Without one, the working directory and
    /// then the user config directory are searched; if nothing is found the
    /// schema's defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(Path::new(".")),
        };

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => T::default(),
        };

        if let Some(ref p) = config_path {
            tracing::debug!(path = %p.display(), "loaded configuration");
        }

        Ok(Self {
            schema,
            path: config_path,
        })
    }
}

/// Find configuration file in standard locations
fn find_config_file(base: &Path) -> Option<PathBuf> {
    CONFIG_FILE_CANDIDATES
        .iter()
        .map(|candidate| base.join(candidate))
        .chain(dirs::config_dir().map(|dir| dir.join("pulperia").join("config.toml")))
        .find(|candidate| candidate.is_file())
}

/// Load and parse a TOML configuration file
fn load_config_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read config file {}: {}", path.display(), e))
            .with_source(e)
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::from(e).with_context(format!("While parsing {}", path.display()))
    })
}
