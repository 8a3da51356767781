//! Core utilities shared by the La Pulpería tools
//!
//! This crate provides shared functionality used across the workspace:
//!
//! - **Error handling**: Errors with codes, context, recovery suggestions and
//!   HTTP/exit-code mapping
//! - **Configuration**: TOML-based configuration loading with defaults
//!
//! # Example
//!
//! ```rust,no_run
//! use pulperia_core::config::{Config, GeneralConfig};
//!
//! let config = Config::<GeneralConfig>::load(None).expect("invalid configuration");
//! println!("{}", config.schema.project_name);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, Result, ResultExt};
