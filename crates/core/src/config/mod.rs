//! Configuration loading and shared schema sections
//!
//! Each tool defines its own root schema and loads it through [`Config`].

mod loader;
mod schema;

pub use loader::{Config, CONFIG_FILE_CANDIDATES};
pub use schema::*;
