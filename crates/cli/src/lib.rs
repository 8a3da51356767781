//! CLI utilities for La Pulpería tools
//!
//! Provides shared CLI functionality:
//! - Terminal output formatting
//! - Output format selection (text or JSON)
//! - Error reporting

#![warn(missing_docs)]

pub mod output;

pub use output::{OutputFormat, Status};
