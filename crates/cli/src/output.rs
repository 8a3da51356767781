//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use owo_colors::OwoColorize;
use pulperia_core::Error;

/// Output format selected with `--format`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}

impl OutputFormat {
    /// Parses a format name from configuration, defaulting to text.
    pub fn from_config(name: &str) -> Self {
        if name.eq_ignore_ascii_case("json") {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Print an error in the requested format.
///
/// JSON errors go to stdout as an `ErrorReport` so callers can parse them;
/// text errors go to stderr.
pub fn report_error(err: &Error, format: OutputFormat) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(&err.to_report()) {
            Ok(json) => println!("{}", json),
            Err(_) => Status::error(&err.to_string()),
        },
        OutputFormat::Text => Status::error(&err.to_string()),
    }
}

/// Format a distance in kilometers for display
///
/// Distances under one kilometer are shown in meters.
pub fn format_distance(km: Option<f64>) -> String {
    match km {
        None => "unknown".to_string(),
        Some(km) if km < 1.0 => format!("{:.0} m", km * 1000.0),
        Some(km) => format!("{:.2} km", km),
    }
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{}m {:.0}s", mins, remaining_secs)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_duration_ms() {
        let d = Duration::from_millis(500);
        assert_eq!(format_duration(d), "500ms");
    }

    #[test]
    fn test_format_duration_secs() {
        let d = Duration::from_secs_f32(5.5);
        assert_eq!(format_duration(d), "5.5s");
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(Some(0.0)), "0 m");
        assert_eq!(format_distance(Some(0.4567)), "457 m");
        assert_eq!(format_distance(Some(1.11195)), "1.11 km");
        assert_eq!(format_distance(None), "unknown");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1, "store", "stores"), "1 store");
        assert_eq!(format_count(5, "store", "stores"), "5 stores");
    }

    #[test]
    fn test_output_format_from_config() {
        assert_eq!(OutputFormat::from_config("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_config("text"), OutputFormat::Text);
        assert_eq!(OutputFormat::from_config("yaml"), OutputFormat::Text);
    }
}
