//! pulperia-nearby: proximity search for La Pulpería listings.
//!
//! Reads listings exported by the data layer, applies the same radius
//! filtering, ranking and pagination the listing endpoints use, and prints the
//! page as text or JSON.

use clap::{Parser, Subcommand};
use pulperia_cli::output::report_error;
use pulperia_cli::{OutputFormat, Status};
use pulperia_core::config::Config;
use pulperia_core::error::exit_codes;
use pulperia_geo::DistanceUnit;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod config;

use commands::search::SearchArgs;
use config::ToolConfig;

/// Proximity search for La Pulpería listings
#[derive(Parser)]
#[command(name = "pulperia-nearby")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (defaults to the `general.format` config value)
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Path to a configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Great-circle distance between two points
    Distance {
        /// Latitude of the first point
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        /// Longitude of the first point
        #[arg(allow_negative_numbers = true)]
        lng1: f64,
        /// Latitude of the second point
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        /// Longitude of the second point
        #[arg(allow_negative_numbers = true)]
        lng2: f64,
        /// Unit of the result (km or m)
        #[arg(short, long, default_value = "km")]
        unit: DistanceUnit,
    },

    /// Check latitude/longitude parameters the way listing endpoints do
    Validate {
        /// Latitude
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<String>,
        /// Longitude
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<String>,
    },

    /// Filter, rank and paginate listings for an endpoint
    Search {
        /// Endpoint whose policy applies (stores, products, jobs, chambas, announcements)
        endpoint: String,

        /// JSON array of listings ("-" reads stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Query parameter as key=value (lat, lng, radius, limit, offset)
        #[arg(short, long = "param", value_parser = parse_key_val, allow_hyphen_values = true)]
        params: Vec<(String, String)>,

        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Show the effective per-endpoint search policies
    Policies,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{s}`"))?;
    Ok((key.trim().to_string(), value.to_string()))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::<ToolConfig>::load(cli.config.as_deref()) {
        Ok(config) => config.schema,
        Err(err) => {
            report_error(&err, cli.format.unwrap_or_default());
            return exit(err.code.exit_code());
        }
    };

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging = logging.verbose();
    }
    if let Err(e) = pulperia_telemetry::init_with_config(&logging) {
        Status::warning(&format!("Logging disabled: {}", e));
    }

    let format = cli
        .format
        .unwrap_or_else(|| OutputFormat::from_config(&config.general.format));

    let result = config.policies().and_then(|policies| match &cli.command {
        Commands::Distance { lat1, lng1, lat2, lng2, unit } => {
            commands::distance::run((*lat1, *lng1), (*lat2, *lng2), *unit, format)
        }

        Commands::Validate { lat, lng } => {
            commands::validate::run(lat.as_deref(), lng.as_deref(), format)
        }

        Commands::Search { endpoint, input, params, compact } => {
            let args = SearchArgs {
                endpoint,
                input,
                params,
                compact: *compact,
            };
            commands::search::run(&args, &policies, format)
        }

        Commands::Policies => commands::policies::run(&policies, format),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(
                code = %err.code,
                session_id = pulperia_telemetry::session_id(),
                "command failed"
            );
            report_error(&err, format);
            exit(err.code.exit_code())
        }
    }
}

fn exit(code: i32) -> ExitCode {
    if code == exit_codes::SUCCESS {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(u8::try_from(code).unwrap_or(1))
    }
}
