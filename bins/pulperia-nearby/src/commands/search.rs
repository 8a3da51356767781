//! Search command - filter, rank and paginate listings for an endpoint

use crate::commands::geo_error;
use owo_colors::OwoColorize;
use pulperia_cli::output::{format_count, format_distance, format_duration};
use pulperia_cli::{OutputFormat, Status};
use pulperia_core::{Error, Result, ResultExt};
use pulperia_geo::{
    search, Endpoint, EndpointPolicy, GeoPoint, InclusionMode, Listing, LocationSource, Page,
    PolicySet, RankedResult, SearchQuery,
};
use pulperia_telemetry::Timer;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Arguments for the search command
#[derive(Debug)]
pub struct SearchArgs<'a> {
    pub endpoint: &'a str,
    pub input: &'a Path,
    pub params: &'a [(String, String)],
    pub compact: bool,
}

/// JSON output for a search
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSearchOutput<'a> {
    endpoint: Endpoint,
    center: Option<GeoPoint>,
    radius_km: f64,
    inclusion: InclusionMode,
    #[serde(flatten)]
    page: Page<RankedResult<'a, Listing>>,
}

/// Run search command
pub fn run(args: &SearchArgs<'_>, policies: &PolicySet, format: OutputFormat) -> Result<()> {
    let endpoint: Endpoint = args.endpoint.parse().map_err(geo_error)?;
    let policy = policies.get(endpoint);

    let listings = load_listings(args.input)?;

    let params: BTreeMap<String, String> = args.params.iter().cloned().collect();
    let query = SearchQuery::from_params(&params, &policy)
        .map_err(geo_error)
        .context(format!("Parsing query for {}", endpoint))?;

    tracing::info!(
        endpoint = %endpoint,
        candidates = listings.len(),
        geo = query.center.is_some(),
        "running search"
    );

    let timer = Timer::start("search");
    let page = search(&listings, &query, &policy);
    let elapsed = timer.stop();

    match format {
        OutputFormat::Json => {
            let output = JsonSearchOutput {
                endpoint,
                center: query.center,
                radius_km: query.radius.as_km(),
                inclusion: policy.inclusion,
                page,
            };
            let json = if args.compact {
                serde_json::to_string(&output)?
            } else {
                serde_json::to_string_pretty(&output)?
            };
            println!("{}", json);
        }
        OutputFormat::Text => print_text(endpoint, &query, &policy, &page, elapsed),
    }

    Ok(())
}

/// Read listings from a file, or stdin when the path is `-`.
fn load_listings(input: &Path) -> Result<Vec<Listing>> {
    let content = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| {
                Error::io(format!("Failed to read listings from stdin: {}", e)).with_source(e)
            })?;
        buf
    } else {
        if !input.exists() {
            return Err(Error::file_not_found(input));
        }
        std::fs::read_to_string(input)
            .map_err(Error::from)
            .context(format!("Reading listings from {}", input.display()))?
    };

    Listing::parse_many(&content).map_err(|e| {
        Error::malformed_candidates(e.to_string())
            .with_source(e)
            .with_context(format!("Parsing {}", input.display()))
    })
}

fn print_text(
    endpoint: Endpoint,
    query: &SearchQuery,
    policy: &EndpointPolicy,
    page: &Page<RankedResult<'_, Listing>>,
    elapsed: Duration,
) {
    match query.center {
        Some(center) => Status::header(&format!(
            "{} within {} of {}",
            endpoint, query.radius, center
        )),
        None => Status::header(&format!("{} (no location filter)", endpoint)),
    }

    if page.is_empty() {
        Status::warning("No listings on this page");
    }

    for (i, result) in page.items.iter().enumerate() {
        let position = page.offset + i + 1;
        let via = match result.source {
            Some(LocationSource::Parent) => " (store location)".dimmed().to_string(),
            _ => String::new(),
        };
        println!(
            "  {:>3}. {:<24} {:>10}{}",
            position,
            display_name(result.candidate),
            format_distance(result.distance_km),
            via
        );
    }

    println!();
    Status::info(&format!(
        "Showing {} of {} (offset {}, limit {}, missing locations {}) in {}",
        page.len(),
        format_count(page.total, "result", "results"),
        page.offset,
        page.limit,
        format!("{:?}", policy.inclusion).to_lowercase(),
        format_duration(elapsed)
    ));
    if page.has_more {
        Status::info(&format!("Next page: offset={}", page.offset + page.len()));
    }
}

/// Best human label for a listing.
fn display_name(listing: &Listing) -> String {
    ["name", "title"]
        .iter()
        .find_map(|key| listing.get(key).and_then(|v| v.as_str()))
        .map(str::to_string)
        .unwrap_or_else(|| match listing.id() {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "(no id)".to_string(),
        })
}
