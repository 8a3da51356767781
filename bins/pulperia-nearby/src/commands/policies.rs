//! Policies command - show effective per-endpoint search policies

use owo_colors::OwoColorize;
use pulperia_cli::{OutputFormat, Status};
use pulperia_core::Result;
use pulperia_geo::{EndpointPolicy, PolicySet};
use std::collections::BTreeMap;

/// Run policies command
pub fn run(policies: &PolicySet, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        let map: BTreeMap<&str, EndpointPolicy> = policies
            .iter()
            .map(|(endpoint, policy)| (endpoint.as_str(), policy))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    Status::header("Endpoint search policies");
    println!(
        "  {:<14} {:>8} {:>8} {:>6} {:>6}  {:<10} {}",
        "Endpoint".dimmed(),
        "Radius".dimmed(),
        "Max".dimmed(),
        "Limit".dimmed(),
        "Max".dimmed(),
        "Missing".dimmed(),
        "Coordinates".dimmed()
    );

    for (endpoint, policy) in policies.iter() {
        println!(
            "  {:<14} {:>5} km {:>5} km {:>6} {:>6}  {:<10} {:?}",
            endpoint.as_str(),
            policy.default_radius_km,
            policy.max_radius_km,
            policy.default_limit,
            policy.max_limit,
            format!("{:?}", policy.inclusion).to_lowercase(),
            policy.coordinates,
        );
    }

    Ok(())
}
