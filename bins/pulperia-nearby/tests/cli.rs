//! End-to-end tests for the pulperia-nearby binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;

fn empty_config() -> NamedTempFile {
    NamedTempFile::new().unwrap()
}

fn listings_file(listings: Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", listings).unwrap();
    file
}

/// A at the center, B ~1.1 km north, C ~13 km north, D without location.
fn tegucigalpa_listings() -> Value {
    json!([
        {"id": "C", "name": "Pulpería Lejana", "latitude": 14.20, "longitude": -87.20},
        {"id": "D", "name": "Sin ubicación"},
        {"id": "B", "name": "Pulpería Norte", "latitude": 14.0918, "longitude": -87.2068},
        {"id": "A", "name": "Pulpería Centro", "latitude": "14.0818", "longitude": "-87.2068"}
    ])
}

fn cmd(config: &NamedTempFile) -> Command {
    let mut cmd = Command::cargo_bin("pulperia-nearby").unwrap();
    cmd.arg("--config").arg(config.path()).env_remove("RUST_LOG");
    cmd
}

fn run_search(endpoint: &str, params: &[&str]) -> Value {
    let config = empty_config();
    let input = listings_file(tegucigalpa_listings());

    let mut command = cmd(&config);
    command
        .args(["--format", "json", "search", endpoint, "--input"])
        .arg(input.path())
        .arg("--compact");
    for param in params {
        command.arg(format!("--param={param}"));
    }

    let output = command.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

fn ids(output: &Value) -> Vec<&str> {
    output["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap())
        .collect()
}

#[test]
fn strict_endpoint_drops_unknown_locations() {
    let output = run_search("stores", &["lat=14.0818", "lng=-87.2068", "radius=2"]);

    assert_eq!(ids(&output), vec!["A", "B"]);
    assert_eq!(output["inclusion"], "strict");
    assert_eq!(output["total"], 2);
    assert_eq!(output["items"][0]["distance"], 0.0);
}

#[test]
fn inclusive_endpoint_keeps_unknown_locations_last() {
    let output = run_search("jobs", &["lat=14.0818", "lon=-87.2068", "radius=2"]);

    assert_eq!(ids(&output), vec!["A", "B", "D"]);
    assert_eq!(output["inclusion"], "inclusive");
    assert!(output["items"][2]["distance"].is_null());
}

#[test]
fn pagination_applies_after_filtering() {
    let output = run_search(
        "chambas",
        &["latitude=14.0818", "longitude=-87.2068", "radius=2", "limit=1", "offset=1"],
    );

    assert_eq!(ids(&output), vec!["B"]);
    assert_eq!(output["total"], 3);
    assert_eq!(output["hasMore"], true);
}

#[test]
fn no_coordinates_skips_geo_filter() {
    let output = run_search("products", &[]);

    assert_eq!(ids(&output), vec!["C", "D", "B", "A"]);
    assert!(output["center"].is_null());
    assert_eq!(output["limit"], 50);
}

#[test]
fn half_coordinates_is_a_validation_error() {
    let config = empty_config();
    let input = listings_file(tegucigalpa_listings());

    cmd(&config)
        .args(["--format", "json", "search", "stores", "--input"])
        .arg(input.path())
        .arg("--param=lat=14.0818")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("E4001"))
        .stdout(predicate::str::contains("400"));
}

#[test]
fn unknown_endpoint_is_rejected() {
    let config = empty_config();
    let input = listings_file(tegucigalpa_listings());

    cmd(&config)
        .args(["search", "orders", "--input"])
        .arg(input.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown endpoint"));
}

#[test]
fn malformed_listings_are_an_input_error() {
    let config = empty_config();
    let mut input = NamedTempFile::new().unwrap();
    write!(input, "not json").unwrap();

    cmd(&config)
        .args(["search", "stores", "--input"])
        .arg(input.path())
        .assert()
        .code(4);
}

#[test]
fn listings_from_stdin() {
    let config = empty_config();

    let output = cmd(&config)
        .args(["--format", "json", "search", "stores", "--input", "-", "--compact"])
        .args(["--param=lat=14.0818", "--param=lng=-87.2068", "--param=radius=2"])
        .write_stdin(tegucigalpa_listings().to_string())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let output: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(ids(&output), vec!["A", "B"]);
}

#[test]
fn text_output_lists_results() {
    let config = empty_config();
    let input = listings_file(tegucigalpa_listings());

    cmd(&config)
        .args(["search", "stores", "--input"])
        .arg(input.path())
        .args(["--param=lat=14.0818", "--param=lng=-87.2068", "--param=radius=2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pulpería Centro"))
        .stdout(predicate::str::contains("Pulpería Norte"))
        .stdout(predicate::str::contains("Pulpería Lejana").not());
}

#[test]
fn distance_command() {
    let config = empty_config();

    cmd(&config)
        .args(["distance", "14.0818", "-87.2068", "14.0918", "-87.2068", "--unit", "m"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("1111."));
}

#[test]
fn validate_command() {
    let config = empty_config();

    cmd(&config)
        .args(["--format", "json", "validate", "--lat=14.0818", "--lng=-87.2068"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"latitude\": 14.0818"));

    cmd(&config)
        .args(["validate", "--lat=14.0818", "--lng=oeste"])
        .assert()
        .code(2);
}

#[test]
fn config_overrides_policy() {
    let mut config = NamedTempFile::new().unwrap();
    write!(config, "[endpoints.stores]\ninclusion = \"inclusive\"\n").unwrap();

    let output = Command::cargo_bin("pulperia-nearby")
        .unwrap()
        .arg("--config")
        .arg(config.path())
        .args(["--format", "json", "policies"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let policies: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(policies["stores"]["inclusion"], "inclusive");
    assert_eq!(policies["jobs"]["inclusion"], "inclusive");
    assert_eq!(policies["products"]["inclusion"], "strict");
}

#[test]
fn missing_config_file_is_a_config_error() {
    Command::cargo_bin("pulperia-nearby")
        .unwrap()
        .args(["--config", "/nonexistent/pulperia.toml", "policies"])
        .assert()
        .code(3);
}

#[test]
fn bad_store_reference_does_not_fail_search() {
    let config = empty_config();
    let input = listings_file(json!([
        {"id": "A", "latitude": 14.0818, "longitude": -87.2068},
        {"id": "P", "pulperia": "p-9"},
        {"id": "S", "pulperia": "p-9", "store": {"latitude": 14.0918, "longitude": -87.2068}},
        "garbage"
    ]));

    let output = cmd(&config)
        .args(["--format", "json", "search", "jobs", "--input"])
        .arg(input.path())
        .args(["--param=lat=14.0818", "--param=lng=-87.2068", "--param=radius=2"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let output: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(ids(&output), vec!["A", "S", "P"]);
    assert_eq!(output["items"][1]["distanceSource"], "parent");
    assert_eq!(output["items"][1]["pulperia"], "p-9");
    assert!(output["items"][1]["store"].is_object());
    assert!(output["items"][2]["distance"].is_null());
}
