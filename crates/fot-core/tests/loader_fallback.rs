// SPDX-License-Identifier: MIT
// Copyright (c) 2026 FlightOnTime Team

mod common;

use fot_core::{AutocompleteField, DataLoader, OptionCatalog, OptionsOrigin, OptionsSource};
use std::fs;

fn suggests_atlanta(catalog: OptionCatalog) -> bool {
    let mut field = AutocompleteField::new("airport", catalog.airports);
    field.on_input("ATL");
    field
        .suggestions()
        .iter()
        .any(|s| s.label() == "ATL - Atlanta Municipal")
}

#[test]
fn test_missing_file_uses_fallback() -> anyhow::Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let source = OptionsSource::File(temp_dir.path().join("frontend_options.json"));

    let outcome = DataLoader::new(source).load();
    assert_eq!(outcome.origin, OptionsOrigin::Fallback);
    assert_eq!(outcome.catalog, OptionCatalog::fallback());
    assert!(suggests_atlanta(outcome.catalog));
    Ok(())
}

#[test]
fn test_malformed_file_uses_fallback() -> anyhow::Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("frontend_options.json");
    fs::write(&path, "{\"airports\": [")?;

    let loader = DataLoader::new(OptionsSource::File(path));
    assert!(loader.fetch().is_err());
    assert_eq!(loader.load().origin, OptionsOrigin::Fallback);
    Ok(())
}

#[test]
fn test_valid_file_is_used() -> anyhow::Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("frontend_options.json");
    fs::write(
        &path,
        r#"{
            "airports": [{"label": "BOS - Boston Logan", "value": "Logan International", "code": "BOS"}],
            "carriers": [{"label": "AS - Alaska Airlines", "value": "Alaska Airlines Inc."}]
        }"#,
    )?;

    let outcome = DataLoader::new(OptionsSource::parse(path.to_str().unwrap())).load();
    assert_eq!(outcome.origin, OptionsOrigin::Remote);
    assert_eq!(outcome.catalog.airports.len(), 1);
    assert_eq!(outcome.catalog.carriers[0].value, "Alaska Airlines Inc.");
    assert!(!suggests_atlanta(outcome.catalog));
    Ok(())
}

#[test]
fn test_unreachable_url_uses_fallback() {
    let loader = DataLoader::new(OptionsSource::Url(common::refused_url()))
        .with_client(common::local_client());
    let outcome = loader.load();
    assert_eq!(outcome.origin, OptionsOrigin::Fallback);
    assert!(suggests_atlanta(outcome.catalog));
}

#[test]
fn test_http_error_status_uses_fallback() {
    let (base, server) = common::serve_once("404 Not Found", "{}");
    let loader = DataLoader::new(OptionsSource::Url(format!("{}/frontend_options.json", base)))
        .with_client(common::local_client());

    assert_eq!(loader.load().origin, OptionsOrigin::Fallback);
    let request = server.join().unwrap();
    assert!(request.starts_with("GET /frontend_options.json"));
}

#[test]
fn test_url_source_is_fetched_once() {
    let body = r#"{"airports": [{"label": "DEN - Denver", "value": "Denver International", "code": "DEN"}], "carriers": []}"#;
    let (base, server) = common::serve_once("200 OK", body);
    let loader = DataLoader::new(OptionsSource::Url(format!("{}/frontend_options.json", base)))
        .with_client(common::local_client());

    let outcome = loader.load();
    server.join().unwrap();
    assert_eq!(outcome.origin, OptionsOrigin::Remote);
    assert_eq!(outcome.catalog.airports[0].code.as_deref(), Some("DEN"));
    assert!(outcome.catalog.carriers.is_empty());
}
