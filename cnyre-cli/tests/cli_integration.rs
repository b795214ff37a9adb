mod common;

use anyhow::Result;
use cnyre_core::Compression;
use cnyre_test::TestEnvironment;
use predicates::prelude::*;
use std::fs;

use common::*;

#[test]
fn test_cli_help_command() -> Result<()> {
    let env = TestEnvironment::new()?;
    cnyre_cmd(&env)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("browse"))
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("facets"));
    Ok(())
}

#[test]
fn test_sync_downloads_then_reports_current() -> Result<()> {
    let (env, config) = published_environment(Compression::Gzip)?;

    cnyre_cmd(&env)
        .arg("--config")
        .arg(&config)
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Download complete"))
        .stdout(predicate::str::contains("6 property records"));

    assert_eq!(
        fs::read_to_string(env.data_dir().join("version.txt"))?,
        "2024-06-01"
    );

    cnyre_cmd(&env)
        .arg("--config")
        .arg(&config)
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Local data is current"));
    Ok(())
}

#[test]
fn test_browse_oswego_descending() -> Result<()> {
    let (env, config) = published_environment(Compression::None)?;

    let output = cnyre_cmd(&env)
        .arg("--config")
        .arg(&config)
        .args(["browse", "--county", "Oswego", "--direction", "descending"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 1 of 1 (2 rows)"))
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output)?;
    let high = stdout.find("175,000.00").expect("higher value listed");
    let low = stdout.find("100,000.00").expect("lower value listed");
    assert!(high < low);
    assert!(!stdout.contains("CAY-001"));
    Ok(())
}

#[test]
fn test_browse_page_is_clamped() -> Result<()> {
    let (env, config) = published_environment(Compression::Gzip)?;

    cnyre_cmd(&env)
        .arg("--config")
        .arg(&config)
        .args(["browse", "--page", "40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 1 of 1 (6 rows)"));
    Ok(())
}

#[test]
fn test_browse_search_and_json() -> Result<()> {
    let (env, config) = published_environment(Compression::Gzip)?;

    let output = cnyre_cmd(&env)
        .arg("--config")
        .arg(&config)
        .args([
            "browse",
            "--search",
            "LAKE",
            "--search-column",
            "address_street",
            "--json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let rows: serde_json::Value = serde_json::from_slice(&output)?;
    let rows = rows.as_array().expect("json array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "OSW-002");
    Ok(())
}

#[test]
fn test_browse_rejects_unlisted_page_size() -> Result<()> {
    let (env, config) = published_environment(Compression::Gzip)?;

    cnyre_cmd(&env)
        .arg("--config")
        .arg(&config)
        .args(["browse", "--page-size", "7"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Page size 7"));
    Ok(())
}

#[test]
fn test_stats_summary() -> Result<()> {
    let (env, config) = published_environment(Compression::Gzip)?;

    cnyre_cmd(&env)
        .arg("--config")
        .arg(&config)
        .args(["stats", "--county", "Oswego"])
        .assert()
        .success()
        .stdout(predicate::str::contains("QUARTILES"))
        .stdout(predicate::str::contains("137,500.00"));
    Ok(())
}

#[test]
fn test_facets_lists_options() -> Result<()> {
    let (env, config) = published_environment(Compression::Gzip)?;

    cnyre_cmd(&env)
        .arg("--config")
        .arg(&config)
        .args(["facets", "--county", "Oswego"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cortland"))
        .stdout(predicate::str::contains("Fulton City"))
        .stdout(predicate::str::contains("Auburn City").not());
    Ok(())
}

#[test]
fn test_info_before_and_after_sync() -> Result<()> {
    let (env, config) = published_environment(Compression::Gzip)?;

    cnyre_cmd(&env)
        .arg("--config")
        .arg(&config)
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("not downloaded"))
        .stdout(predicate::str::contains("file://"));

    cnyre_cmd(&env)
        .arg("--config")
        .arg(&config)
        .arg("sync")
        .assert()
        .success();

    cnyre_cmd(&env)
        .arg("--config")
        .arg(&config)
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-06-01"));
    Ok(())
}
