// csvload/tests/cli_integration_tests.rs
//! Command-line integration tests for the `csvload` binary.
//!
//! Each test runs the real executable inside an isolated temporary directory, so the
//! implicit `./config.yaml` lookup only sees what the test writes. `HOME`,
//! `XDG_CONFIG_HOME` and `APPDATA` point into the same directory, which keeps a real
//! user-level `csvload/config.yaml` out of the run. `CSVLOAD_CONFIG` is cleared for the
//! spawned process. JSON output is parsed with `serde_json` for assertions; table output
//! is checked by substring.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use test_log::test;

/// Builds a `csvload` command running inside `dir`.
fn csvload_in(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("csvload").unwrap();
    cmd.current_dir(dir);
    cmd.env("HOME", dir);
    cmd.env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd.env("APPDATA", dir);
    cmd.env_remove("CSVLOAD_CONFIG");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Creates one small CSV file per name inside `dir`.
fn touch_csv(dir: &Path, names: &[&str]) -> Result<()> {
    for name in names {
        fs::write(dir.join(name), "id,name\n1,alpha\n")?;
    }
    Ok(())
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn no_arguments_prints_help() -> Result<()> {
    let dir = TempDir::new()?;
    csvload_in(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
    Ok(())
}

#[test]
fn sanitize_prints_table_names() -> Result<()> {
    let dir = TempDir::new()?;
    csvload_in(dir.path())
        .args(["sanitize", "CustomerAccount_2025-10-09_183621.csv", "sales data-2024.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CustomerAccount"))
        .stdout(predicate::str::contains("SalesData"));
    Ok(())
}

#[test]
fn sanitize_json_output() -> Result<()> {
    let dir = TempDir::new()?;
    let output = csvload_in(dir.path())
        .args(["sanitize", "--json", "orders_v2_backup_001.csv", "___.csv", "2024_report.csv"])
        .output()?;
    assert!(output.status.success());

    let rows = stdout_json(&output);
    let names: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["table_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Orders", "UnnamedTable", "_2024Report"]);
    assert!(rows.as_array().unwrap().iter().all(|r| r["valid"] == true));
    Ok(())
}

#[test]
fn sanitize_without_pascal_case() -> Result<()> {
    let dir = TempDir::new()?;
    let output = csvload_in(dir.path())
        .args(["sanitize", "--no-pascal-case", "--json", "sales data-2024.csv"])
        .output()?;
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)[0]["table_name"], "sales_data");
    Ok(())
}

#[test]
fn names_lists_folder_in_sorted_order() -> Result<()> {
    let dir = TempDir::new()?;
    touch_csv(
        dir.path(),
        &["orders_v2_backup_001.csv", "CustomerAccount_2025-10-09_183621.csv", "Product-Info_20251009.csv"],
    )?;
    fs::write(dir.path().join("notes.txt"), "not a csv")?;

    let output = csvload_in(dir.path())
        .args(["names", "--prefix", "tbl_", "--json"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report = stdout_json(&output);
    assert_eq!(report["table_prefix"], "tbl_");
    let tables = report["tables"].as_array().unwrap();
    let pairs: Vec<(&str, &str)> = tables
        .iter()
        .map(|t| (t["filename"].as_str().unwrap(), t["table_name"].as_str().unwrap()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("CustomerAccount_2025-10-09_183621.csv", "tbl_CustomerAccount"),
            ("Product-Info_20251009.csv", "tbl_ProductInfo"),
            ("orders_v2_backup_001.csv", "tbl_Orders"),
        ]
    );
    Ok(())
}

#[test]
fn names_reads_config_from_working_directory() -> Result<()> {
    let dir = TempDir::new()?;
    let data = dir.path().join("data");
    fs::create_dir(&data)?;
    touch_csv(&data, &["OrderHistory_20251114_093000.csv", "Customers.csv"])?;
    fs::write(
        dir.path().join("config.yaml"),
        r#"
csv_processing:
  input_folder: data
file_selection:
  mode: selected
  selected_files:
    - OrderHistory_20251114_093000.csv
    - Missing.csv
table_loading:
  schema: staging
  table_prefix: "stg_"
  create_indexes:
    OrderHistory: [order_id, placed_at]
logging:
  level: warning
"#,
    )?;

    let output = csvload_in(dir.path()).args(["names", "--json"]).output()?;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report = stdout_json(&output);
    assert_eq!(report["schema"], "staging");
    let tables = report["tables"].as_array().unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0]["table_name"], "stg_OrderHistory");
    assert_eq!(tables[0]["index_columns"], serde_json::json!(["order_id", "placed_at"]));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Missing.csv"), "missing file should be logged: {}", stderr);
    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn user_config_is_read_from_isolated_config_dir() -> Result<()> {
    let dir = TempDir::new()?;
    touch_csv(dir.path(), &["sales_data.csv"])?;
    let user_dir = dir.path().join(".config").join("csvload");
    fs::create_dir_all(&user_dir)?;
    fs::write(user_dir.join("config.yaml"), "table_loading:\n  table_prefix: \"usr_\"\n")?;

    let output = csvload_in(dir.path())
        .args(["names", "--input-folder", ".", "--json"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report = stdout_json(&output);
    assert_eq!(report["table_prefix"], "usr_");
    assert_eq!(report["tables"][0]["table_name"], "usr_SalesData");
    Ok(())
}

#[test]
fn names_table_output_is_schema_qualified() -> Result<()> {
    let dir = TempDir::new()?;
    touch_csv(dir.path(), &["sales_data.csv"])?;
    csvload_in(dir.path())
        .args(["names", "--input-folder", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("dbo.SalesData"))
        .stderr(predicate::str::contains("Resolved 1 file(s)"));
    Ok(())
}

#[test]
fn names_reports_prefix_warnings() -> Result<()> {
    let dir = TempDir::new()?;
    touch_csv(dir.path(), &["sales_data.csv"])?;
    let output = csvload_in(dir.path())
        .args(["names", "--prefix", "123_", "--json"])
        .output()?;
    assert!(output.status.success());

    let row = &stdout_json(&output)["tables"][0];
    assert_eq!(row["table_name"], "_123_SalesData");
    assert_eq!(row["warnings"][0]["kind"], "prefix_sanitized");
    assert_eq!(row["warnings"][0]["original"], "123_");
    Ok(())
}

#[test]
fn names_fails_when_no_csv_files() -> Result<()> {
    let dir = TempDir::new()?;
    csvload_in(dir.path())
        .args(["names"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No CSV files found"));
    Ok(())
}

#[test]
fn missing_explicit_config_is_an_error() -> Result<()> {
    let dir = TempDir::new()?;
    csvload_in(dir.path())
        .args(["sanitize", "a.csv", "--config", "nowhere.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nowhere.yaml"));
    Ok(())
}

#[test]
fn invalid_custom_pattern_is_an_error() -> Result<()> {
    let dir = TempDir::new()?;
    let config = dir.path().join("bad.yaml");
    fs::write(&config, "filename_sanitization:\n  custom_patterns: ['(unclosed']\n")?;
    csvload_in(dir.path())
        .args(["sanitize", "a.csv", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("(unclosed"));
    Ok(())
}

#[test]
fn quiet_suppresses_summary() -> Result<()> {
    let dir = TempDir::new()?;
    touch_csv(dir.path(), &["sales_data.csv"])?;
    csvload_in(dir.path())
        .args(["-q", "names"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SalesData"))
        .stderr(predicate::str::is_empty());
    Ok(())
}
