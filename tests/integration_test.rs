use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{anyhow, Result};
use tempfile::tempdir;

const BINARY: &str = env!("CARGO_BIN_EXE_transaction-enrichment");

fn read_rows(stdout: &[u8]) -> Result<Vec<HashMap<String, String>>> {
    let mut reader = csv::Reader::from_reader(stdout);
    let mut rows = Vec::new();

    for record in reader.deserialize() {
        rows.push(record?);
    }

    Ok(rows)
}

fn row<'a>(rows: &'a [HashMap<String, String>], transaction_id: &str) -> Result<&'a HashMap<String, String>> {
    rows.iter()
        .find(|row| row.get("transaction_id").map(String::as_str) == Some(transaction_id))
        .ok_or_else(|| anyhow!("{transaction_id} missing from output"))
}

#[test]
fn test_cli_enriches_sample_files() -> Result<()> {
    let output = Command::new(BINARY)
        .arg("enrich")
        .arg("--transactions")
        .arg(Path::new("samples").join("transactions.csv"))
        .arg("--cardholders")
        .arg(Path::new("samples").join("cardholders.csv"))
        .output()?;

    assert!(output.status.success());

    let rows = read_rows(&output.stdout)?;

    assert_eq!(rows.len(), 7);

    let expected = vec![
        ("T001", "Medium", "false", "Low", "4512"),
        ("T002", "High", "true", "Critical", "2150"),
        ("T003", "Low", "false", "Low", "8008"),
        ("T004", "Low", "false", "High", "310"),
        ("T005", "Medium", "false", "Low", "50"),
        ("T006", "High", "true", "Critical", "5750"),
        ("T007", "Low", "false", "Low", ""),
    ];

    for (transaction_id, category, high_risk, risk_level, points) in expected {
        let enriched = row(&rows, transaction_id)?;

        assert_eq!(enriched["transaction_category"], category, "{transaction_id}");
        assert_eq!(enriched["high_risk"], high_risk, "{transaction_id}");
        assert_eq!(enriched["fraud_risk_level"], risk_level, "{transaction_id}");
        assert_eq!(enriched["updated_reward_points"], points, "{transaction_id}");
    }

    let unmatched = row(&rows, "T007")?;

    assert_eq!(unmatched["customer_name"], "");
    assert_eq!(unmatched["risk_score"], "");

    assert_eq!(row(&rows, "T006")?["transaction_timestamp"], "2025-02-05T17:05:30Z");

    Ok(())
}

#[test]
fn test_cli_fails_on_malformed_timestamp_unless_isolated() -> Result<()> {
    let directory = tempdir()?;
    let transactions = directory.path().join("transactions.csv");
    let sample = fs::read_to_string(Path::new("samples").join("transactions.csv"))?;
    fs::write(&transactions, sample.replace("2025-02-04T12:30:00Z", "yesterday"))?;

    let failed = Command::new(BINARY)
        .args(["enrich", "--cardholders", "samples/cardholders.csv", "--transactions"])
        .arg(&transactions)
        .output()?;

    assert!(!failed.status.success());

    let isolated = Command::new(BINARY)
        .args(["--log-level", "warn", "enrich", "--isolate-malformed", "--cardholders", "samples/cardholders.csv", "--transactions"])
        .arg(&transactions)
        .output()?;

    assert!(isolated.status.success());
    assert_eq!(read_rows(&isolated.stdout)?.len(), 6);

    //NOTE: The isolated row is reported once, through the log only
    let stderr = String::from_utf8(isolated.stderr)?;
    assert_eq!(stderr.lines().filter(|line| line.contains("T002")).count(), 1);

    Ok(())
}

#[test]
fn test_cli_pipeline_processes_and_archives_local_directory() -> Result<()> {
    let root = tempdir()?;
    fs::create_dir_all(root.path().join("transactions"))?;
    fs::create_dir_all(root.path().join("cardholders"))?;
    fs::copy(Path::new("samples").join("transactions.csv"), root.path().join("transactions").join("transactions_20250204.csv"))?;
    fs::copy(Path::new("samples").join("cardholders.csv"), root.path().join("cardholders").join("cardholders.csv"))?;

    let output = Command::new(BINARY)
        .arg("pipeline")
        .arg("--root")
        .arg(root.path())
        .args(["--timeout-secs", "1", "--poke-interval-secs", "1", "--retries", "0"])
        .output()?;

    assert!(output.status.success());

    let summary = String::from_utf8(output.stdout)?;

    assert!(summary.contains("enriched=7"));
    assert!(summary.contains("archived=1"));
    assert!(root.path().join("archive").join("transactions_20250204.csv").is_file());
    assert!(!root.path().join("transactions").join("transactions_20250204.csv").exists());
    assert_eq!(fs::read_dir(root.path().join("enriched"))?.count(), 1);

    Ok(())
}

#[test]
fn test_cli_pipeline_times_out_without_input() -> Result<()> {
    let root = tempdir()?;

    let output = Command::new(BINARY)
        .arg("pipeline")
        .arg("--root")
        .arg(root.path())
        .args(["--timeout-secs", "0", "--retries", "0"])
        .output()?;

    assert!(!output.status.success());
    assert!(!root.path().join("archive").exists());

    Ok(())
}
