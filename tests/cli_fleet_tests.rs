//! Integration tests for the fleetstate binary against the fixture data set

use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const CA_0001: &str = "a7c53eb1-4f5e-4eba-9764-ad205d0891f9";
const HV_1001: &str = "1c7e9615-cc8f-4f4c-b9a7-8e2d8c1e4d58";
const CA_0002: &str = "491b983b-950c-4ffd-8ee4-c2ad61b0e7d2";
const HV_1003: &str = "5d8e2f41-7c3a-4b9e-a0d6-3f1b2c4e5a67";

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fleet")
}

// ============================================================================
// summary
// ============================================================================

#[test]
fn test_summary_text_lists_every_equipment() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fleetstate");
    cmd.arg("summary").arg("--data").arg(fixture_dir());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("trailing 24h window"))
        .stdout(predicate::str::contains("CA-0001"))
        .stdout(predicate::str::contains("HV-1001"))
        .stdout(predicate::str::contains("CA-0002"))
        .stdout(predicate::str::contains("HV-1002"))
        .stdout(predicate::str::contains("HV-1003"))
        .stdout(predicate::str::contains("1530.00"));
}

#[test]
fn test_summary_malformed_history_is_reported_not_fatal() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fleetstate");
    cmd.arg("summary").arg("-d").arg(fixture_dir());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("2021-02-30"));
}

#[test]
fn test_summary_json_parses() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fleetstate");
    cmd.arg("summary")
        .arg("-d")
        .arg(fixture_dir())
        .arg("--format")
        .arg("json");

    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["format"], "fleetstate-json-v1");
    assert_eq!(parsed["window_hours"], 24.0);

    let equipment = parsed["equipment"].as_array().unwrap();
    assert_eq!(equipment.len(), 5);

    let ca = equipment.iter().find(|e| e["id"] == CA_0001).unwrap();
    assert_eq!(ca["operating_hours"], 16.0);
    assert_eq!(ca["maintenance_hours"], 2.0);
    assert_eq!(ca["productivity"], 66.67);
    assert_eq!(ca["earnings"], 1530.0);
    assert_eq!(ca["state"], "Operando");

    let bad = equipment.iter().find(|e| e["id"] == CA_0002).unwrap();
    assert!(bad["error"].is_string());

    let unmodelled = equipment.iter().find(|e| e["id"] == HV_1003).unwrap();
    assert_eq!(unmodelled["operating_hours"], 22.0);
    assert_eq!(unmodelled["earnings"], 0.0);
}

#[test]
fn test_summary_csv() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fleetstate");
    cmd.arg("summary")
        .arg("-d")
        .arg(fixture_dir())
        .arg("--format")
        .arg("csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(
            "equipment_id,name,model,state,operating_hours",
        ))
        .stdout(predicate::str::contains(
            "1c7e9615-cc8f-4f4c-b9a7-8e2d8c1e4d58,HV-1001,Harvester,Operando,8.00,0.00,33.33,1440.00",
        ))
        .stdout(predicate::str::contains(
            "5d8e2f41-7c3a-4b9e-a0d6-3f1b2c4e5a67,HV-1003,,Operando,22.00,2.00,91.67,0.00",
        ));
}

#[test]
fn test_summary_window_override() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fleetstate");
    cmd.arg("summary")
        .arg("-d")
        .arg(fixture_dir())
        .arg("--window-hours")
        .arg("4")
        .arg("--format")
        .arg("json");

    let output = cmd.output().unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ca = parsed["equipment"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["id"] == CA_0001)
        .unwrap()
        .clone();

    // Last 4h of CA-0001: operating since 20:00
    assert_eq!(parsed["window_hours"], 4.0);
    assert_eq!(ca["operating_hours"], 4.0);
    assert_eq!(ca["productivity"], 100.0);
}

#[test]
fn test_summary_config_file() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("metrics.toml");
    fs::write(
        &config,
        r#"
window_hours = 24.0
operating_state_id = "baff9783-84e8-4e01-874b-6fd743b875ad"
"#,
    )
    .unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fleetstate");
    cmd.arg("summary")
        .arg("-d")
        .arg(fixture_dir())
        .arg("--config")
        .arg(&config)
        .arg("--format")
        .arg("json");

    let output = cmd.output().unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let hv = parsed["equipment"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["id"] == HV_1001)
        .unwrap()
        .clone();

    // "operating" now means the idle state: 16h of HV-1001's window
    assert_eq!(hv["operating_hours"], 16.0);
}

#[test]
fn test_invalid_window_is_rejected() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fleetstate");
    cmd.arg("summary")
        .arg("-d")
        .arg(fixture_dir())
        .arg("--window-hours")
        .arg("0");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("window_hours"));
}

#[test]
fn test_missing_data_dir_fails() {
    let tmp = TempDir::new().unwrap();
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fleetstate");
    cmd.arg("summary").arg("-d").arg(tmp.path().join("nope"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load fleet data"));
}

// ============================================================================
// durations / history
// ============================================================================

#[test]
fn test_durations_text() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fleetstate");
    cmd.arg("durations")
        .arg("-d")
        .arg(fixture_dir())
        .arg("-e")
        .arg(CA_0001);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("CA-0001"))
        .stdout(predicate::str::contains("Operando"))
        .stdout(predicate::str::contains("16.00h"))
        .stdout(predicate::str::contains("Parado"))
        .stdout(predicate::str::contains("6.00h"));
}

#[test]
fn test_durations_json() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fleetstate");
    cmd.arg("durations")
        .arg("-d")
        .arg(fixture_dir())
        .arg("-e")
        .arg(HV_1001)
        .arg("--format")
        .arg("json");

    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["total_hours"], 24.0);
    assert_eq!(parsed["durations"][0]["state"], "Parado");
    assert_eq!(parsed["durations"][0]["hours"], 16.0);
}

#[test]
fn test_durations_unknown_equipment() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fleetstate");
    cmd.arg("durations")
        .arg("-d")
        .arg(fixture_dir())
        .arg("-e")
        .arg("does-not-exist");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown equipment: does-not-exist"));
}

#[test]
fn test_durations_malformed_history_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fleetstate");
    cmd.arg("durations")
        .arg("-d")
        .arg(fixture_dir())
        .arg("-e")
        .arg(CA_0002);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("malformed timestamp"));
}

#[test]
fn test_history_text_is_chronological() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fleetstate");
    cmd.arg("history")
        .arg("-d")
        .arg(fixture_dir())
        .arg("-e")
        .arg(HV_1001);

    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    let first = stdout.find("27/02/2021 00:00").unwrap();
    let second = stdout.find("27/02/2021 20:00").unwrap();
    let third = stdout.find("28/02/2021 12:00").unwrap();
    assert!(first < second && second < third);
}

#[test]
fn test_csv_rejected_for_history() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fleetstate");
    cmd.arg("history")
        .arg("-d")
        .arg(fixture_dir())
        .arg("-e")
        .arg(HV_1001)
        .arg("--format")
        .arg("csv");

    cmd.assert().failure();
}
