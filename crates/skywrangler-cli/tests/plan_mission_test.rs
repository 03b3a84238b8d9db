//! End-to-end tests for the `plan_mission` binary.
//!
//! Run with: cargo test -p skywrangler-cli --test plan_mission_test

use std::path::PathBuf;
use std::process::Command;

fn demo_request() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/request.json")
}

fn plan_mission() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_plan_mission"));
    command
        .env_remove("SKYWRANGLER_SAFE_ALTITUDE")
        .env_remove("SKYWRANGLER_SPEED")
        .env_remove("SKYWRANGLER_GROUND_STATION")
        .env_remove("RUST_LOG");
    command
}

#[test]
fn test_writes_plan_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("survey.plan");

    let status = plan_mission()
        .arg("--request")
        .arg(demo_request())
        .arg("--output")
        .arg(&output)
        .status()
        .expect("Failed to run plan_mission");
    assert!(status.success());

    let plan: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(plan["groundStation"], "SkyWrangler");
    assert_eq!(plan["mission"]["items"].as_array().unwrap().len(), 7);
    assert_eq!(plan["mission"]["items"][1]["Altitude"], 407.0);
}

#[test]
fn test_overrides_from_environment() {
    let out = plan_mission()
        .arg("--request")
        .arg(demo_request())
        .env("SKYWRANGLER_SAFE_ALTITUDE", "60")
        .env("SKYWRANGLER_GROUND_STATION", "QGroundControl")
        .output()
        .expect("Failed to run plan_mission");
    assert!(out.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(plan["groundStation"], "QGroundControl");
    assert_eq!(plan["mission"]["items"][0]["Altitude"], 60.0);
    assert_eq!(plan["mission"]["items"][1]["Altitude"], 367.0);
}

#[test]
fn test_rejects_malformed_request() {
    let dir = tempfile::tempdir().unwrap();
    let request = dir.path().join("request.json");
    std::fs::write(&request, r#"{"home": {"latitude": 35.9, "longitude": -97.2}}"#).unwrap();

    let out = plan_mission()
        .arg("--request")
        .arg(&request)
        .output()
        .expect("Failed to run plan_mission");
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("home.altitude"));
}
