use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "citysim-rs-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_file(dir: &PathBuf, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write temp file");
    path
}

fn done_line(stdout: &str) -> Option<&str> {
    stdout.lines().find(|line| line.starts_with("done "))
}

#[test]
fn city_sim_runs_scenario_and_writes_snapshot() {
    let dir = unique_temp_dir("city-sim");
    let scenario = write_file(
        &dir,
        "scenario.json",
        r#"
{
    "schema_version": 1,
    "seed": "harbor",
    "generator": { "width": 480, "height": 480 },
    "run": { "ticks": 20, "delta_seconds": 60 },
    "actions": [
        { "at_tick": 0, "action": { "id": "p1", "type": "park", "payload": { "position": { "x": 0, "z": 0 } } } },
        { "at_tick": 1, "action": { "id": "bad", "type": "clear", "payload": {} } }
    ]
}
        "#,
    );
    let snapshot = dir.join("snapshot.json");

    let output = Command::new(env!("CARGO_BIN_EXE_city_sim"))
        .args([
            "--scenario",
            scenario.to_str().unwrap(),
            "--snapshot-json",
            snapshot.to_str().unwrap(),
        ])
        .env("RUST_LOG", "warn")
        .output()
        .expect("run city_sim");
    assert!(
        output.status.success(),
        "city_sim failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = done_line(&stdout).expect("done line");
    assert!(line.starts_with("done day=0 "), "unexpected summary: {line}");
    assert!(line.contains(" stage="));
    assert!(line.contains(" actions_applied=1 actions_ignored=1 actions_skipped=0"));

    let raw = fs::read_to_string(&snapshot).expect("read snapshot.json");
    let v: Value = serde_json::from_str(&raw).expect("parse snapshot.json");
    let hours = v.pointer("/time/elapsed_hours").and_then(|h| h.as_f64()).expect("elapsed hours");
    assert!((hours - 10.0).abs() < 1e-9);
    let citizens = v.get("citizens").and_then(|c| c.as_array()).expect("citizens array");
    assert_eq!(citizens.len(), 150);
    let events = v.get("events").and_then(|e| e.as_array()).expect("events array");
    let user_actions = events
        .iter()
        .filter(|e| e.get("type").and_then(|t| t.as_str()) == Some("user-action"))
        .count();
    assert_eq!(user_actions, 2);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn city_sim_flags_override_scenario_defaults() {
    let output = Command::new(env!("CARGO_BIN_EXE_city_sim"))
        .args([
            "--seed",
            "meadow",
            "--ticks",
            "4",
            "--delta-seconds",
            "30",
            "--time-scale",
            "120",
        ])
        .env("RUST_LOG", "warn")
        .output()
        .expect("run city_sim");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = done_line(&stdout).expect("done line");
    // 4 × 30 s × 120 = 4 小时，从 8 点开始
    assert!(line.starts_with("done day=0 hour=12.00 "), "unexpected summary: {line}");
}

#[test]
fn city_sim_rejects_unsupported_schema() {
    let dir = unique_temp_dir("city-sim-schema");
    let scenario = write_file(&dir, "scenario.json", r#"{ "schema_version": 9 }"#);

    let output = Command::new(env!("CARGO_BIN_EXE_city_sim"))
        .args(["--scenario", scenario.to_str().unwrap()])
        .output()
        .expect("run city_sim");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("schema_version 9"), "stderr={stderr}");

    let _ = fs::remove_dir_all(&dir);
}
