//! Integration tests for the bearing CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get a bearing command
fn bearing() -> Command {
    let mut cmd = Command::cargo_bin("bearing").unwrap();
    cmd.env_remove("ROLLWISE_TABLES")
        .env_remove("ROLLWISE_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

const TYPICAL: [&str; 9] = [
    "design", "--bore", "180", "--outer", "250", "--width", "160", "--radial", "400",
];

/// Run a design with `--json` and parse stdout
fn design_json(extra: &[&str]) -> serde_json::Value {
    let output = bearing()
        .args(TYPICAL)
        .args(extra)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_design_text_report() {
    bearing()
        .args(TYPICAL)
        .args(["--rpm", "500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BEARING DESIGN RESULTS"))
        .stdout(predicate::str::contains("Z      = 32 rollers per row"))
        .stdout(predicate::str::contains("16 x 24 mm"))
        .stdout(predicate::str::contains("(exact match)"))
        .stdout(predicate::str::contains("Candidate lengths: 24, 16 mm"));
}

#[test]
fn test_design_json() {
    let result = design_json(&["--rpm", "500"]);
    assert_eq!(result["derived"]["roller_count"], 32);
    assert_eq!(result["race_groove"]["method"], "ExactMatch");
    assert_eq!(result["selection"]["status"], "Selected");
    assert_eq!(result["selection"]["roller"]["record"]["dw_mm"], 16.0);
    assert!(result["ratings"]["cr_n"].as_f64().unwrap() > 0.0);
    assert!(result["life"]["l10h_hours"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_design_from_designation() {
    let output = bearing()
        .args(["design", "--designation", "180RV2501", "--radial", "400", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["geometry"]["outer_d_mm"], 250.0);
    assert_eq!(result["reference_bearing"]["designation"], "180RV2501");
}

#[test]
fn test_missing_dimension_fails() {
    bearing()
        .args(["design", "--outer", "250", "--width", "160", "--radial", "400"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--bore is required"));
}

#[test]
fn test_invalid_rows_fails() {
    bearing()
        .args(TYPICAL)
        .args(["--rows", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("INVALID_INPUT"));
}

#[test]
fn test_no_fit_reported() {
    bearing()
        .args(["design", "--bore", "180", "--outer", "250", "--width", "5", "--radial", "400"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no catalog roller fits"))
        .stdout(predicate::str::contains("no roller selected"));
}

#[test]
fn test_custom_roller() {
    let result = design_json(&["--custom-dw", "18", "--custom-lw", "30"]);
    assert_eq!(result["selection"]["roller"]["source"], "Custom");
    assert_eq!(result["selection"]["roller"]["record"]["r_max_mm"], 0.6);
}

#[test]
fn test_custom_roller_needs_both_dimensions() {
    bearing().args(TYPICAL).args(["--custom-dw", "18"]).assert().failure();
}

#[test]
fn test_roller_length_choice() {
    let result = design_json(&["--roller-length", "16"]);
    assert_eq!(result["selection"]["roller"]["record"]["lw_mm"], 16.0);

    bearing()
        .args(TYPICAL)
        .args(["--roller-length", "17"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("preferred_roller_length"));
}

#[test]
fn test_race_groove_override_infeasible() {
    bearing()
        .args(TYPICAL)
        .args(["--race-groove", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEOMETRY_INFEASIBLE"));
}

#[test]
fn test_required_life_verdict() {
    bearing()
        .args(TYPICAL)
        .args(["--rpm", "500", "--life-hours", "1000000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[FAIL] required life"));
}

#[test]
fn test_required_life_without_speed_not_evaluated() {
    bearing()
        .args(TYPICAL)
        .args(["--rpm", "0", "--life-hours", "20000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("required life 20000 h not evaluated (no speed)"))
        .stdout(predicate::str::contains("design complete").not());
}

#[test]
fn test_show_equations() {
    bearing()
        .args(TYPICAL)
        .arg("--show-equations")
        .assert()
        .success()
        .stdout(predicate::str::contains("## Equations Applied"))
        .stdout(predicate::str::contains("Basic Dynamic Load Rating"));
}

#[test]
fn test_prefill() {
    bearing()
        .args(["prefill", "180rv2501"])
        .assert()
        .success()
        .stdout(predicate::str::contains("D = 250.00 mm"))
        .stdout(predicate::str::contains("Cr (catalog) = 1830.00 kN"));
}

#[test]
fn test_prefill_unknown_designation() {
    bearing()
        .args(["prefill", "NOPE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("LOOKUP_FAILED"));
}

#[test]
fn test_equations_reference() {
    bearing()
        .arg("equations")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Rollwise Equations Reference"));
}

#[test]
fn test_settings_roundtrip_through_config() {
    let tmp = TempDir::new().unwrap();
    let output = bearing().arg("settings").output().unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("clearance_margin"));

    let path = tmp.path().join("rollwise.toml");
    fs::write(&path, text).unwrap();
    let result = design_json(&["--config", path.to_str().unwrap()]);
    assert_eq!(result["selection"]["roller"]["record"]["dw_mm"], 16.0);
}

#[test]
fn test_config_changes_margin() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("rollwise.toml");
    // 21 - 0.05 · 215 = 10.25
    fs::write(&path, "clearance_margin = 0.05\n").unwrap();
    let result = design_json(&["--config", path.to_str().unwrap()]);
    assert_eq!(result["selection"]["roller"]["record"]["dw_mm"], 10.0);
}

#[test]
fn test_invalid_config_fails() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bad.toml");
    fs::write(&path, "clearance_margin = 2.0\n").unwrap();
    bearing()
        .args(TYPICAL)
        .args(["--config", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CONFIG_ERROR"));
}

#[test]
fn test_custom_tables_dir() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("roller_catalog.csv"),
        "dw,lw,r_min,r_max,mass_per_100\n12,20,0.3,0.8,1.8\n",
    )
    .unwrap();
    fs::write(
        tmp.path().join("race_groove.csv"),
        "inner_diameter,outer_diameter,F\n180,250,194\n",
    )
    .unwrap();
    fs::write(tmp.path().join("fc_factor.csv"), "ratio,fc\n0.05,74.1\n0.10,84.2\n").unwrap();

    let output = bearing()
        .args(TYPICAL)
        .args(["--tables", tmp.path().to_str().unwrap(), "--json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["selection"]["roller"]["record"]["dw_mm"], 12.0);
}

#[test]
fn test_missing_tables_dir_fails() {
    let tmp = TempDir::new().unwrap();
    bearing()
        .args(TYPICAL)
        .args(["--tables", tmp.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading lookup tables"));
}
