//! Integration tests for the rca CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get an rca command isolated from the user's config
fn rca(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rca").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("RCA_CONFIG")
        .env_remove("RCA_CHART_WIDTH")
        .env_remove("RCA_PREPARED_BY")
        .env_remove("RCA_LOG")
        .env_remove("RCA_LOG_FORMAT")
        .env("RCA_INTAKE_DELAY_MS", "0");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

fn json_of(cmd: &mut Command) -> serde_json::Value {
    serde_json::from_str(&stdout_of(cmd)).unwrap()
}

// ============================================================================
// Basic CLI
// ============================================================================

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    rca(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("walk"))
        .stdout(predicate::str::contains("kpi"))
        .stdout(predicate::str::contains("report"));
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    rca(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rca"));
}

#[test]
fn test_unknown_command_fails() {
    let home = TempDir::new().unwrap();
    rca(&home).arg("frobnicate").assert().failure();
}

// ============================================================================
// Walk
// ============================================================================

#[test]
fn test_walk_runs_to_completion() {
    let home = TempDir::new().unwrap();
    let out = stdout_of(rca(&home).args(["walk", "--yes", "--no-delay"]));

    assert!(out.contains("Welcome to the RCA Workbench"));
    assert!(out.contains("Complaint submitted"));
    assert!(out.contains("Step 2 of 6 · Traceability"));
    assert!(out.contains("Step 6 of 6 · KPI Tracking"));
    assert!(out.contains("Analysis Complete!"));
    assert!(out.contains("-61.7%"));
    assert!(out.contains("6/6 steps completed"));

    // Screens appear in workflow order
    let trace = out.find("Step 2 of 6").unwrap();
    let changes = out.find("Step 3 of 6").unwrap();
    let done = out.find("Analysis Complete!").unwrap();
    assert!(trace < changes && changes < done);
}

#[test]
fn test_walk_ignores_submitted_values_downstream() {
    let home = TempDir::new().unwrap();
    let out = stdout_of(rca(&home).args([
        "walk",
        "--yes",
        "--no-delay",
        "--serial-number",
        "XYZ-999",
        "--reported-date",
        "",
    ]));

    // The submitted value is echoed back...
    assert!(out.contains("XYZ-999"));
    // ...but traceability still shows the bundled record
    let trace = out.find("Step 2 of 6 · Traceability").unwrap();
    assert!(out[trace..].contains("LOT-247"));
    assert!(!out[trace..].contains("XYZ-999"));
}

#[test]
fn test_walk_without_terminal_accepts_defaults() {
    let home = TempDir::new().unwrap();
    rca(&home)
        .arg("walk")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Analysis Complete!"));
}

#[test]
fn test_walk_quiet_hides_progress() {
    let home = TempDir::new().unwrap();
    let out = stdout_of(rca(&home).args(["walk", "-y", "--no-delay", "-q"]));
    assert!(!out.contains("steps completed"));
    assert!(out.contains("Analysis Complete!"));
}

// ============================================================================
// Show
// ============================================================================

#[test]
fn test_show_kpi_stage() {
    let home = TempDir::new().unwrap();
    rca(&home)
        .args(["show", "kpi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Step 6 of 6 · KPI Tracking"))
        .stdout(predicate::str::contains("5/6 steps completed"))
        .stdout(predicate::str::contains("↓ 61.7%"))
        .stdout(predicate::str::contains("Target Met"))
        .stdout(predicate::str::contains("In Progress"));
}

#[test]
fn test_show_stage_is_case_insensitive() {
    let home = TempDir::new().unwrap();
    rca(&home)
        .args(["show", "Hypothesis", "--no-progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#1 HYP-001"))
        .stdout(predicate::str::contains("steps completed").not());
}

#[test]
fn test_show_invalid_stage_fails() {
    let home = TempDir::new().unwrap();
    rca(&home)
        .args(["show", "review"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid stage"));
}

#[test]
fn test_show_stage_data_as_json() {
    let home = TempDir::new().unwrap();
    let json = json_of(rca(&home).args(["show", "traceability", "-f", "json"]));
    assert_eq!(json["traceability"]["lot"], "LOT-247");
    assert_eq!(json["traceability"]["child_parts"].as_array().unwrap().len(), 3);
    assert_eq!(json["leak_trend"].as_array().unwrap().len(), 13);
}

#[test]
fn test_show_complete_summary_as_yaml() {
    let home = TempDir::new().unwrap();
    rca(&home)
        .args(["show", "complete", "-f", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("countermeasures: 4"))
        .stdout(predicate::str::contains("confidence: 85"));
}

// ============================================================================
// List
// ============================================================================

#[test]
fn test_list_changes_csv() {
    let home = TempDir::new().unwrap();
    let out = stdout_of(rca(&home).args(["list", "changes", "-f", "csv"]));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "id,date,category,impact,changed_by,description");
    assert!(lines[1].starts_with("CHG-001,2024-06-12,Material,High,Procurement Team,"));
    assert_eq!(lines.len(), 6);
}

#[test]
fn test_list_changes_filtered_json() {
    let home = TempDir::new().unwrap();
    let json = json_of(rca(&home).args(["list", "changes", "--category", "material", "-f", "json"]));
    let changes = json.as_array().unwrap();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0]["id"], "CHG-001");
    assert_eq!(changes[0]["category"], "material");

    let json = json_of(rca(&home).args(["list", "changes", "--impact", "high", "-f", "json"]));
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[test]
fn test_list_hypotheses_keep_stored_order() {
    let home = TempDir::new().unwrap();
    let out = stdout_of(rca(&home).args(["list", "hypotheses"]));
    let first = out.find("HYP-001").unwrap();
    let second = out.find("HYP-002").unwrap();
    let third = out.find("HYP-003").unwrap();
    assert!(first < second && second < third);
    assert!(out.contains("3 hypothesis(s) found."));
}

#[test]
fn test_list_actions_markdown() {
    let home = TempDir::new().unwrap();
    rca(&home)
        .args(["list", "actions", "-f", "md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("| ID | STATUS |"))
        .stdout(predicate::str::contains("| CM-001 | IN PROGRESS |"));
}

#[test]
fn test_list_limit_and_quiet() {
    let home = TempDir::new().unwrap();
    let out = stdout_of(rca(&home).args(["list", "agents", "-n", "2", "-q"]));
    assert!(out.contains("intake"));
    assert!(out.contains("traceability"));
    assert!(!out.contains("kpi"));
    assert!(!out.contains("found."));
}

// ============================================================================
// KPI
// ============================================================================

#[test]
fn test_kpi_calc_leak_rate() {
    let home = TempDir::new().unwrap();
    rca(&home)
        .args([
            "kpi",
            "calc",
            "--name",
            "Helium Leak NG Rate",
            "--before",
            "4.7",
            "--after",
            "1.8",
            "--target",
            "2.0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("↓ 61.7% (improving"))
        .stdout(predicate::str::contains("Target Met"));
}

#[test]
fn test_kpi_calc_fpy_target_not_met() {
    let home = TempDir::new().unwrap();
    rca(&home)
        .args([
            "kpi",
            "calc",
            "--name",
            "First Pass Yield (FPY)",
            "--before",
            "94.2",
            "--after",
            "97.8",
            "--target",
            "98.0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("↑ 3.8% (improving"))
        .stdout(predicate::str::contains("In Progress"));
}

#[test]
fn test_kpi_calc_mttr() {
    let home = TempDir::new().unwrap();
    rca(&home)
        .args([
            "kpi",
            "calc",
            "--name",
            "Mean Time To Repair",
            "--before",
            "18.5",
            "--after",
            "12.3",
            "--target",
            "15",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("↓ 33.5%"))
        .stdout(predicate::str::contains("Target Met"));
}

#[test]
fn test_kpi_calc_explicit_direction_overrides_name() {
    let home = TempDir::new().unwrap();
    let base = [
        "kpi", "calc", "--name", "Repair Yield", "--before", "90", "--after", "95", "--target", "92",
    ];

    rca(&home)
        .args(base)
        .assert()
        .success()
        .stdout(predicate::str::contains("In Progress"));

    rca(&home)
        .args(base)
        .arg("--higher-is-better")
        .assert()
        .success()
        .stdout(predicate::str::contains("Target Met"));
}

#[test]
fn test_kpi_calc_conflicting_directions_fail() {
    let home = TempDir::new().unwrap();
    rca(&home)
        .args([
            "kpi",
            "calc",
            "--name",
            "X",
            "--before",
            "1",
            "--after",
            "2",
            "--target",
            "3",
            "--lower-is-better",
            "--higher-is-better",
        ])
        .assert()
        .failure();
}

#[test]
fn test_kpi_calc_zero_baseline() {
    let home = TempDir::new().unwrap();
    let json = json_of(rca(&home).args([
        "kpi",
        "calc",
        "--name",
        "Defect Rate (PPM)",
        "--before",
        "0",
        "--after",
        "1800",
        "--target",
        "2000",
        "-f",
        "json",
    ]));
    assert!(json["percent_change"].is_null());
    assert_eq!(json["target_met"], true);
}

#[test]
fn test_kpi_calc_json() {
    let home = TempDir::new().unwrap();
    let json = json_of(rca(&home).args([
        "kpi",
        "calc",
        "--name",
        "Helium Leak NG Rate",
        "--before",
        "4.7",
        "--after",
        "1.8",
        "--target",
        "2.0",
        "--format",
        "json",
    ]));
    let magnitude = json["percent_change"]["magnitude"].as_f64().unwrap();
    assert!((magnitude - 61.7).abs() < 1e-9);
    assert_eq!(json["percent_change"]["improving"], true);
    assert_eq!(json["change_direction"], "lower_is_better");
}

#[test]
fn test_kpi_list() {
    let home = TempDir::new().unwrap();
    let json = json_of(rca(&home).args(["kpi", "list", "-f", "json"]));
    let kpis = json.as_array().unwrap();
    assert_eq!(kpis.len(), 4);
    assert_eq!(kpis[0]["target_met"], true);
    assert_eq!(kpis[1]["target_met"], false);

    rca(&home)
        .args(["kpi", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lower is better"))
        .stdout(predicate::str::contains("4 KPI(s) found."));
}

// ============================================================================
// Report
// ============================================================================

#[test]
fn test_report_to_file() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("report.md");

    rca(&home)
        .args(["report", "--prepared-by", "Quality Lab", "-o"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written to"));

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("# Root Cause Analysis Report: CMP-2024-0147"));
    assert!(content.contains("Prepared by Quality Lab on"));
    assert!(content.contains("| 85% | -61.7% | 4 |"));
    assert!(content.contains("Primary cause: Flux weight reduction"));
}

#[test]
fn test_report_prepared_by_from_env() {
    let home = TempDir::new().unwrap();
    rca(&home)
        .env("RCA_PREPARED_BY", "Line 3 QA")
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("Prepared by Line 3 QA on"));
}

#[test]
fn test_report_json() {
    let home = TempDir::new().unwrap();
    let json = json_of(rca(&home).args(["report", "-f", "json"]));
    assert_eq!(json["summary"]["confidence"], 85);
    assert_eq!(json["dataset"]["complaint"]["id"], "CMP-2024-0147");
    assert_eq!(json["kpis"].as_array().unwrap().len(), 4);
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_config_path() {
    let home = TempDir::new().unwrap();
    rca(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));
}

#[test]
fn test_config_file_is_layered() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("rca.yaml");
    fs::write(&path, "chart_width: 55\nprepared_by: Plant A\n").unwrap();

    rca(&home)
        .args(["config", "show", "chart_width", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout("55\n");

    // Environment beats the file
    rca(&home)
        .env("RCA_PREPARED_BY", "Env Name")
        .args(["config", "show", "prepared_by", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout("Env Name\n");
}

#[test]
fn test_invalid_config_file_fails() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("broken.yaml");
    fs::write(&path, "chart_width: [unclosed\n").unwrap();

    rca(&home)
        .args(["show", "welcome", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config file"));
}

#[test]
fn test_config_unknown_key_fails() {
    let home = TempDir::new().unwrap();
    rca(&home)
        .args(["config", "show", "editor"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();
    rca(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rca"));
}
