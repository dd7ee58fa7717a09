mod common;

use assert_cmd::Command;
use finance_core::config::Config;
use predicates::prelude::*;

fn report_cmd() -> (Command, std::path::PathBuf) {
    let dir = common::temp_dir();
    let snapshot = common::write_snapshot(&dir, &common::sample_snapshot());
    let mut cmd = Command::cargo_bin("finance_report").expect("binary built");
    cmd.env("FINANCE_CORE_HOME", &dir)
        .env("RUST_LOG", "off")
        .arg("--plain")
        .arg("--snapshot")
        .arg(&snapshot)
        .arg("--config-dir")
        .arg(&dir);
    (cmd, dir)
}

#[test]
fn monthly_report_prints_totals() {
    let (mut cmd, _) = report_cmd();
    cmd.args(["report", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Monthly report ==="))
        .stdout(predicate::str::contains("Balance: $700.00"))
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("Old bill").not());
}

#[test]
fn budget_json_reports_statuses() {
    let (mut cmd, _) = report_cmd();
    cmd.args(["budget", "--month", "2024-03", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"Warning\""))
        .stdout(predicate::str::contains("\"status\": \"Exceeded\""));
}

#[test]
fn budget_text_warns_about_overruns() {
    let (mut cmd, _) = report_cmd();
    cmd.args(["budget", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNING: Leisure is over budget by 10.00"))
        .stdout(predicate::str::contains("EXCEEDED"));
}

#[test]
fn disabled_notifications_silence_overrun_warnings() {
    let (mut cmd, dir) = report_cmd();
    common::write_config(
        &dir,
        &Config {
            notifications: false,
            ..Config::default()
        },
    );
    cmd.args(["budget", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNING:").not())
        .stdout(predicate::str::contains("EXCEEDED"));
}

#[test]
fn invalid_date_format_is_a_config_error() {
    let (mut cmd, dir) = report_cmd();
    common::write_config(
        &dir,
        &Config {
            date_format: "%Q".into(),
            ..Config::default()
        },
    );
    cmd.arg("dashboard")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn investments_use_configured_currency() {
    let (mut cmd, dir) = report_cmd();
    common::write_config(
        &dir,
        &Config {
            currency_symbol: "€".into(),
            ..Config::default()
        },
    );
    cmd.arg("investments")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total invested: €2500.00"))
        .stdout(predicate::str::contains("Funds"));
}

#[test]
fn missing_snapshot_fails() {
    let dir = common::temp_dir();
    Command::cargo_bin("finance_report")
        .expect("binary built")
        .env("FINANCE_CORE_HOME", &dir)
        .env("RUST_LOG", "off")
        .args(["--plain", "dashboard"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn malformed_month_is_rejected() {
    let (mut cmd, _) = report_cmd();
    cmd.args(["report", "--month", "2024-13"]).assert().failure();
}
