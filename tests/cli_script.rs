mod common;

use std::fs;

use assert_cmd::Command;
use common::{ledger_file, store_in, temp_base};
use predicates::str::contains;

fn cli(home: &std::path::Path, today: &str) -> Command {
    let mut cmd = Command::cargo_bin("budget_tracker_cli").unwrap();
    cmd.env("BUDGET_TRACKER_CLI_SCRIPT", "1")
        .env("BUDGET_TRACKER_HOME", home)
        .env("BUDGET_TRACKER_TODAY", today)
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn script_mode_runs_basic_flow() {
    let home = temp_base();
    let input = "budget 1000\nfixed add Rent 600\nfixed use 1\nexpense add Coffee 4.5 2024-05-02\nsummary\nexit\n";

    cli(&home, "2024-05-10")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Budget set to 1000."))
        .stdout(contains("Remaining"))
        .stdout(contains("395.5"));

    let raw = fs::read_to_string(ledger_file(&home)).unwrap();
    assert!(raw.contains("\"currentMonth\":\"2024-5\""));
    assert!(raw.contains("\"Coffee\""));
}

#[test]
fn new_month_rolls_over_on_start() {
    let home = temp_base();
    cli(&home, "2024-01-20")
        .write_stdin("budget 1000\nexpense add Food 300\nexpense add Fuel 200\n")
        .assert()
        .success();

    cli(&home, "2024-02-01")
        .write_stdin("summary\n")
        .assert()
        .success()
        .stdout(contains("New month 2024-2 started"))
        .stdout(contains("500"));

    let ledger = store_in(&home, 2024, 2).load();
    assert_eq!(ledger.budget, Some(500.0));
    assert!(ledger.expenses.is_empty());
}

#[test]
fn bad_import_reports_parse_error() {
    let home = temp_base();
    let bad = home.join("bad.json");
    fs::write(&bad, "not json").unwrap();

    cli(&home, "2024-05-10")
        .write_stdin(format!("budget 50\nimport \"{}\"\n", bad.display()))
        .assert()
        .success()
        .stdout(contains("Could not parse JSON file."));

    assert_eq!(store_in(&home, 2024, 5).load().budget, Some(50.0));
}

#[test]
fn unknown_commands_get_suggestions() {
    let home = temp_base();
    cli(&home, "2024-05-10")
        .write_stdin("sumary\nexpense edit 9 price 3\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `sumary`."))
        .stdout(contains("Suggestion: `summary`?"))
        .stdout(contains("No expense #9"));
}

#[test]
fn export_and_clear_all() {
    let home = temp_base();
    let out = home.join("exports");
    fs::create_dir_all(&out).unwrap();

    cli(&home, "2024-05-10")
        .write_stdin(format!(
            "fixed add Rent 600\nexport backup \"{dir}\"\nexport month \"{dir}\"\nclear all\n",
            dir = out.display()
        ))
        .assert()
        .success()
        .stdout(contains("All saved data cleared."));

    assert!(out.join("backup_2024-05-10.json").exists());
    assert!(out.join("month_2024-5.json").exists());
    assert!(store_in(&home, 2024, 5).load().fixed_items.is_empty());
}
