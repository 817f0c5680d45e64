use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use rusqlite::Connection;
use tempfile::{tempdir, TempDir};

/// Write the corridor fixture network and return its path.
fn fixture_db(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("road_network.db");
    let connection = Connection::open(&path).expect("open fixture db");
    connection
        .execute_batch(
            r#"
            CREATE TABLE Nodes (id TEXT PRIMARY KEY, chargingPower REAL);
            CREATE TABLE Edges (sourceId TEXT, destinationId TEXT, duration REAL, consumption REAL);
            INSERT INTO Nodes VALUES ('Aachen', 0), ('Bonn', 60), ('Cologne', 0), ('Dortmund', 120);
            INSERT INTO Edges VALUES
                ('Aachen', 'Bonn', 10, 5),
                ('Bonn', 'Cologne', 10, 5),
                ('Cologne', 'Dortmund', 20, 8);
            "#,
        )
        .expect("seed fixture db");
    path
}

fn cli() -> Command {
    cargo_bin_cmd!("evpathfinder-cli")
}

fn prepare_command() -> (Command, TempDir) {
    let temp_dir = tempdir().expect("create temp dir");
    let db = fixture_db(&temp_dir);
    let mut cmd = cli();
    cmd.env("RUST_LOG", "error").arg("--db").arg(db);
    (cmd, temp_dir)
}

#[test]
fn route_prints_charging_stop() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args([
        "route",
        "--from",
        "Aachen",
        "--to",
        "Cologne",
        "--max-soc",
        "10",
        "--initial-charge",
        "5",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Route: Aachen -> Cologne (2 hops, 25.00 min, 1 charging stop)",
        ))
        .stdout(predicate::str::contains("Bonn (t=15.00 min, soc=5.00) charge 5.00 min"));
}

#[test]
fn database_path_can_come_from_environment() {
    let temp_dir = tempdir().expect("create temp dir");
    let db = fixture_db(&temp_dir);

    let mut cmd = cli();
    cmd.env("RUST_LOG", "error")
        .env("EVPATHFINDER_DB", &db)
        .args(["route", "--from", "Aachen", "--to", "Bonn"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1: Bonn (t=10.00 min, soc=95.00)"));
}

#[test]
fn json_format_is_machine_readable() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["--format", "json"]).args([
        "route",
        "--from",
        "Aachen",
        "--to",
        "Cologne",
        "--max-soc",
        "10",
        "--initial-charge",
        "5",
        "--min-charging-time",
        "15",
    ]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid json");
    assert_eq!(value["total_travel_time"], 35.0);
    assert_eq!(value["steps"][1]["charging_time"], 15.0);
    assert_eq!(value["vehicle"]["min_charging_time"], 15.0);
}

#[test]
fn unknown_node_error_is_friendly() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["route", "--from", "Aachen", "--to", "Colgne"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown node: Colgne"))
        .stderr(predicate::str::contains("Did you mean 'Cologne'?"));
}

#[test]
fn infeasible_route_fails() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args([
        "route", "--from", "Aachen", "--to", "Dortmund", "--max-soc", "10",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no route found between Aachen and Dortmund"));
}

#[test]
fn invalid_vehicle_is_rejected() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args([
        "route",
        "--from",
        "Aachen",
        "--to",
        "Bonn",
        "--max-soc",
        "10",
        "--initial-charge",
        "20",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("initial_charge 20 exceeds max_soc 10"));
}

#[test]
fn expansion_limit_reports_no_route() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args([
        "route",
        "--from",
        "Aachen",
        "--to",
        "Cologne",
        "--max-expansions",
        "1",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no route found"));
}

#[test]
fn stations_lists_chargers() {
    let (mut cmd, _temp) = prepare_command();
    cmd.arg("stations");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Charging stations (2):"))
        .stdout(predicate::str::contains("Bonn"))
        .stdout(predicate::str::contains("Dortmund"))
        .stdout(predicate::str::contains("Aachen").not());
}

#[test]
fn missing_database_is_reported() {
    let temp_dir = tempdir().expect("create temp dir");
    let mut cmd = cli();
    cmd.env("RUST_LOG", "error")
        .arg("--db")
        .arg(temp_dir.path().join("absent").join("missing.db"))
        .arg("stations");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to load road network"));
}
