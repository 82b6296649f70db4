use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn deckhand() -> Command {
    Command::new(env!("CARGO_BIN_EXE_deckhand"))
}

#[test]
fn shows_help() {
    deckhand()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deckhand"))
        .stdout(predicate::str::contains("presets"));
}

#[test]
fn query_prints_search_variables_offline() {
    let dir = tempfile::tempdir().unwrap();
    let filter = dir.path().join("filter.json");
    fs::write(&filter, r#"{"searchString": "elf", "page": 2, "rarity": {"MYTHIC": "TRUE"}}"#).unwrap();

    deckhand()
        .args(["query", "--sort", "name:desc", "--filter"])
        .arg(&filter)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pagination\""))
        .stdout(predicate::str::contains("\"searchString\": \"elf\""))
        .stdout(predicate::str::contains("\"MYTHIC\""))
        .stdout(predicate::str::contains("\"DESC\""));
}

#[test]
fn mobile_query_uses_small_pages() {
    deckhand()
        .args(["query", "--mobile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pageSize\": 10"));
}

#[test]
fn invalid_sort_key_is_rejected() {
    deckhand().args(["query", "--sort", "colour"]).assert().failure();
}

#[test]
fn port_zero_is_a_configuration_error() {
    deckhand()
        .args(["--port", "0", "query"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--port"));
}

#[test]
fn offline_snapshot_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let filter = dir.path().join("filter.json");
    let snapshot = dir.path().join("state").join("snapshot.json");
    fs::write(&filter, r#"{"searchString": "goblin", "page": 3}"#).unwrap();

    deckhand()
        .args(["snapshot", "save", "--offline", "--sort", "cmc", "--filter"])
        .arg(&filter)
        .arg("--file")
        .arg(&snapshot)
        .assert()
        .success();

    deckhand()
        .args(["--format", "json", "snapshot", "load", "--offline", "--file"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"outdated\": false"))
        .stdout(predicate::str::contains("\"page\": 3"))
        .stdout(predicate::str::contains("goblin"));
}

#[test]
fn loading_a_missing_snapshot_fails() {
    let dir = tempfile::tempdir().unwrap();
    deckhand()
        .args(["snapshot", "load", "--offline", "--file"])
        .arg(dir.path().join("absent.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no snapshot"));
}
