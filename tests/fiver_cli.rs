//! End-to-end tests driving the `fiver` binary as a subprocess.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fiver() -> Command {
    Command::cargo_bin("fiver").unwrap()
}

#[test]
fn track_and_restore_round_trip() {
    let dir = tempdir().unwrap();
    let storage = dir.path().join("store");
    let file = dir.path().join("notes.txt");
    fs::write(&file, b"hello world").unwrap();

    fiver()
        .args(["--storage", storage.to_str().unwrap(), "track"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("version 1"));

    fs::write(&file, b"hello there world").unwrap();
    fiver()
        .args(["--storage", storage.to_str().unwrap(), "track"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("version 2"));

    let restored = dir.path().join("restored.txt");
    fiver()
        .args(["--storage", storage.to_str().unwrap(), "restore"])
        .arg(&file)
        .args(["--version", "1", "--output"])
        .arg(&restored)
        .assert()
        .success();
    assert_eq!(fs::read(&restored).unwrap(), b"hello world");
}

#[test]
fn restore_of_unknown_version_exits_with_not_found_code() {
    let dir = tempdir().unwrap();
    let storage = dir.path().join("store");
    let file = dir.path().join("notes.txt");
    fs::write(&file, b"hello").unwrap();
    fiver()
        .args(["--storage", storage.to_str().unwrap(), "track"])
        .arg(&file)
        .assert()
        .success();

    fiver()
        .args(["--storage", storage.to_str().unwrap(), "restore"])
        .arg(&file)
        .args(["--version", "9"])
        .assert()
        .code(2);
}

#[test]
fn history_reports_every_tracked_version() {
    let dir = tempdir().unwrap();
    let storage = dir.path().join("store");
    let file = dir.path().join("notes.txt");
    fs::write(&file, b"v1").unwrap();
    fiver()
        .args(["--storage", storage.to_str().unwrap(), "track"])
        .arg(&file)
        .assert()
        .success();
    fs::write(&file, b"v1 and more").unwrap();
    fiver()
        .args(["--storage", storage.to_str().unwrap(), "track"])
        .arg(&file)
        .assert()
        .success();

    fiver()
        .args(["--storage", storage.to_str().unwrap(), "history"])
        .arg(&file)
        .args(["--format", "brief"])
        .assert()
        .success()
        .stdout(predicate::str::contains("v1").and(predicate::str::contains("v2")));
}

#[test]
fn list_shows_tracked_names() {
    let dir = tempdir().unwrap();
    let storage = dir.path().join("store");
    let file = dir.path().join("tracked.txt");
    fs::write(&file, b"data").unwrap();
    fiver()
        .args(["--storage", storage.to_str().unwrap(), "track"])
        .arg(&file)
        .assert()
        .success();

    fiver()
        .args(["--storage", storage.to_str().unwrap(), "list"])
        .args(["--format", "brief"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tracked.txt"));
}

#[test]
fn delete_non_tail_version_fails() {
    let dir = tempdir().unwrap();
    let storage = dir.path().join("store");
    let file = dir.path().join("notes.txt");
    fs::write(&file, b"v1").unwrap();
    fiver()
        .args(["--storage", storage.to_str().unwrap(), "track"])
        .arg(&file)
        .assert()
        .success();
    fs::write(&file, b"v2").unwrap();
    fiver()
        .args(["--storage", storage.to_str().unwrap(), "track"])
        .arg(&file)
        .assert()
        .success();

    fiver()
        .args(["--storage", storage.to_str().unwrap(), "delete"])
        .arg(&file)
        .args(["--version", "1"])
        .assert()
        .failure();
}

#[test]
fn help_lists_every_command() {
    fiver()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("track")
                .and(predicate::str::contains("restore"))
                .and(predicate::str::contains("history")),
        );
}
