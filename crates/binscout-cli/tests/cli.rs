//! End-to-end checks for the binscout binary.
//!
//! These avoid invoking real package managers: they exercise argument
//! handling, the unknown-backend path, and the doctor probe (which only
//! inspects PATH).

use assert_cmd::Command;
use predicates::prelude::*;

fn binscout() -> Command {
    Command::cargo_bin("binscout").expect("binary builds")
}

#[test]
fn test_help_lists_subcommands() {
    binscout()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("doctor"));
}

#[test]
fn test_unknown_manager_is_fatal() {
    binscout()
        .args(["scan", "--manager", "doesnotexist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'doesnotexist' not found"));
}

#[test]
fn test_doctor_reports_backends() {
    binscout()
        .args(["doctor", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("homebrew"))
        .stdout(predicate::str::contains("npm"))
        .stdout(predicate::str::contains("pip"))
        .stdout(predicate::str::contains("manual"));
}
