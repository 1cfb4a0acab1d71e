//! Failures of any kind print a plain message to stdout and keep the exit
//! status uniform; nothing goes to stderr and no distinguishing codes exist.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_invalid_pid_reports_parse_error_on_stdout() {
    let mut cmd = Command::cargo_bin("listmit").unwrap();
    cmd.args(["-p", "abc"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("invalid PID 'abc'"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_unknown_option_reports_error_on_stdout() {
    let mut cmd = Command::cargo_bin("listmit").unwrap();
    cmd.arg("--bogus");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("unexpected argument"))
        .stderr(predicate::str::is_empty());
}

#[cfg(not(windows))]
#[test]
fn test_unsupported_platform_reports_provider_error() {
    let mut cmd = Command::cargo_bin("listmit").unwrap();

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Windows is required"))
        .stderr(predicate::str::is_empty());
}

#[cfg(not(windows))]
#[test]
fn test_unknown_mitigation_name_is_not_an_option_error() {
    // An unknown -t name is never rejected by parsing; the run proceeds to
    // enumeration (which fails off Windows for a different reason).
    let mut cmd = Command::cargo_bin("listmit").unwrap();
    cmd.args(["-t", "NotARealMitigation"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Windows is required"));
}
