use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_includes_required_options() {
    let mut cmd = Command::cargo_bin("listmit").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--type"))
        .stdout(predicate::str::contains("--filter"))
        .stdout(predicate::str::contains("--pid"))
        .stdout(predicate::str::contains("--cmd"))
        .stdout(predicate::str::contains("--all"))
        .stdout(predicate::str::contains("--json"))
        .stdout(predicate::str::contains("--help"));
}

#[test]
fn test_help_describes_mitigation_filter() {
    let mut cmd = Command::cargo_bin("listmit").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("mitigation"))
        .stdout(predicate::str::contains("Filter"));
}

#[test]
fn test_short_help_flag_works() {
    let mut cmd = Command::cargo_bin("listmit").unwrap();
    cmd.arg("-h");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_version_flag() {
    let mut cmd = Command::cargo_bin("listmit").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("listmit"));
}
