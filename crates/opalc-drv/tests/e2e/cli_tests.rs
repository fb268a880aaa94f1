//! CLI surface: help, version, argument validation.

use assert_cmd::Command;
use predicates::prelude::*;

use crate::{opalc_bin, write_source};

#[test]
fn help_prints_usage() {
    let mut cmd = Command::new(opalc_bin());
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage").and(predicate::str::contains("opalc")));
}

#[test]
fn version_prints_the_package_version() {
    let mut cmd = Command::new(opalc_bin());
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("opalc"));
}

#[test]
fn missing_source_argument_fails() {
    let mut cmd = Command::new(opalc_bin());
    cmd.assert().failure();
}

#[test]
fn nonexistent_source_file_fails() {
    let mut cmd = Command::new(opalc_bin());
    cmd.arg("definitely/not/here.opal");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn verbose_flag_is_accepted() {
    let (dir, path) = write_source("fn start() i32 { return 0; }");
    let base = dir.path().join("v");

    let mut cmd = Command::new(opalc_bin());
    cmd.arg(&path).arg("-o").arg(&base).arg("--verbose");
    cmd.assert().success();
}
