//! # KTM CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//! Author: KTM Team
//!
//! Top-level behavior of the `ktm` binary: `--help`, `--version` and the
//! `help` subcommand.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_main_help_flag() {
    ktm_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: ktm"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("llm"))
        .stdout(predicate::str::contains("ask"));
}

#[test]
fn test_main_version_flag() {
    ktm_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_subcommand() {
    ktm_cmd()
        .args(["help", "serve"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--static-dir"));
}

#[test]
fn test_missing_subcommand_fails() {
    ktm_cmd().assert().failure();
}
