//! # KTM CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: KTM Team
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` and runs the compiled `ktm` binary through
//! `assert_cmd`.
//!

// Not every test file uses every helper.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;

/// # Get KTM Command (`ktm_cmd`)
///
/// ## Panics
/// Panics if the `ktm` binary cannot be found via `Command::cargo_bin`.
pub fn ktm_cmd() -> Command {
    Command::cargo_bin("ktm").expect("Failed to find ktm binary for testing")
}

/// A `ktm` command isolated from the caller's environment: runs in `dir`,
/// uses `dir` as its home, and ignores `PORT`, `KTM_MODEL_PATH` and `RUST_LOG`.
pub fn isolated_ktm_cmd(dir: &Path) -> Command {
    let mut cmd = ktm_cmd();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("PORT")
        .env_remove("KTM_MODEL_PATH")
        .env_remove("RUST_LOG");
    cmd
}
