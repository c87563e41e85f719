//! # next-subnet Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every test
//! runs the compiled `next-subnet` binary in a clean environment: no user
//! config is picked up and, unless a test says otherwise, the gcloud lookup
//! points at an executable that does not exist.
//!

// Allow potentially unused code in this common module, as different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

/// Path that is never an executable, used to make the remote source unavailable.
pub const MISSING_GCLOUD: &str = "/nonexistent/next-subnet-test/gcloud";

/// # Get next-subnet Command (`next_subnet_cmd`)
///
/// An `assert_cmd::Command` for the compiled binary with configuration
/// isolated from the machine running the tests.
///
/// ## Panics
/// Panics if the `next-subnet` binary cannot be found via `Command::cargo_bin`.
pub fn next_subnet_cmd() -> Command {
    let mut cmd = Command::cargo_bin("next-subnet").expect("Failed to find next-subnet binary for testing");
    cmd.env_remove("NEXT_SUBNET_CONFIG")
        .env_remove("NEXT_SUBNET_TIMEOUT_SECS")
        .env_remove("RUST_LOG")
        .env("NEXT_SUBNET_GCLOUD", MISSING_GCLOUD)
        .env("XDG_CONFIG_HOME", "/nonexistent/next-subnet-test/config");
    cmd
}

/// Writes a CSV record file into `dir` and returns its path.
pub fn write_record(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("subnets.csv");
    fs::write(&path, contents).expect("Failed to write record file");
    path
}

/// Writes an executable shell script standing in for `gcloud`.
///
/// The script records its arguments in `<dir>/gcloud-args.txt`, then runs `body`.
#[cfg(unix)]
pub fn write_fake_gcloud(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-gcloud");
    let args_file = dir.join("gcloud-args.txt");
    let script = format!(
        "#!/bin/sh\necho \"$@\" > '{}'\n{}\n",
        args_file.display(),
        body
    );
    fs::write(&path, script).expect("Failed to write fake gcloud");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake gcloud executable");
    path
}
