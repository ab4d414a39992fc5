// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

pub const USER: &str = "alice";

/// `tally` acting as [`USER`], with logging quiet.
pub fn tally() -> Command {
    let mut cmd = cargo_bin_cmd!("tally");
    cmd.env("TALLY_USER", USER).env_remove("TALLY_LOG");
    cmd
}

/// Helper to create an initialized temp directory with team `ENG`
pub fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    tally()
        .args(["init", "--name", "Acme", "--team", "ENG"])
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

/// Runs `tally` in `temp` with `args` and expects success.
pub fn run_ok(temp: &TempDir, args: &[&str]) -> String {
    let output = tally()
        .args(args)
        .current_dir(temp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8_lossy(&output).into_owned()
}

/// Helper to create an issue and return its key (e.g. `ENG-1`)
pub fn create_issue(temp: &TempDir, title: &str) -> String {
    run_ok(temp, &["new", title])
        .split_whitespace()
        .find(|s| s.starts_with("ENG-"))
        .unwrap()
        .trim_end_matches(':')
        .to_string()
}

/// Parses `tally show <key> -o json`.
pub fn show_json(temp: &TempDir, key: &str) -> serde_json::Value {
    serde_json::from_str(&run_ok(temp, &["show", key, "-o", "json"])).unwrap()
}
