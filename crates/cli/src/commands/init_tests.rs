// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use tempfile::TempDir;

#[test]
fn init_creates_config_database_and_workspace() {
    let temp = TempDir::new().unwrap();
    let work_dir = run_impl(temp.path(), Some("Acme Corp"), Some("alice"), None).unwrap();

    let config = Config::load(&work_dir).unwrap();
    assert!(config.workspace.starts_with("ws_"));
    assert_eq!(config.user.as_deref(), Some("alice"));

    let db = Database::open(&get_db_path(&work_dir, &config)).unwrap();
    let workspace = db.get_workspace(&config.workspace).unwrap();
    assert_eq!(workspace.name, "Acme Corp");
    assert_eq!(workspace.slug, "acme-corp");
    assert!(db.list_teams(&config.workspace).unwrap().is_empty());
}

#[test]
fn init_with_team() {
    let temp = TempDir::new().unwrap();
    let work_dir = run_impl(temp.path(), None, None, Some("eng")).unwrap();

    let config = Config::load(&work_dir).unwrap();
    let db = Database::open(&get_db_path(&work_dir, &config)).unwrap();
    let teams = db.list_teams(&config.workspace).unwrap();
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0].identifier, "ENG");
}

#[test]
fn init_twice_fails() {
    let temp = TempDir::new().unwrap();
    run_impl(temp.path(), None, None, None).unwrap();
    let err = run_impl(temp.path(), None, None, None).unwrap_err();
    assert!(matches!(err, Error::AlreadyInitialized(_)));
}

#[test]
fn init_rejects_bad_team_identifier() {
    let temp = TempDir::new().unwrap();
    let err = run_impl(temp.path(), None, None, Some("x")).unwrap_err();
    assert!(matches!(err, Error::InvalidTeamIdentifier(_)));
    assert!(!temp.path().join(".tally").exists());
}
