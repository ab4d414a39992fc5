// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::*;
use crate::db::is_unique_violation;
use crate::diff::issue_diff;
use crate::issue::{FieldValue, SourceMetadata, TrackedField};
use crate::test_fixtures::{add_issue, add_team, state_id, test_db};

#[test]
fn create_and_get_issue_round_trips_json_columns() {
    let db = test_db();
    let team = add_team(&db, "ENG");

    let mut issue = Issue::new(
        "iss-1".to_string(),
        team.id.clone(),
        state_id(&team.id, "Todo"),
        "Fix login".to_string(),
        Utc::now(),
    );
    issue.number = 1;
    issue.label_ids = vec!["l-2".to_string(), "l-1".to_string()];
    issue.subscriber_ids = vec!["alice".to_string()];
    let mut metadata = SourceMetadata::new();
    metadata.insert("type".to_string(), "slack".to_string());
    issue.source_metadata = Some(metadata.clone());
    db.create_issue(&issue).unwrap();

    let got = db.get_issue("iss-1").unwrap();
    assert_eq!(got.label_ids, vec!["l-2", "l-1"]);
    assert_eq!(got.subscriber_ids, vec!["alice"]);
    assert_eq!(got.source_metadata, Some(metadata));
    assert_eq!(got.state_id, state_id(&team.id, "Todo"));
}

#[test]
fn missing_issue_is_not_found() {
    let db = test_db();
    let err = db.get_issue("nope").unwrap_err();
    assert_eq!(err.to_string(), "Issue not found: nope");
}

#[test]
fn issue_exists_reflects_inserts() {
    let db = test_db();
    let team = add_team(&db, "ENG");

    assert!(!db.issue_exists("iss-1").unwrap());
    add_issue(&db, &team, "iss-1", 1);
    assert!(db.issue_exists("iss-1").unwrap());
}

#[test]
fn numbers_are_unique_per_team() {
    let db = test_db();
    let eng = add_team(&db, "ENG");
    let ops = add_team(&db, "OPS");
    add_issue(&db, &eng, "iss-1", 1);
    add_issue(&db, &ops, "iss-2", 1);

    let mut dup = Issue::new(
        "iss-3".to_string(),
        eng.id.clone(),
        state_id(&eng.id, "Backlog"),
        "dup".to_string(),
        Utc::now(),
    );
    dup.number = 1;
    match db.create_issue(&dup).unwrap_err() {
        Error::Database(e) => assert!(is_unique_violation(&e)),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn max_issue_number_per_team() {
    let db = test_db();
    let eng = add_team(&db, "ENG");
    let ops = add_team(&db, "OPS");

    assert_eq!(db.max_issue_number(&eng.id).unwrap(), None);
    add_issue(&db, &eng, "iss-1", 1);
    add_issue(&db, &eng, "iss-2", 7);
    add_issue(&db, &ops, "iss-3", 40);

    assert_eq!(db.max_issue_number(&eng.id).unwrap(), Some(7));
}

#[test]
fn get_issue_by_number_scoped_to_team() {
    let db = test_db();
    let eng = add_team(&db, "ENG");
    let ops = add_team(&db, "OPS");
    add_issue(&db, &eng, "iss-1", 3);

    assert_eq!(db.get_issue_by_number(&eng.id, 3).unwrap().id, "iss-1");
    assert!(db.get_issue_by_number(&ops.id, 3).is_err());
}

#[test]
fn list_issues_newest_number_first() {
    let db = test_db();
    let team = add_team(&db, "ENG");
    add_issue(&db, &team, "iss-1", 1);
    add_issue(&db, &team, "iss-2", 2);

    let ids: Vec<_> = db
        .list_issues(&team.id)
        .unwrap()
        .into_iter()
        .map(|i| i.id)
        .collect();
    assert_eq!(ids, vec!["iss-2", "iss-1"]);
}

#[test]
fn update_issue_writes_fields() {
    let db = test_db();
    let team = add_team(&db, "ENG");
    let mut issue = add_issue(&db, &team, "iss-1", 1);

    issue.title = "Renamed".to_string();
    issue.priority = Some(2);
    issue.assignee_id = Some("bob".to_string());
    issue.state_id = state_id(&team.id, "Done");
    db.update_issue(&issue).unwrap();

    let got = db.get_issue("iss-1").unwrap();
    assert_eq!(got.title, "Renamed");
    assert_eq!(got.priority, Some(2));
    assert_eq!(got.assignee_id.as_deref(), Some("bob"));
    assert_eq!(got.state_id, state_id(&team.id, "Done"));
    assert!(got.updated_at >= issue.created_at);
}

#[test]
fn update_missing_issue_is_not_found() {
    let db = test_db();
    let team = add_team(&db, "ENG");
    let issue = Issue::new(
        "ghost".to_string(),
        team.id.clone(),
        state_id(&team.id, "Backlog"),
        "Ghost".to_string(),
        Utc::now(),
    );
    assert!(matches!(
        db.update_issue(&issue).unwrap_err(),
        Error::NotFound { .. }
    ));
}

#[test]
fn update_subscriber_ids_replaces_set() {
    let db = test_db();
    let team = add_team(&db, "ENG");
    add_issue(&db, &team, "iss-1", 1);

    db.update_subscriber_ids("iss-1", &["a".to_string(), "b".to_string()])
        .unwrap();
    assert_eq!(db.get_issue("iss-1").unwrap().subscriber_ids, vec!["a", "b"]);
}

#[test]
fn history_round_trips_diff() {
    let db = test_db();
    let team = add_team(&db, "ENG");
    let old = add_issue(&db, &team, "iss-1", 1);
    let mut new = old.clone();
    new.priority = Some(3);

    let data = issue_diff(&new, Some(&old));
    let id = db.add_history("iss-1", Some("alice"), &data).unwrap();
    assert!(id > 0);

    let history = db.get_history("iss-1").unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].user_id.as_deref(), Some("alice"));
    assert_eq!(history[0].data, data);
    assert_eq!(
        history[0]
            .data
            .change(TrackedField::Priority)
            .and_then(|c| c.to()),
        Some(&FieldValue::Number(3))
    );
}

#[test]
fn comments_listed_oldest_first() {
    let db = test_db();
    let team = add_team(&db, "ENG");
    add_issue(&db, &team, "iss-1", 1);

    let first = db.add_comment("iss-1", "alice", "first").unwrap();
    db.add_comment("iss-1", "bob", "second").unwrap();

    let comments = db.get_comments("iss-1").unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].id, first.id);
    assert_eq!(comments[1].body, "second");
}

#[test]
fn comment_on_missing_issue_fails() {
    let db = test_db();
    assert!(db.add_comment("nope", "alice", "hi").is_err());
}
