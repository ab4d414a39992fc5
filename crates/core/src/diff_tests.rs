// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use chrono::Utc;
use serde_json::json;

fn issue(state: &str, priority: Option<i64>, labels: &[&str]) -> Issue {
    let mut issue = Issue::new(
        "iss-1".to_string(),
        "team-1".to_string(),
        state.to_string(),
        "Title".to_string(),
        Utc::now(),
    );
    issue.priority = priority;
    issue.label_ids = labels.iter().map(|s| s.to_string()).collect();
    issue
}

fn id(s: &str) -> Option<FieldValue> {
    Some(FieldValue::Id(s.to_string()))
}

#[test]
fn creation_reports_every_tracked_field() {
    let mut new = issue("s1", Some(3), &["L1", "L2"]);
    new.assignee_id = Some("alice".into());

    let data = issue_diff(&new, None);

    assert_eq!(data.changes.len(), TrackedField::ALL.len());
    for field in TrackedField::ALL {
        let change = data.change(field).unwrap();
        assert!(matches!(change, FieldChange::Initial { .. }));
        assert_eq!(change.to().cloned(), new.tracked_value(field));
        assert_eq!(change.from(), None);
    }
    assert_eq!(data.added_label_ids, vec!["L1", "L2"]);
    assert!(data.removed_label_ids.is_empty());
}

#[test]
fn creation_with_no_labels_adds_nothing() {
    let data = issue_diff(&issue("s1", None, &[]), None);
    assert!(data.added_label_ids.is_empty());
    assert!(data.removed_label_ids.is_empty());
    assert_eq!(
        data.change(TrackedField::Priority),
        Some(&FieldChange::Initial { to: None })
    );
}

#[test]
fn identical_snapshots_produce_empty_diff() {
    let old = issue("s1", Some(1), &["L1", "L2"]);
    let new = old.clone();

    let data = issue_diff(&new, Some(&old));

    assert!(data.changes.is_empty());
    assert!(data.added_label_ids.is_empty());
    assert!(data.removed_label_ids.is_empty());
    assert!(data.is_empty());
}

#[test]
fn label_reordering_is_not_a_change() {
    let old = issue("s1", None, &["L1", "L2"]);
    let new = issue("s1", None, &["L2", "L1"]);
    assert!(issue_diff(&new, Some(&old)).is_empty());
}

#[test]
fn state_priority_and_labels_change() {
    let old = issue("s1", Some(1), &["L1", "L3"]);
    let new = issue("s2", Some(2), &["L1", "L2"]);

    let data = issue_diff(&new, Some(&old));

    assert_eq!(data.changes.len(), 2);
    assert_eq!(
        data.change(TrackedField::StateId),
        Some(&FieldChange::Changed {
            from: id("s1"),
            to: id("s2"),
        })
    );
    assert_eq!(
        data.change(TrackedField::Priority),
        Some(&FieldChange::Changed {
            from: Some(FieldValue::Number(1)),
            to: Some(FieldValue::Number(2)),
        })
    );
    assert_eq!(data.added_label_ids, vec!["L2"]);
    assert_eq!(data.removed_label_ids, vec!["L3"]);

    assert_eq!(
        serde_json::to_value(&data).unwrap(),
        json!({
            "fromPriority": 1,
            "toPriority": 2,
            "fromStateId": "s1",
            "toStateId": "s2",
            "addedLabelIds": ["L2"],
            "removedLabelIds": ["L3"],
        })
    );
}

#[test]
fn clearing_a_value_records_null_target() {
    let mut old = issue("s1", None, &[]);
    old.assignee_id = Some("alice".into());
    let new = issue("s1", None, &[]);

    let data = issue_diff(&new, Some(&old));

    assert_eq!(
        data.change(TrackedField::AssigneeId),
        Some(&FieldChange::Changed {
            from: id("alice"),
            to: None,
        })
    );
    let value = serde_json::to_value(&data).unwrap();
    assert_eq!(value["fromAssigneeId"], json!("alice"));
    assert_eq!(value["toAssigneeId"], json!(null));
}

#[test]
fn duplicate_labels_are_reported_once() {
    let old = issue("s1", None, &[]);
    let new = issue("s1", None, &["L1", "L1"]);
    assert_eq!(issue_diff(&new, Some(&old)).added_label_ids, vec!["L1"]);
}

#[test]
fn serialized_creation_has_no_from_keys() {
    let data = issue_diff(&issue("s1", None, &["L1"]), None);
    let value = serde_json::to_value(&data).unwrap();
    let obj = value.as_object().unwrap();

    assert!(obj.keys().all(|k| !k.starts_with("from")));
    assert_eq!(obj["toStateId"], json!("s1"));
    assert_eq!(obj["toTeamId"], json!("team-1"));
    assert_eq!(obj["toPriority"], json!(null));
}

#[test]
fn deserializes_stored_rows() {
    let changed = issue_diff(
        &issue("s2", Some(2), &["L2"]),
        Some(&issue("s1", None, &["L1"])),
    );
    let json = serde_json::to_string(&changed).unwrap();
    assert_eq!(serde_json::from_str::<IssueHistoryData>(&json).unwrap(), changed);

    let created = issue_diff(&issue("s1", Some(4), &[]), None);
    let json = serde_json::to_string(&created).unwrap();
    assert_eq!(serde_json::from_str::<IssueHistoryData>(&json).unwrap(), created);
}

#[test]
fn deserialize_ignores_unknown_keys_and_missing_labels() {
    let data: IssueHistoryData =
        serde_json::from_value(json!({ "toStateId": "s9", "fromTitle": "x" })).unwrap();
    assert_eq!(
        data.change(TrackedField::StateId),
        Some(&FieldChange::Initial { to: id("s9") })
    );
    assert!(data.added_label_ids.is_empty());
}
