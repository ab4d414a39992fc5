// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use chrono::Utc;
use tempfile::tempdir;
use yare::parameterized;

fn issue(id: &str) -> Issue {
    Issue::new(
        id.to_string(),
        "team-eng".to_string(),
        "state-1".to_string(),
        "Title".to_string(),
        Utc::now(),
    )
}

fn payload(issue_id: &str) -> NotificationPayload {
    NotificationPayload {
        issue_id: issue_id.to_string(),
        subscriber_ids: vec!["alice".to_string()],
        to_state_id: Some("state-1".to_string()),
        to_priority: Some(2),
        to_assignee_id: None,
        source_metadata: None,
        workspace_id: "ws-1".to_string(),
        issue_comment_id: None,
    }
}

#[parameterized(
    created = { NotificationEventFrom::IssueCreated, "IssueCreated" },
    updated = { NotificationEventFrom::IssueUpdated, "IssueUpdated" },
    commented = { NotificationEventFrom::IssueCommentCreated, "IssueCommentCreated" },
)]
fn event_names_round_trip(event: NotificationEventFrom, name: &str) {
    assert_eq!(event.to_string(), name);
    assert_eq!(name.parse::<NotificationEventFrom>().unwrap(), event);
}

#[test]
fn unknown_event_is_rejected() {
    let err = "IssueDeleted".parse::<NotificationEventFrom>().unwrap_err();
    assert!(matches!(err, Error::InvalidNotificationEvent(_)));
}

#[test]
fn payload_uses_camel_case_keys() {
    let json = serde_json::to_value(payload("iss-1")).unwrap();
    assert_eq!(json["issueId"], "iss-1");
    assert_eq!(json["subscriberIds"][0], "alice");
    assert_eq!(json["toStateId"], "state-1");
    assert_eq!(json["toPriority"], 2);
    assert!(json["toAssigneeId"].is_null());
    assert_eq!(json["workspaceId"], "ws-1");
    assert!(json.get("issueCommentId").is_none());
}

#[test]
fn jobs_are_tagged_by_kind() {
    let job = Job::Triage {
        issue_id: "iss-1".to_string(),
        resend: false,
    };
    let json = serde_json::to_string(&job).unwrap();
    assert_eq!(json, r#"{"type":"triage","issue_id":"iss-1","resend":false}"#);
    assert_eq!(job.kind(), "triage");
    assert_eq!(job.issue_id(), "iss-1");
}

#[test]
fn open_creates_empty_queue() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sub").join("jobs.jsonl");
    let queue = JobQueue::open(&path).unwrap();
    assert!(path.exists());
    assert!(queue.is_empty().unwrap());
}

#[test]
fn trait_methods_append_in_order() {
    let dir = tempdir().unwrap();
    let queue = JobQueue::open(&dir.path().join("jobs.jsonl")).unwrap();
    let issue = issue("iss-1");

    queue
        .add_to_notification(
            NotificationEventFrom::IssueCreated,
            Some("alice"),
            payload("iss-1"),
        )
        .unwrap();
    queue.add_issue_to_vector(&issue).unwrap();
    queue.handle_triage_issue(&issue, true).unwrap();

    let jobs = queue.peek_all().unwrap();
    let kinds: Vec<_> = jobs.iter().map(Job::kind).collect();
    assert_eq!(kinds, vec!["notification", "vector_index", "triage"]);
    assert_eq!(
        jobs[2],
        Job::Triage {
            issue_id: "iss-1".to_string(),
            resend: true
        }
    );
}

#[test]
fn blank_lines_are_skipped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("jobs.jsonl");
    let queue = JobQueue::open(&path).unwrap();
    queue.add_issue_to_vector(&issue("iss-1")).unwrap();

    let mut file = OpenOptions::new().append(true).open(&path).unwrap();
    writeln!(file).unwrap();
    writeln!(file, "   ").unwrap();

    queue.add_issue_to_vector(&issue("iss-2")).unwrap();
    assert_eq!(queue.len().unwrap(), 2);
}

#[test]
fn corrupt_line_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("jobs.jsonl");
    std::fs::write(&path, "not json\n").unwrap();

    let queue = JobQueue::open(&path).unwrap();
    assert!(matches!(queue.peek_all().unwrap_err(), Error::Json(_)));
}

#[test]
fn remove_first_keeps_the_rest() {
    let dir = tempdir().unwrap();
    let queue = JobQueue::open(&dir.path().join("jobs.jsonl")).unwrap();
    for id in ["iss-1", "iss-2", "iss-3"] {
        queue.add_issue_to_vector(&issue(id)).unwrap();
    }

    queue.remove_first(2).unwrap();
    let remaining: Vec<_> = queue
        .peek_all()
        .unwrap()
        .iter()
        .map(|j| j.issue_id().to_string())
        .collect();
    assert_eq!(remaining, vec!["iss-3"]);

    queue.remove_first(5).unwrap();
    assert!(queue.is_empty().unwrap());
}

#[test]
fn clear_empties_queue() {
    let dir = tempdir().unwrap();
    let queue = JobQueue::open(&dir.path().join("jobs.jsonl")).unwrap();
    queue.add_issue_to_vector(&issue("iss-1")).unwrap();

    queue.clear().unwrap();
    assert_eq!(queue.len().unwrap(), 0);
}
