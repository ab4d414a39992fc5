// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

fn state(id: &str, category: WorkflowCategory, position: i64) -> Workflow {
    Workflow {
        id: id.to_string(),
        name: id.to_string(),
        category,
        team_id: "team-1".to_string(),
        position,
        deleted_at: None,
    }
}

#[parameterized(
    triage = { "triage", WorkflowCategory::Triage },
    backlog_upper = { "BACKLOG", WorkflowCategory::Backlog },
    unstarted = { "unstarted", WorkflowCategory::Unstarted },
    started = { "started", WorkflowCategory::Started },
    completed = { "completed", WorkflowCategory::Completed },
    canceled = { "canceled", WorkflowCategory::Canceled },
    cancelled = { "cancelled", WorkflowCategory::Canceled },
)]
fn category_from_str_valid(input: &str, expected: WorkflowCategory) {
    assert_eq!(input.parse::<WorkflowCategory>().unwrap(), expected);
}

#[test]
fn category_from_str_invalid() {
    assert!("doing".parse::<WorkflowCategory>().is_err());
}

#[test]
fn default_state_prefers_triage() {
    let states = vec![
        state("backlog", WorkflowCategory::Backlog, 0),
        state("triage", WorkflowCategory::Triage, 1),
    ];
    assert_eq!(default_state(&states).unwrap().id, "triage");
}

#[test]
fn default_state_falls_back_to_backlog_then_first() {
    let states = vec![
        state("todo", WorkflowCategory::Unstarted, 0),
        state("backlog", WorkflowCategory::Backlog, 1),
    ];
    assert_eq!(default_state(&states).unwrap().id, "backlog");

    let states = vec![state("todo", WorkflowCategory::Unstarted, 0)];
    assert_eq!(default_state(&states).unwrap().id, "todo");

    assert!(default_state(&[]).is_none());
}

#[test]
fn default_state_skips_deleted() {
    let mut triage = state("triage", WorkflowCategory::Triage, 0);
    triage.deleted_at = Some(Utc::now());
    let states = vec![triage, state("backlog", WorkflowCategory::Backlog, 1)];
    assert_eq!(default_state(&states).unwrap().id, "backlog");
}

#[test]
fn default_workflows_cover_every_category() {
    for category in [
        WorkflowCategory::Triage,
        WorkflowCategory::Backlog,
        WorkflowCategory::Unstarted,
        WorkflowCategory::Started,
        WorkflowCategory::Completed,
        WorkflowCategory::Canceled,
    ] {
        assert!(DEFAULT_WORKFLOWS.iter().any(|(_, c)| *c == category));
    }
}
