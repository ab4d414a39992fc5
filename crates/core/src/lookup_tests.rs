// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::link::LinkedIssue;
use crate::test_fixtures::{add_issue, add_team, state_id, test_db, WORKSPACE};
use crate::workflow::{Workflow, WorkflowCategory};

#[test]
fn last_issue_number_defaults_to_zero() {
    let db = test_db();
    let team = add_team(&db, "ENG");
    assert_eq!(last_issue_number(&db, &team.id).unwrap(), 0);

    add_issue(&db, &team, "iss-1", 1);
    add_issue(&db, &team, "iss-2", 2);
    assert_eq!(last_issue_number(&db, &team.id).unwrap(), 2);
}

#[test]
fn unlinked_url_is_ok() {
    let db = test_db();
    let check = find_existing_link(&db, "http://x/1").unwrap();
    assert_eq!(check, LinkCheck::ok());
}

#[test]
fn linked_url_conflict_names_issue_key() {
    let db = test_db();
    let team = add_team(&db, "TEAM");
    add_issue(&db, &team, "iss-42", 42);
    db.add_linked_issue(&LinkedIssue::new(
        "iss-42".to_string(),
        "http://x/1".to_string(),
    ))
    .unwrap();

    let check = find_existing_link(&db, "http://x/1").unwrap();
    assert_eq!(check.status, 400);
    assert_eq!(
        check.message.as_deref(),
        Some("This http://x/1 has already been linked to an issue TEAM-42")
    );
}

#[test]
fn equivalent_states_match_by_name_and_category() {
    let db = test_db();
    let eng = add_team(&db, "ENG");
    let ops = add_team(&db, "OPS");

    let mapping = equivalent_state_ids(&db, &eng.id, &ops.id).unwrap();
    assert_eq!(mapping.len(), 7);
    assert_eq!(
        mapping.get(&state_id(&eng.id, "In Review")),
        Some(&state_id(&ops.id, "In Review"))
    );
}

#[test]
fn equivalent_states_skip_deleted_and_unmatched() {
    let db = test_db();
    let eng = add_team(&db, "ENG");
    let ops = add_team(&db, "OPS");

    db.delete_workflow(&state_id(&ops.id, "Triage")).unwrap();
    db.create_workflow(&Workflow {
        id: "eng-qa".to_string(),
        name: "QA".to_string(),
        category: WorkflowCategory::Started,
        team_id: eng.id.clone(),
        position: 9,
        deleted_at: None,
    })
    .unwrap();
    // Same name, different category: not equivalent.
    db.create_workflow(&Workflow {
        id: "ops-qa".to_string(),
        name: "QA".to_string(),
        category: WorkflowCategory::Completed,
        team_id: ops.id.clone(),
        position: 9,
        deleted_at: None,
    })
    .unwrap();

    let mapping = equivalent_state_ids(&db, &eng.id, &ops.id).unwrap();
    assert!(!mapping.contains_key(&state_id(&eng.id, "Triage")));
    assert!(!mapping.contains_key("eng-qa"));
    assert_eq!(mapping.len(), 6);
}

#[test]
fn workspace_for_team_follows_team() {
    let db = test_db();
    let team = add_team(&db, "ENG");
    assert_eq!(workspace_for_team(&db, &team.id).unwrap().id, WORKSPACE);
    assert!(workspace_for_team(&db, "nope").is_err());
}
