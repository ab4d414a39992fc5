// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared database fixtures for unit tests.

#![allow(clippy::unwrap_used)]

use chrono::Utc;
use std::cell::RefCell;

use crate::db::Database;
use crate::error::Result;
use crate::issue::Issue;
use crate::queue::{IssueQueue, Job, NotificationEventFrom, NotificationPayload, NotificationQueue};
use crate::workflow::{Workflow, DEFAULT_WORKFLOWS};
use crate::workspace::{slugify, Team, Workspace};

pub const WORKSPACE: &str = "ws-1";

/// Opens an in-memory database holding workspace `ws-1`.
pub fn test_db() -> Database {
    let db = Database::open_in_memory().unwrap();
    db.create_workspace(&Workspace {
        id: WORKSPACE.to_string(),
        name: "Acme".to_string(),
        slug: "acme".to_string(),
        created_at: Utc::now(),
    })
    .unwrap();
    db
}

/// Adds team `team-<identifier lowercase>` with the default workflow states.
///
/// State IDs are `<team id>-<state slug>`, e.g. `team-eng-in-progress`.
pub fn add_team(db: &Database, identifier: &str) -> Team {
    let team = Team {
        id: format!("team-{}", identifier.to_lowercase()),
        name: identifier.to_string(),
        identifier: identifier.to_string(),
        workspace_id: WORKSPACE.to_string(),
        created_at: Utc::now(),
    };
    db.create_team(&team).unwrap();
    for (position, (name, category)) in DEFAULT_WORKFLOWS.iter().enumerate() {
        db.create_workflow(&Workflow {
            id: state_id(&team.id, name),
            name: name.to_string(),
            category: *category,
            team_id: team.id.clone(),
            position: position as i64,
            deleted_at: None,
        })
        .unwrap();
    }
    team
}

pub fn state_id(team_id: &str, state_name: &str) -> String {
    format!("{team_id}-{}", slugify(state_name))
}

/// Inserts an issue numbered `number` in the team's backlog.
pub fn add_issue(db: &Database, team: &Team, id: &str, number: i64) -> Issue {
    let mut issue = Issue::new(
        id.to_string(),
        team.id.clone(),
        state_id(&team.id, "Backlog"),
        format!("Issue {number}"),
        Utc::now(),
    );
    issue.number = number;
    db.create_issue(&issue).unwrap();
    issue
}

/// In-memory queue recording every job it is handed.
#[derive(Default)]
pub struct RecordingQueue {
    pub jobs: RefCell<Vec<Job>>,
    /// When set, every enqueue fails with an I/O error.
    pub fail: bool,
}

impl RecordingQueue {
    pub fn failing() -> Self {
        RecordingQueue {
            fail: true,
            ..Default::default()
        }
    }

    pub fn jobs(&self) -> Vec<Job> {
        self.jobs.borrow().clone()
    }

    fn record(&self, job: Job) -> Result<()> {
        if self.fail {
            return Err(std::io::Error::other("queue unavailable").into());
        }
        self.jobs.borrow_mut().push(job);
        Ok(())
    }
}

impl NotificationQueue for RecordingQueue {
    fn add_to_notification(
        &self,
        event: NotificationEventFrom,
        actor_id: Option<&str>,
        payload: NotificationPayload,
    ) -> Result<()> {
        self.record(Job::Notification {
            event,
            actor_id: actor_id.map(str::to_string),
            payload,
        })
    }
}

impl IssueQueue for RecordingQueue {
    fn add_issue_to_vector(&self, issue: &Issue) -> Result<()> {
        self.record(Job::VectorIndex {
            issue_id: issue.id.clone(),
        })
    }

    fn handle_triage_issue(&self, issue: &Issue, resend: bool) -> Result<()> {
        self.record(Job::Triage {
            issue_id: issue.id.clone(),
            resend,
        })
    }
}
