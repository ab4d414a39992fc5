// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tally-core: Shared library for the tally issue tracker
//!
//! This crate provides the issue data model, the history diff calculator,
//! subscriber bookkeeping, post-create job dispatch, and the SQLite store and
//! job queue they run against.

pub mod db;
pub mod diff;
pub mod dispatch;
pub mod error;
pub mod id;
pub mod identity;
pub mod input;
pub mod issue;
pub mod link;
pub mod lookup;
pub mod model;
pub mod queue;
pub mod service;
pub mod subscribers;
pub mod title;
pub mod workflow;
pub mod workspace;

#[cfg(test)]
mod test_fixtures;

pub use db::Database;
pub use diff::{issue_diff, FieldChange, IssueHistoryData};
pub use dispatch::handle_post_create_issue;
pub use error::{Error, Result};
pub use input::{create_issue_input, CreateIssueDto, LinkIssueData, NewIssue};
pub use issue::{
    issue_key, parse_issue_key, FieldValue, Issue, IssueComment, IssueHistory, SourceMetadata,
    TrackedField,
};
pub use link::{LinkCheck, LinkedIssue};
pub use lookup::{equivalent_state_ids, find_existing_link, last_issue_number, workspace_for_team};
pub use model::{Model, SettingsSection, SETTINGS_SECTIONS};
pub use queue::{IssueQueue, Job, JobQueue, NotificationEventFrom, NotificationPayload, NotificationQueue};
pub use service::{IssueService, IssueUpdate};
pub use subscribers::{update_subscribers, SubscribeType};
pub use title::{FirstLineTitle, TitleGenerator};
pub use workflow::{default_state, Workflow, WorkflowCategory, DEFAULT_WORKFLOWS};
pub use workspace::{slugify, validate_team_identifier, Label, Member, Team, Workspace};
