// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Side effects fired after an issue is created.

use crate::db::Database;
use crate::error::Result;
use crate::issue::{Issue, SourceMetadata};
use crate::lookup::workspace_for_team;
use crate::queue::{IssueQueue, NotificationEventFrom, NotificationPayload, NotificationQueue};
use crate::workflow::WorkflowCategory;

/// Enqueues the follow-up jobs for a freshly created issue.
///
/// In order:
/// 1. an `IssueCreated` notification, when the issue has subscribers;
/// 2. similarity indexing of the issue;
/// 3. triage handling (`resend = false`), when the issue sits in a triage state.
///
/// Enqueue failures are logged and do not stop the remaining jobs. Failing
/// to resolve the workspace or workflow state is returned as an error.
pub fn handle_post_create_issue(
    db: &Database,
    notifications: &dyn NotificationQueue,
    issues: &dyn IssueQueue,
    issue: &Issue,
    link_metadata: Option<&SourceMetadata>,
) -> Result<()> {
    if !issue.subscriber_ids.is_empty() {
        let workspace = workspace_for_team(db, &issue.team_id)?;
        let payload = NotificationPayload {
            issue_id: issue.id.clone(),
            subscriber_ids: issue.subscriber_ids.clone(),
            to_state_id: Some(issue.state_id.clone()),
            to_priority: issue.priority,
            to_assignee_id: issue.assignee_id.clone(),
            source_metadata: link_metadata.cloned(),
            workspace_id: workspace.id,
            issue_comment_id: None,
        };
        if let Err(e) = notifications.add_to_notification(
            NotificationEventFrom::IssueCreated,
            issue.created_by_id.as_deref(),
            payload,
        ) {
            tracing::warn!(issue_id = %issue.id, error = %e, "failed to enqueue notification");
        }
    }

    if let Err(e) = issues.add_issue_to_vector(issue) {
        tracing::warn!(issue_id = %issue.id, error = %e, "failed to enqueue vector indexing");
    }

    let state = db.get_workflow(&issue.state_id)?;
    if state.category == WorkflowCategory::Triage {
        if let Err(e) = issues.handle_triage_issue(issue, false) {
            tracing::warn!(issue_id = %issue.id, error = %e, "failed to enqueue triage");
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
