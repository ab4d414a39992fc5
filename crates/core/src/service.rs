// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Issue operations that touch the store and the job queues together.
//!
//! [`IssueService`] borrows its collaborators, so callers decide how the
//! database and queues are opened and shared.

use chrono::Utc;

use crate::db::Database;
use crate::diff::issue_diff;
use crate::dispatch::handle_post_create_issue;
use crate::error::{Error, Result};
use crate::id::generate_unique_id;
use crate::input::{create_issue_input, CreateIssueDto, NewIssue};
use crate::issue::{Issue, IssueComment, SourceMetadata};
use crate::link::LinkedIssue;
use crate::lookup::{equivalent_state_ids, find_existing_link, last_issue_number, workspace_for_team};
use crate::model::Model;
use crate::queue::{IssueQueue, NotificationEventFrom, NotificationPayload, NotificationQueue};
use crate::subscribers::{update_subscribers, SubscribeType};
use crate::title::TitleGenerator;
use crate::workflow::default_state;

/// A partial edit of an issue. `None` leaves a field untouched; for the
/// nullable fields `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub state_id: Option<String>,
    pub assignee_id: Option<Option<String>>,
    pub priority: Option<Option<i64>>,
    pub parent_id: Option<Option<String>>,
    pub estimate: Option<Option<i64>>,
    pub add_label_ids: Vec<String>,
    pub remove_label_ids: Vec<String>,
}

/// Issue workflows over a database and the job queues.
pub struct IssueService<'a> {
    db: &'a Database,
    notifications: &'a dyn NotificationQueue,
    issues: &'a dyn IssueQueue,
    titles: &'a dyn TitleGenerator,
}

impl<'a> IssueService<'a> {
    pub fn new(
        db: &'a Database,
        notifications: &'a dyn NotificationQueue,
        issues: &'a dyn IssueQueue,
        titles: &'a dyn TitleGenerator,
    ) -> Self {
        IssueService {
            db,
            notifications,
            issues,
            titles,
        }
    }

    /// Creates an issue, records its creation history, attaches the
    /// requested link and fires the post-create jobs.
    pub fn create_issue(
        &self,
        dto: &CreateIssueDto,
        workspace_id: &str,
        user_id: &str,
    ) -> Result<Issue> {
        if let Some(link) = &dto.link_issue_data {
            self.ensure_unlinked(&link.url)?;
        }

        let input = create_issue_input(self.db, self.titles, dto, workspace_id, user_id)?;

        let tx = self.db.begin_immediate()?;
        let issue = self.insert_with_next_number(input)?;
        self.db
            .add_history(&issue.id, Some(user_id), &issue_diff(&issue, None))?;

        let link_metadata = dto.link_issue_data.as_ref().and_then(|link| {
            link.source_metadata
                .clone()
                .or_else(|| dto.source_metadata.clone())
        });
        if let Some(link) = &dto.link_issue_data {
            let mut linked = LinkedIssue::new(issue.id.clone(), link.url.clone());
            linked.source_metadata = link_metadata.clone();
            self.db.add_linked_issue(&linked)?;
        }
        tx.commit()?;

        tracing::info!(issue_id = %issue.id, number = issue.number, team_id = %issue.team_id, "issue created");

        handle_post_create_issue(
            self.db,
            self.notifications,
            self.issues,
            &issue,
            link_metadata.as_ref(),
        )?;
        Ok(issue)
    }

    /// Inserts the issue as the team's next number. Must run under
    /// [`Database::begin_immediate`].
    fn insert_with_next_number(&self, input: NewIssue) -> Result<Issue> {
        let created_at = Utc::now();
        let id = generate_unique_id("iss", &input.title, &created_at, |id| {
            self.db.issue_exists(id)
        })?;
        let number = last_issue_number(self.db, &input.team_id)? + 1;
        let issue = input.into_issue(id, number, created_at);
        self.db.create_issue(&issue)?;
        Ok(issue)
    }

    /// Applies `update`, records the change in history and notifies subscribers.
    pub fn update_issue(&self, issue_id: &str, update: &IssueUpdate, user_id: &str) -> Result<Issue> {
        let old = self.db.get_issue(issue_id)?;
        let mut new = old.clone();

        if let Some(title) = &update.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(Error::FieldEmpty { field: "title" });
            }
            new.title = title.to_string();
        }
        if let Some(description) = &update.description {
            new.description = description.clone();
        }
        if let Some(state_id) = &update.state_id {
            let state = self.db.get_workflow(state_id)?;
            if state.team_id != new.team_id || state.deleted_at.is_some() {
                return Err(Error::not_found(Model::Workflow, state_id));
            }
            new.state_id = state.id;
        }
        if let Some(assignee_id) = &update.assignee_id {
            new.assignee_id = assignee_id.clone();
        }
        if let Some(priority) = update.priority {
            new.priority = priority;
        }
        if let Some(parent_id) = &update.parent_id {
            if let Some(parent) = parent_id {
                if parent == &new.id || !self.db.issue_exists(parent)? {
                    return Err(Error::not_found(Model::Issue, parent));
                }
            }
            new.parent_id = parent_id.clone();
        }
        if let Some(estimate) = update.estimate {
            new.estimate = estimate;
        }
        for id in &update.add_label_ids {
            if !new.label_ids.contains(id) {
                new.label_ids.push(id.clone());
            }
        }
        new.label_ids.retain(|id| !update.remove_label_ids.contains(id));

        if new.assignee_id != old.assignee_id {
            new.subscriber_ids = update_subscribers(
                None,
                new.assignee_id.as_deref(),
                &new.subscriber_ids,
                SubscribeType::Subscribe,
            );
        }

        if new == old {
            return Ok(old);
        }

        let diff = issue_diff(&new, Some(&old));
        let tx = self.db.conn.unchecked_transaction()?;
        self.db.update_issue(&new)?;
        if !diff.is_empty() {
            self.db.add_history(&new.id, Some(user_id), &diff)?;
        }
        tx.commit()?;

        let issue = self.db.get_issue(&new.id)?;
        tracing::info!(issue_id = %issue.id, "issue updated");

        if !diff.is_empty() {
            self.notify(NotificationEventFrom::IssueUpdated, user_id, &issue, None)?;
        }
        Ok(issue)
    }

    /// Adds `user_id` to the issue's subscribers.
    pub fn subscribe(&self, issue_id: &str, user_id: &str) -> Result<Vec<String>> {
        self.update_subscription(issue_id, user_id, SubscribeType::Subscribe)
    }

    /// Removes `user_id` from the issue's subscribers.
    pub fn unsubscribe(&self, issue_id: &str, user_id: &str) -> Result<Vec<String>> {
        self.update_subscription(issue_id, user_id, SubscribeType::Unsubscribe)
    }

    /// Applies a subscribe operation for the acting user and stores the result.
    pub fn update_subscription(
        &self,
        issue_id: &str,
        user_id: &str,
        op: SubscribeType,
    ) -> Result<Vec<String>> {
        let issue = self.db.get_issue(issue_id)?;
        let subscribers = update_subscribers(Some(user_id), None, &issue.subscriber_ids, op);
        if subscribers != issue.subscriber_ids {
            self.db.update_subscriber_ids(issue_id, &subscribers)?;
        }
        tracing::debug!(issue_id, user_id, op = op.as_str(), "subscribers updated");
        Ok(subscribers)
    }

    /// Attaches an external URL to an issue.
    ///
    /// Fails with [`Error::DuplicateLink`] when the URL is already linked.
    pub fn link_issue(
        &self,
        issue_id: &str,
        url: &str,
        source_metadata: Option<SourceMetadata>,
    ) -> Result<LinkedIssue> {
        let issue = self.db.get_issue(issue_id)?;
        self.ensure_unlinked(url)?;

        let mut link = LinkedIssue::new(issue.id, url.to_string());
        link.source_metadata = source_metadata;
        // Insert still fails if another writer claimed the URL since the check.
        link.id = self.db.add_linked_issue(&link)?;
        tracing::info!(issue_id, url, "issue linked");
        Ok(link)
    }

    fn ensure_unlinked(&self, url: &str) -> Result<()> {
        let check = find_existing_link(self.db, url)?;
        if check.is_ok() {
            return Ok(());
        }
        Err(Error::DuplicateLink(check.message.unwrap_or_else(|| {
            format!("This {url} has already been linked to an issue")
        })))
    }

    /// Moves an issue to another team.
    ///
    /// The state maps to the destination state with the same name and
    /// category, else to the destination's default state. The issue gets
    /// the next number in the destination team.
    pub fn move_issue(&self, issue_id: &str, team_id: &str, user_id: &str) -> Result<Issue> {
        let old = self.db.get_issue(issue_id)?;
        if old.team_id == team_id {
            return Ok(old);
        }
        let destination = self.db.get_team(team_id)?;

        let mapping = equivalent_state_ids(self.db, &old.team_id, &destination.id)?;
        let state_id = match mapping.get(&old.state_id) {
            Some(id) => id.clone(),
            None => {
                let states = self.db.list_workflows(&destination.id)?;
                match default_state(&states) {
                    Some(state) => state.id.clone(),
                    None => {
                        let state = self.db.get_workflow(&old.state_id)?;
                        return Err(Error::NoEquivalentState {
                            state: state.name,
                            team: destination.identifier,
                        });
                    }
                }
            }
        };

        let mut new = old.clone();
        new.team_id = destination.id.clone();
        new.state_id = state_id;

        let tx = self.db.begin_immediate()?;
        new.number = last_issue_number(self.db, &destination.id)? + 1;
        self.db.update_issue(&new)?;
        self.db
            .add_history(&new.id, Some(user_id), &issue_diff(&new, Some(&old)))?;
        tx.commit()?;

        let issue = self.db.get_issue(&new.id)?;
        tracing::info!(issue_id = %issue.id, team = %destination.identifier, number = issue.number, "issue moved");
        self.notify(NotificationEventFrom::IssueUpdated, user_id, &issue, None)?;
        Ok(issue)
    }

    /// Comments on an issue and subscribes the author.
    ///
    /// The other subscribers are notified.
    pub fn add_comment(&self, issue_id: &str, user_id: &str, body: &str) -> Result<IssueComment> {
        let body = body.trim();
        if body.is_empty() {
            return Err(Error::FieldEmpty { field: "body" });
        }
        let issue = self.db.get_issue(issue_id)?;

        let comment = self.db.add_comment(&issue.id, user_id, body)?;
        let subscribers = update_subscribers(
            Some(user_id),
            None,
            &issue.subscriber_ids,
            SubscribeType::Subscribe,
        );
        if subscribers != issue.subscriber_ids {
            self.db.update_subscriber_ids(&issue.id, &subscribers)?;
        }
        tracing::info!(issue_id = %issue.id, comment_id = comment.id, "comment added");

        let issue = self.db.get_issue(&issue.id)?;
        self.notify(
            NotificationEventFrom::IssueCommentCreated,
            user_id,
            &issue,
            Some(comment.id),
        )?;
        Ok(comment)
    }

    /// Enqueues a notification to everyone subscribed except the actor.
    fn notify(
        &self,
        event: NotificationEventFrom,
        actor_id: &str,
        issue: &Issue,
        issue_comment_id: Option<i64>,
    ) -> Result<()> {
        let subscriber_ids: Vec<String> = issue
            .subscriber_ids
            .iter()
            .filter(|id| id.as_str() != actor_id)
            .cloned()
            .collect();
        if subscriber_ids.is_empty() {
            return Ok(());
        }

        let workspace = workspace_for_team(self.db, &issue.team_id)?;
        let payload = NotificationPayload {
            issue_id: issue.id.clone(),
            subscriber_ids,
            to_state_id: Some(issue.state_id.clone()),
            to_priority: issue.priority,
            to_assignee_id: issue.assignee_id.clone(),
            source_metadata: None,
            workspace_id: workspace.id,
            issue_comment_id,
        };
        if let Err(e) = self
            .notifications
            .add_to_notification(event, Some(actor_id), payload)
        {
            tracing::warn!(issue_id = %issue.id, event = %event, error = %e, "failed to enqueue notification");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
