// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Issue, history and comment database operations.

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use super::{parse_json, parse_timestamp, Database};
use crate::diff::IssueHistoryData;
use crate::error::{Error, Result};
use crate::issue::{Issue, IssueComment, IssueHistory};
use crate::model::Model;

const ISSUE_COLUMNS: &str = "id, number, title, description, team_id, state_id, assignee_id,
     priority, parent_id, estimate, label_ids, subscriber_ids, created_by_id,
     source_metadata, created_at, updated_at";

/// Map a row to an Issue.
///
/// Expected columns: see [`ISSUE_COLUMNS`].
fn row_to_issue(row: &rusqlite::Row) -> rusqlite::Result<Issue> {
    let labels_str: String = row.get(10)?;
    let subscribers_str: String = row.get(11)?;
    let metadata_str: Option<String> = row.get(13)?;
    let created_str: String = row.get(14)?;
    let updated_str: String = row.get(15)?;

    Ok(Issue {
        id: row.get(0)?,
        number: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        team_id: row.get(4)?,
        state_id: row.get(5)?,
        assignee_id: row.get(6)?,
        priority: row.get(7)?,
        parent_id: row.get(8)?,
        estimate: row.get(9)?,
        label_ids: parse_json(&labels_str, "label_ids")?,
        subscriber_ids: parse_json(&subscribers_str, "subscriber_ids")?,
        created_by_id: row.get(12)?,
        source_metadata: metadata_str
            .map(|s| parse_json(&s, "source_metadata"))
            .transpose()?,
        created_at: parse_timestamp(&created_str, "created_at")?,
        updated_at: parse_timestamp(&updated_str, "updated_at")?,
    })
}

impl Database {
    /// Create a new issue.
    pub fn create_issue(&self, issue: &Issue) -> Result<()> {
        self.conn.execute(
            &format!(
                "INSERT INTO issues ({ISSUE_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)"
            ),
            params![
                issue.id,
                issue.number,
                issue.title,
                issue.description,
                issue.team_id,
                issue.state_id,
                issue.assignee_id,
                issue.priority,
                issue.parent_id,
                issue.estimate,
                serde_json::to_string(&issue.label_ids)?,
                serde_json::to_string(&issue.subscriber_ids)?,
                issue.created_by_id,
                issue
                    .source_metadata
                    .as_ref()
                    .map(serde_json::to_string)
                    .transpose()?,
                issue.created_at.to_rfc3339(),
                issue.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Get an issue by ID.
    pub fn get_issue(&self, id: &str) -> Result<Issue> {
        let issue = self
            .conn
            .query_row(
                &format!("SELECT {ISSUE_COLUMNS} FROM issues WHERE id = ?1"),
                params![id],
                row_to_issue,
            )
            .optional()?;

        issue.ok_or_else(|| Error::not_found(Model::Issue, id))
    }

    /// Get an issue by its number within a team.
    pub fn get_issue_by_number(&self, team_id: &str, number: i64) -> Result<Issue> {
        let issue = self
            .conn
            .query_row(
                &format!("SELECT {ISSUE_COLUMNS} FROM issues WHERE team_id = ?1 AND number = ?2"),
                params![team_id, number],
                row_to_issue,
            )
            .optional()?;

        issue.ok_or_else(|| Error::not_found(Model::Issue, format!("{team_id}#{number}")))
    }

    /// Check if an issue exists.
    pub fn issue_exists(&self, id: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM issues WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// List a team's issues, highest number first.
    pub fn list_issues(&self, team_id: &str) -> Result<Vec<Issue>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ISSUE_COLUMNS} FROM issues WHERE team_id = ?1 ORDER BY number DESC"
        ))?;

        let issues = stmt
            .query_map(params![team_id], row_to_issue)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(issues)
    }

    /// Highest issue number in a team, if the team has any issues.
    pub fn max_issue_number(&self, team_id: &str) -> Result<Option<i64>> {
        let number: Option<i64> = self.conn.query_row(
            "SELECT MAX(number) FROM issues WHERE team_id = ?1",
            params![team_id],
            |row| row.get(0),
        )?;
        Ok(number)
    }

    /// Write every mutable field of an issue and bump `updated_at`.
    pub fn update_issue(&self, issue: &Issue) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE issues SET number = ?1, title = ?2, description = ?3, team_id = ?4,
                 state_id = ?5, assignee_id = ?6, priority = ?7, parent_id = ?8,
                 estimate = ?9, label_ids = ?10, subscriber_ids = ?11, updated_at = ?12
             WHERE id = ?13",
            params![
                issue.number,
                issue.title,
                issue.description,
                issue.team_id,
                issue.state_id,
                issue.assignee_id,
                issue.priority,
                issue.parent_id,
                issue.estimate,
                serde_json::to_string(&issue.label_ids)?,
                serde_json::to_string(&issue.subscriber_ids)?,
                Utc::now().to_rfc3339(),
                issue.id,
            ],
        )?;

        if affected == 0 {
            return Err(Error::not_found(Model::Issue, &issue.id));
        }
        Ok(())
    }

    /// Replace an issue's subscriber set.
    pub fn update_subscriber_ids(&self, id: &str, subscriber_ids: &[String]) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE issues SET subscriber_ids = ?1, updated_at = ?2 WHERE id = ?3",
            params![
                serde_json::to_string(subscriber_ids)?,
                Utc::now().to_rfc3339(),
                id
            ],
        )?;

        if affected == 0 {
            return Err(Error::not_found(Model::Issue, id));
        }
        Ok(())
    }

    /// Record a history entry for an issue.
    pub fn add_history(
        &self,
        issue_id: &str,
        user_id: Option<&str>,
        data: &IssueHistoryData,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO issue_history (issue_id, user_id, data, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                issue_id,
                user_id,
                serde_json::to_string(data)?,
                Utc::now().to_rfc3339()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get the history of an issue, oldest first.
    pub fn get_history(&self, issue_id: &str) -> Result<Vec<IssueHistory>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, issue_id, user_id, data, created_at
             FROM issue_history WHERE issue_id = ?1 ORDER BY id",
        )?;

        let history = stmt
            .query_map(params![issue_id], |row| {
                let data_str: String = row.get(3)?;
                let created_str: String = row.get(4)?;
                Ok(IssueHistory {
                    id: row.get(0)?,
                    issue_id: row.get(1)?,
                    user_id: row.get(2)?,
                    data: parse_json(&data_str, "data")?,
                    created_at: parse_timestamp(&created_str, "created_at")?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(history)
    }

    /// Add a comment to an issue.
    pub fn add_comment(&self, issue_id: &str, user_id: &str, body: &str) -> Result<IssueComment> {
        let created_at = Utc::now();
        self.conn.execute(
            "INSERT INTO issue_comments (issue_id, user_id, body, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![issue_id, user_id, body, created_at.to_rfc3339()],
        )?;
        Ok(IssueComment {
            id: self.conn.last_insert_rowid(),
            issue_id: issue_id.to_string(),
            user_id: user_id.to_string(),
            body: body.to_string(),
            created_at,
        })
    }

    /// Get all comments on an issue, oldest first.
    pub fn get_comments(&self, issue_id: &str) -> Result<Vec<IssueComment>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, issue_id, user_id, body, created_at
             FROM issue_comments WHERE issue_id = ?1 ORDER BY id",
        )?;

        let comments = stmt
            .query_map(params![issue_id], |row| {
                let created_str: String = row.get(4)?;
                Ok(IssueComment {
                    id: row.get(0)?,
                    issue_id: row.get(1)?,
                    user_id: row.get(2)?,
                    body: row.get(3)?,
                    created_at: parse_timestamp(&created_str, "created_at")?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(comments)
    }
}

#[cfg(test)]
#[path = "issues_tests.rs"]
mod tests;
