// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core issue types.
//!
//! This module contains the [`Issue`] record, the [`TrackedField`] set that
//! history diffing compares, and the records hanging off an issue (comments
//! and history rows).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::diff::IssueHistoryData;

/// Free-form metadata describing where an issue came from (e.g. a Slack thread).
pub type SourceMetadata = BTreeMap<String, String>;

/// The primary entity representing a tracked work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Unique identifier.
    pub id: String,
    /// Sequence number within the owning team (`ENG-42` has number 42).
    pub number: i64,
    /// Short description of the work.
    pub title: String,
    /// Longer description providing context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning team.
    pub team_id: String,
    /// Current workflow state.
    pub state_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<i64>,
    /// Attached label IDs (unique).
    #[serde(default)]
    pub label_ids: Vec<String>,
    /// Users notified about changes (unique).
    #[serde(default)]
    pub subscriber_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_metadata: Option<SourceMetadata>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    /// Creates an issue with only the required fields set.
    pub fn new(
        id: String,
        team_id: String,
        state_id: String,
        title: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Issue {
            id,
            number: 0,
            title,
            description: None,
            team_id,
            state_id,
            assignee_id: None,
            priority: None,
            parent_id: None,
            estimate: None,
            label_ids: Vec::new(),
            subscriber_ids: Vec::new(),
            created_by_id: None,
            source_metadata: None,
            created_at,
            updated_at: created_at,
        }
    }

    /// Returns the current value of a tracked field.
    pub fn tracked_value(&self, field: TrackedField) -> Option<FieldValue> {
        match field {
            TrackedField::AssigneeId => self.assignee_id.clone().map(FieldValue::Id),
            TrackedField::Priority => self.priority.map(FieldValue::Number),
            TrackedField::ParentId => self.parent_id.clone().map(FieldValue::Id),
            TrackedField::StateId => Some(FieldValue::Id(self.state_id.clone())),
            TrackedField::Estimate => self.estimate.map(FieldValue::Number),
            TrackedField::TeamId => Some(FieldValue::Id(self.team_id.clone())),
        }
    }
}

/// Issue fields recorded in history when they change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedField {
    AssigneeId,
    Priority,
    ParentId,
    StateId,
    Estimate,
    TeamId,
}

impl TrackedField {
    /// Every tracked field, in comparison order.
    pub const ALL: [TrackedField; 6] = [
        TrackedField::AssigneeId,
        TrackedField::Priority,
        TrackedField::ParentId,
        TrackedField::StateId,
        TrackedField::Estimate,
        TrackedField::TeamId,
    ];

    /// Returns the field name used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackedField::AssigneeId => "assignee_id",
            TrackedField::Priority => "priority",
            TrackedField::ParentId => "parent_id",
            TrackedField::StateId => "state_id",
            TrackedField::Estimate => "estimate",
            TrackedField::TeamId => "team_id",
        }
    }

    /// Wire key of the previous value (e.g. `fromStateId`).
    pub fn from_key(&self) -> &'static str {
        match self {
            TrackedField::AssigneeId => "fromAssigneeId",
            TrackedField::Priority => "fromPriority",
            TrackedField::ParentId => "fromParentId",
            TrackedField::StateId => "fromStateId",
            TrackedField::Estimate => "fromEstimate",
            TrackedField::TeamId => "fromTeamId",
        }
    }

    /// Wire key of the new value (e.g. `toStateId`).
    pub fn to_key(&self) -> &'static str {
        match self {
            TrackedField::AssigneeId => "toAssigneeId",
            TrackedField::Priority => "toPriority",
            TrackedField::ParentId => "toParentId",
            TrackedField::StateId => "toStateId",
            TrackedField::Estimate => "toEstimate",
            TrackedField::TeamId => "toTeamId",
        }
    }

    /// Inverse of [`TrackedField::from_key`] / [`TrackedField::to_key`].
    ///
    /// Returns the field and whether the key names the previous value.
    pub fn from_wire_key(key: &str) -> Option<(TrackedField, bool)> {
        TrackedField::ALL.iter().find_map(|f| {
            if f.from_key() == key {
                Some((*f, true))
            } else if f.to_key() == key {
                Some((*f, false))
            } else {
                None
            }
        })
    }
}

impl fmt::Display for TrackedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Value of a tracked field: a reference ID or an integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(i64),
    Id(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Id(s) => write!(f, "{s}"),
        }
    }
}

/// A persisted history entry for an issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueHistory {
    /// Database-assigned identifier.
    pub id: i64,
    pub issue_id: String,
    /// User who made the change, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub data: IssueHistoryData,
    pub created_at: DateTime<Utc>,
}

/// A comment on an issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueComment {
    /// Database-assigned identifier.
    pub id: i64,
    pub issue_id: String,
    pub user_id: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Formats the human-facing issue key, e.g. `ENG-42`.
pub fn issue_key(team_identifier: &str, number: i64) -> String {
    format!("{team_identifier}-{number}")
}

/// Splits an issue key like `ENG-42` into its team identifier and number.
pub fn parse_issue_key(key: &str) -> Option<(&str, i64)> {
    let (team, number) = key.rsplit_once('-')?;
    if team.is_empty() {
        return None;
    }
    let number = number.parse().ok()?;
    Some((team, number))
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
