// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow states and their categories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Classification of a workflow state column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowCategory {
    /// Incoming issues awaiting routing.
    Triage,
    Backlog,
    Unstarted,
    Started,
    Completed,
    Canceled,
}

impl WorkflowCategory {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowCategory::Triage => "triage",
            WorkflowCategory::Backlog => "backlog",
            WorkflowCategory::Unstarted => "unstarted",
            WorkflowCategory::Started => "started",
            WorkflowCategory::Completed => "completed",
            WorkflowCategory::Canceled => "canceled",
        }
    }
}

impl fmt::Display for WorkflowCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WorkflowCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "triage" => Ok(WorkflowCategory::Triage),
            "backlog" => Ok(WorkflowCategory::Backlog),
            "unstarted" => Ok(WorkflowCategory::Unstarted),
            "started" => Ok(WorkflowCategory::Started),
            "completed" => Ok(WorkflowCategory::Completed),
            "canceled" | "cancelled" => Ok(WorkflowCategory::Canceled),
            _ => Err(Error::InvalidWorkflowCategory(s.to_string())),
        }
    }
}

/// A workflow state belonging to a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub id: String,
    pub name: String,
    pub category: WorkflowCategory,
    pub team_id: String,
    /// Sort order within the team.
    pub position: i64,
    /// Set when the state has been soft-deleted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// States every new team starts with, in position order.
pub const DEFAULT_WORKFLOWS: &[(&str, WorkflowCategory)] = &[
    ("Triage", WorkflowCategory::Triage),
    ("Backlog", WorkflowCategory::Backlog),
    ("Todo", WorkflowCategory::Unstarted),
    ("In Progress", WorkflowCategory::Started),
    ("In Review", WorkflowCategory::Started),
    ("Done", WorkflowCategory::Completed),
    ("Canceled", WorkflowCategory::Canceled),
];

/// Picks the state a new issue lands in when none is given.
///
/// Prefers the first triage state, then the first backlog state, then
/// whatever comes first. Expects `states` in position order.
pub fn default_state(states: &[Workflow]) -> Option<&Workflow> {
    let live = || states.iter().filter(|s| s.deleted_at.is_none());
    live()
        .find(|s| s.category == WorkflowCategory::Triage)
        .or_else(|| live().find(|s| s.category == WorkflowCategory::Backlog))
        .or_else(|| live().next())
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
