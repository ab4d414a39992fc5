// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Workspaces, teams, labels and workspace membership.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level tenant owning teams, labels and members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: String,
    pub name: String,
    /// URL-safe name derived from `name`.
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

/// A team inside a workspace. Issues are numbered per team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    /// Short uppercase key used in issue keys (`ENG` in `ENG-42`).
    pub identifier: String,
    pub workspace_id: String,
    pub created_at: DateTime<Utc>,
}

/// A workspace label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    pub name: String,
    pub workspace_id: String,
}

/// A user's membership in a workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub user_id: String,
    pub workspace_id: String,
    pub role: String,
}

/// Derives a slug: lowercase ASCII alphanumerics joined by single dashes.
pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Returns true if `identifier` is a valid team key (2-8 uppercase letters or digits,
/// starting with a letter).
pub fn validate_team_identifier(identifier: &str) -> bool {
    (2..=8).contains(&identifier.len())
        && identifier
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase())
        && identifier
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
