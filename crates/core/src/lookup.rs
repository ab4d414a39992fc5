// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Store-backed lookups used while creating, linking and moving issues.

use std::collections::BTreeMap;

use crate::db::Database;
use crate::error::Result;
use crate::issue::issue_key;
use crate::link::LinkCheck;
use crate::workspace::Workspace;

/// Highest issue number used by a team, or 0 for a team with no issues.
pub fn last_issue_number(db: &Database, team_id: &str) -> Result<i64> {
    Ok(db.max_issue_number(team_id)?.unwrap_or(0))
}

/// Checks whether `url` is already linked to an issue.
///
/// Returns a conflict naming the issue key (`ENG-42`) when it is.
pub fn find_existing_link(db: &Database, url: &str) -> Result<LinkCheck> {
    let Some(link) = db.find_linked_issue_by_url(url)? else {
        return Ok(LinkCheck::ok());
    };

    let issue = db.get_issue(&link.issue_id)?;
    let team = db.get_team(&issue.team_id)?;
    tracing::debug!(url, issue_id = %issue.id, "url already linked");
    Ok(LinkCheck::conflict(
        url,
        &issue_key(&team.identifier, issue.number),
    ))
}

/// Maps each live workflow state of `source_team_id` to the live state of
/// `destination_team_id` with the same name and category.
///
/// States without a counterpart are left out.
pub fn equivalent_state_ids(
    db: &Database,
    source_team_id: &str,
    destination_team_id: &str,
) -> Result<BTreeMap<String, String>> {
    let source = db.list_workflows(source_team_id)?;
    let destination = db.list_workflows(destination_team_id)?;

    let mapping = source
        .iter()
        .filter_map(|src| {
            destination
                .iter()
                .find(|dst| dst.name == src.name && dst.category == src.category)
                .map(|dst| (src.id.clone(), dst.id.clone()))
        })
        .collect();

    Ok(mapping)
}

/// Workspace owning a team.
pub fn workspace_for_team(db: &Database, team_id: &str) -> Result<Workspace> {
    let team = db.get_team(team_id)?;
    db.get_workspace(&team.workspace_id)
}

#[cfg(test)]
#[path = "lookup_tests.rs"]
mod tests;
