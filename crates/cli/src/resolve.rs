// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Turning user-supplied references into stored records.

use tally_core::{
    parse_issue_key, validate_team_identifier, Database, Issue, SourceMetadata, Team,
};

use crate::error::{Error, Result};

/// Resolves an issue reference: a key such as `ENG-42` or a raw issue ID.
pub fn resolve_issue(db: &Database, workspace_id: &str, reference: &str) -> Result<Issue> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(Error::InvalidIssueRef(reference.to_string()));
    }

    if let Some((team, number)) = parse_issue_key(reference) {
        let identifier = team.to_ascii_uppercase();
        if validate_team_identifier(&identifier) {
            let team = db.get_team_by_identifier(workspace_id, &identifier)?;
            return Ok(db.get_issue_by_number(&team.id, number)?);
        }
    }

    Ok(db.get_issue(reference)?)
}

/// Resolves a team by identifier, or picks the only team in the workspace.
pub fn resolve_team(db: &Database, workspace_id: &str, identifier: Option<&str>) -> Result<Team> {
    match identifier {
        Some(identifier) => {
            let identifier = identifier.trim().to_ascii_uppercase();
            if !validate_team_identifier(&identifier) {
                return Err(Error::InvalidTeamIdentifier(identifier));
            }
            Ok(db.get_team_by_identifier(workspace_id, &identifier)?)
        }
        None => {
            let mut teams = db.list_teams(workspace_id)?;
            if teams.len() == 1 {
                Ok(teams.remove(0))
            } else {
                Err(Error::TeamRequired { count: teams.len() })
            }
        }
    }
}

/// Resolves a workflow state of `team` by ID or case-insensitive name.
pub fn resolve_state(db: &Database, team: &Team, state: &str) -> Result<String> {
    let wanted = state.trim();
    db.list_workflows(&team.id)?
        .into_iter()
        .find(|w| w.id == wanted || w.name.eq_ignore_ascii_case(wanted))
        .map(|w| w.id)
        .ok_or_else(|| Error::UnknownState {
            state: wanted.to_string(),
            team: team.identifier.clone(),
        })
}

/// Resolves label names (or IDs) to label IDs, preserving order.
pub fn resolve_labels(db: &Database, workspace_id: &str, names: &[String]) -> Result<Vec<String>> {
    if names.is_empty() {
        return Ok(Vec::new());
    }
    let labels = db.list_labels(workspace_id)?;
    names
        .iter()
        .map(|name| {
            let name = name.trim();
            labels
                .iter()
                .find(|l| l.id == name || l.name.eq_ignore_ascii_case(name))
                .map(|l| l.id.clone())
                .ok_or_else(|| Error::UnknownLabel(name.to_string()))
        })
        .collect()
}

/// Parses repeated `key=value` arguments. No arguments yields `None`.
pub fn parse_metadata(pairs: &[String]) -> Result<Option<SourceMetadata>> {
    if pairs.is_empty() {
        return Ok(None);
    }
    let mut metadata = SourceMetadata::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| Error::InvalidMetadata(pair.clone()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::InvalidMetadata(pair.clone()));
        }
        metadata.insert(key.to_string(), value.trim().to_string());
    }
    Ok(Some(metadata))
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
