// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Building the stored form of a new issue from a create request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::error::{Error, Result};
use crate::issue::{Issue, SourceMetadata};
use crate::model::Model;
use crate::subscribers::{update_subscribers, SubscribeType};
use crate::title::TitleGenerator;
use crate::workflow::default_state;

/// An external URL to attach to the issue once it exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkIssueData {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_metadata: Option<SourceMetadata>,
}

/// A request to create an issue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueDto {
    pub team_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Falls back to the team's default state.
    #[serde(default)]
    pub state_id: Option<String>,
    #[serde(default)]
    pub assignee_id: Option<String>,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub estimate: Option<i64>,
    #[serde(default)]
    pub label_ids: Vec<String>,
    #[serde(default)]
    pub source_metadata: Option<SourceMetadata>,
    #[serde(default)]
    pub link_issue_data: Option<LinkIssueData>,
}

/// Issue fields resolved from a [`CreateIssueDto`], before an ID and number
/// are assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewIssue {
    /// Placeholder; replaced with the next team number on insert.
    pub number: i64,
    pub title: String,
    pub description: Option<String>,
    pub team_id: String,
    pub state_id: String,
    pub assignee_id: Option<String>,
    pub priority: Option<i64>,
    pub parent_id: Option<String>,
    pub estimate: Option<i64>,
    pub label_ids: Vec<String>,
    pub subscriber_ids: Vec<String>,
    pub created_by_id: Option<String>,
    pub source_metadata: Option<SourceMetadata>,
}

impl NewIssue {
    /// Turns the input into an issue record.
    pub fn into_issue(self, id: String, number: i64, created_at: DateTime<Utc>) -> Issue {
        Issue {
            id,
            number,
            title: self.title,
            description: self.description,
            team_id: self.team_id,
            state_id: self.state_id,
            assignee_id: self.assignee_id,
            priority: self.priority,
            parent_id: self.parent_id,
            estimate: self.estimate,
            label_ids: self.label_ids,
            subscriber_ids: self.subscriber_ids,
            created_by_id: self.created_by_id,
            source_metadata: self.source_metadata,
            created_at,
            updated_at: created_at,
        }
    }
}

/// Resolves a create request into a [`NewIssue`].
///
/// The title comes from the request or, when blank, from `titles` applied to
/// the description. The creator and the assignee start out subscribed.
pub fn create_issue_input(
    db: &Database,
    titles: &dyn TitleGenerator,
    dto: &CreateIssueDto,
    workspace_id: &str,
    user_id: &str,
) -> Result<NewIssue> {
    let team = db.get_team(&dto.team_id)?;
    let title = issue_title(titles, dto, workspace_id)?;
    let state_id = resolve_state(db, &team.id, dto.state_id.as_deref())?;

    if let Some(parent_id) = &dto.parent_id {
        if !db.issue_exists(parent_id)? {
            return Err(Error::not_found(Model::Issue, parent_id));
        }
    }

    let mut label_ids = Vec::with_capacity(dto.label_ids.len());
    for id in &dto.label_ids {
        if !label_ids.contains(id) {
            label_ids.push(id.clone());
        }
    }

    Ok(NewIssue {
        number: 0,
        title,
        description: dto.description.clone(),
        team_id: team.id,
        state_id,
        assignee_id: dto.assignee_id.clone(),
        priority: dto.priority,
        parent_id: dto.parent_id.clone(),
        estimate: dto.estimate,
        label_ids,
        subscriber_ids: update_subscribers(
            Some(user_id),
            dto.assignee_id.as_deref(),
            &[],
            SubscribeType::Subscribe,
        ),
        created_by_id: Some(user_id.to_string()).filter(|u| !u.is_empty()),
        source_metadata: dto.source_metadata.clone(),
    })
}

fn issue_title(
    titles: &dyn TitleGenerator,
    dto: &CreateIssueDto,
    workspace_id: &str,
) -> Result<String> {
    if let Some(title) = dto.title.as_deref().map(str::trim) {
        if !title.is_empty() {
            return Ok(title.to_string());
        }
    }

    let description = dto
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .ok_or(Error::FieldRequired { field: "title" })?;

    let title = titles.generate_title(description, workspace_id)?;
    if title.trim().is_empty() {
        return Err(Error::FieldEmpty { field: "title" });
    }
    Ok(title)
}

fn resolve_state(db: &Database, team_id: &str, requested: Option<&str>) -> Result<String> {
    match requested {
        Some(id) => {
            let state = db.get_workflow(id)?;
            if state.team_id != team_id || state.deleted_at.is_some() {
                return Err(Error::not_found(Model::Workflow, id));
            }
            Ok(state.id)
        }
        None => {
            let states = db.list_workflows(team_id)?;
            default_state(&states)
                .map(|s| s.id.clone())
                .ok_or_else(|| Error::NoWorkflowStates {
                    team: team_id.to_string(),
                })
        }
    }
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
