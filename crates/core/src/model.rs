// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed registries shared by the server and client surfaces.
//!
//! [`Model`] names every synchronized record kind. [`SettingsSection`] is the
//! registry of workspace settings pages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Record kinds known to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Model {
    Workspace,
    Team,
    Label,
    UsersOnWorkspaces,
    View,
    Action,

    // Team-scoped
    Workflow,
    Issue,
    IssueHistory,
    IssueComment,
    IntegrationDefinition,
    IntegrationAccount,
    LinkedIssue,
    IssueRelation,
    Notification,
    IssueSuggestion,
    Project,
    ProjectMilestone,
    Cycle,
    Conversation,
    ConversationHistory,
    Template,
}

impl Model {
    /// Every model, in declaration order.
    pub const ALL: [Model; 22] = [
        Model::Workspace,
        Model::Team,
        Model::Label,
        Model::UsersOnWorkspaces,
        Model::View,
        Model::Action,
        Model::Workflow,
        Model::Issue,
        Model::IssueHistory,
        Model::IssueComment,
        Model::IntegrationDefinition,
        Model::IntegrationAccount,
        Model::LinkedIssue,
        Model::IssueRelation,
        Model::Notification,
        Model::IssueSuggestion,
        Model::Project,
        Model::ProjectMilestone,
        Model::Cycle,
        Model::Conversation,
        Model::ConversationHistory,
        Model::Template,
    ];

    /// Returns the model name as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Model::Workspace => "Workspace",
            Model::Team => "Team",
            Model::Label => "Label",
            Model::UsersOnWorkspaces => "UsersOnWorkspaces",
            Model::View => "View",
            Model::Action => "Action",
            Model::Workflow => "Workflow",
            Model::Issue => "Issue",
            Model::IssueHistory => "IssueHistory",
            Model::IssueComment => "IssueComment",
            Model::IntegrationDefinition => "IntegrationDefinition",
            Model::IntegrationAccount => "IntegrationAccount",
            Model::LinkedIssue => "LinkedIssue",
            Model::IssueRelation => "IssueRelation",
            Model::Notification => "Notification",
            Model::IssueSuggestion => "IssueSuggestion",
            Model::Project => "Project",
            Model::ProjectMilestone => "ProjectMilestone",
            Model::Cycle => "Cycle",
            Model::Conversation => "Conversation",
            Model::ConversationHistory => "ConversationHistory",
            Model::Template => "Template",
        }
    }

    /// Returns true for models that belong to a team rather than a workspace.
    pub fn is_team_scoped(&self) -> bool {
        !matches!(
            self,
            Model::Workspace
                | Model::Team
                | Model::Label
                | Model::UsersOnWorkspaces
                | Model::View
                | Model::Action
        )
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Model {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Model::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidModel(s.to_string()))
    }
}

/// A page in the workspace settings area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsSection {
    Overview,
    Labels,
    Members,
}

/// Registry of settings sections, in display order.
pub const SETTINGS_SECTIONS: &[SettingsSection] = &[
    SettingsSection::Overview,
    SettingsSection::Labels,
    SettingsSection::Members,
];

impl SettingsSection {
    /// Key used to address the section.
    pub fn key(&self) -> &'static str {
        match self {
            SettingsSection::Overview => "overview",
            SettingsSection::Labels => "labels",
            SettingsSection::Members => "members",
        }
    }

    /// Heading shown for the section.
    pub fn title(&self) -> &'static str {
        match self {
            SettingsSection::Overview => "Overview",
            SettingsSection::Labels => "Labels",
            SettingsSection::Members => "Members",
        }
    }

    /// Looks up a section by key.
    pub fn lookup(key: &str) -> Option<SettingsSection> {
        SETTINGS_SECTIONS
            .iter()
            .copied()
            .find(|s| s.key() == key.to_lowercase())
    }

    /// Comma-separated list of valid keys.
    pub fn valid_keys() -> String {
        SETTINGS_SECTIONS
            .iter()
            .map(|s| s.key())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for SettingsSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for SettingsSection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SettingsSection::lookup(s).ok_or_else(|| Error::InvalidSettingsSection(s.to_string()))
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
