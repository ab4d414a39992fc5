// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for tally-core operations.

use thiserror::Error;

use crate::model::Model;

/// All possible errors that can occur in tally-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{model} not found: {id}")]
    NotFound { model: Model, id: String },

    #[error("invalid subscribe operation: '{0}'\n  hint: valid operations are: subscribe, unsubscribe")]
    InvalidOperationKind(String),

    #[error("invalid workflow category: '{0}'\n  hint: valid categories are: triage, backlog, unstarted, started, completed, canceled")]
    InvalidWorkflowCategory(String),

    #[error("invalid model: '{0}'")]
    InvalidModel(String),

    #[error("invalid settings section: '{0}'\n  hint: valid sections are: overview, labels, members")]
    InvalidSettingsSection(String),

    #[error("invalid notification event: '{0}'")]
    InvalidNotificationEvent(String),

    #[error("{0}")]
    DuplicateLink(String),

    #[error("team '{team}' has no workflow states\n  hint: create a team with 'tally team add' to get the default states")]
    NoWorkflowStates { team: String },

    #[error("no equivalent state for '{state}' in team {team}")]
    NoEquivalentState { state: String, team: String },

    #[error("{field} is required")]
    FieldRequired { field: &'static str },

    #[error("{field} cannot be empty")]
    FieldEmpty { field: &'static str },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

impl Error {
    /// Shorthand for a [`Error::NotFound`] of the given model.
    pub fn not_found(model: Model, id: impl Into<String>) -> Self {
        Error::NotFound {
            model,
            id: id.into(),
        }
    }
}

/// A specialized Result type for tally-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
