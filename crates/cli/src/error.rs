// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All possible errors that can occur in the tally CLI.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not initialized: run 'tally init' first")]
    NotInitialized,

    #[error("already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid issue reference: '{0}'\n  hint: use a key like ENG-42 or an issue ID")]
    InvalidIssueRef(String),

    #[error("invalid team identifier: '{0}'\n  hint: use 2-8 uppercase letters or digits, starting with a letter")]
    InvalidTeamIdentifier(String),

    #[error("team is required\n  hint: pass --team, this workspace has {count} teams")]
    TeamRequired { count: usize },

    #[error("{kind} '{name}' already exists")]
    AlreadyExists { kind: &'static str, name: String },

    #[error("unknown state '{state}' in team {team}")]
    UnknownState { state: String, team: String },

    #[error("unknown label: '{0}'\n  hint: create it with 'tally label add'")]
    UnknownLabel(String),

    #[error("invalid metadata '{0}'\n  hint: use key=value")]
    InvalidMetadata(String),

    #[error("{0}")]
    Core(#[from] tally_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for tally CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
