// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};

use chrono::Utc;
use tally_core::id::generate_id;
use tally_core::identity::resolve_user;
use tally_core::{slugify, validate_team_identifier, Database, Member, Workspace};

use super::team::create_team;
use crate::config::{get_db_path, init_work_dir, Config};
use crate::error::{Error, Result};

const DEFAULT_WORKSPACE_NAME: &str = "workspace";

pub fn run(name: Option<String>, user: Option<String>, team: Option<String>) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let work_dir = run_impl(&cwd, name.as_deref(), user.as_deref(), team.as_deref())?;
    println!("Initialized tally in {}", work_dir.display());
    Ok(())
}

/// Creates `.tally/`, the database with its workspace, and optionally a first team.
pub(crate) fn run_impl(
    path: &Path,
    name: Option<&str>,
    user: Option<&str>,
    team: Option<&str>,
) -> Result<PathBuf> {
    if let Some(identifier) = team {
        let identifier = identifier.trim().to_ascii_uppercase();
        if !validate_team_identifier(&identifier) {
            return Err(Error::InvalidTeamIdentifier(identifier));
        }
    }

    let name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .or_else(|| {
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| DEFAULT_WORKSPACE_NAME.to_string());

    let now = Utc::now();
    let mut config = Config::new(generate_id("ws", &name, &now));
    config.user = user.map(str::to_string);
    let work_dir = init_work_dir(path, &config)?;

    let db = Database::open(&get_db_path(&work_dir, &config))?;
    let slug = match slugify(&name) {
        s if s.is_empty() => DEFAULT_WORKSPACE_NAME.to_string(),
        s => s,
    };
    db.create_workspace(&Workspace {
        id: config.workspace.clone(),
        name,
        slug,
        created_at: now,
    })?;
    db.add_member(&Member {
        user_id: resolve_user(config.user.as_deref()),
        workspace_id: config.workspace.clone(),
        role: "admin".to_string(),
    })?;

    if let Some(identifier) = team {
        create_team(&db, &config.workspace, identifier, None)?;
    }

    tracing::info!(workspace_id = %config.workspace, "workspace initialized");
    Ok(work_dir)
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
