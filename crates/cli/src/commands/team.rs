// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Team management commands.

use chrono::Utc;
use tally_core::id::generate_id;
use tally_core::{validate_team_identifier, Database, Team, Workflow, DEFAULT_WORKFLOWS};

use super::{open, print_json, Context};
use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use crate::resolve::{resolve_state, resolve_team};

/// Creates a team and its default workflow states.
pub fn create_team(
    db: &Database,
    workspace_id: &str,
    identifier: &str,
    name: Option<&str>,
) -> Result<Team> {
    let identifier = identifier.trim().to_ascii_uppercase();
    if !validate_team_identifier(&identifier) {
        return Err(Error::InvalidTeamIdentifier(identifier));
    }
    if db.get_team_by_identifier(workspace_id, &identifier).is_ok() {
        return Err(Error::AlreadyExists {
            kind: "team",
            name: identifier,
        });
    }

    let now = Utc::now();
    let team = Team {
        id: generate_id("team", &identifier, &now),
        name: name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(&identifier)
            .to_string(),
        identifier: identifier.clone(),
        workspace_id: workspace_id.to_string(),
        created_at: now,
    };

    let tx = db.conn.unchecked_transaction().map_err(tally_core::Error::from)?;
    db.create_team(&team)?;
    for (position, (state_name, category)) in DEFAULT_WORKFLOWS.iter().enumerate() {
        db.create_workflow(&Workflow {
            id: generate_id("wf", state_name, &now),
            name: state_name.to_string(),
            category: *category,
            team_id: team.id.clone(),
            position: position as i64,
            deleted_at: None,
        })?;
    }
    tx.commit().map_err(tally_core::Error::from)?;

    tracing::info!(team_id = %team.id, identifier = %team.identifier, "team created");
    Ok(team)
}

pub fn add(identifier: &str, name: Option<&str>) -> Result<()> {
    let ctx = open()?;
    add_impl(&ctx, identifier, name)
}

pub(crate) fn add_impl(ctx: &Context, identifier: &str, name: Option<&str>) -> Result<()> {
    let team = create_team(&ctx.db, ctx.workspace_id(), identifier, name)?;
    println!("Created team {} ({})", team.identifier, team.name);
    Ok(())
}

pub fn list(output: OutputFormat) -> Result<()> {
    let ctx = open()?;
    list_impl(&ctx, output)
}

pub(crate) fn list_impl(ctx: &Context, output: OutputFormat) -> Result<()> {
    let teams = ctx.db.list_teams(ctx.workspace_id())?;
    match output {
        OutputFormat::Json => print_json(&teams)?,
        OutputFormat::Text => {
            if teams.is_empty() {
                println!("No teams. Create one with 'tally team add'.");
            }
            for team in &teams {
                println!("{}\t{}", team.identifier, team.name);
            }
        }
    }
    Ok(())
}

pub fn states(identifier: &str) -> Result<()> {
    let ctx = open()?;
    states_impl(&ctx, identifier)
}

pub(crate) fn states_impl(ctx: &Context, identifier: &str) -> Result<()> {
    let team = resolve_team(&ctx.db, ctx.workspace_id(), Some(identifier))?;
    for state in ctx.db.list_workflows(&team.id)? {
        println!("{}\t{}", state.name, state.category);
    }
    Ok(())
}

pub fn remove_state(identifier: &str, state: &str) -> Result<()> {
    let ctx = open()?;
    let (team, name) = remove_state_impl(&ctx, identifier, state)?;
    println!("Removed state {} from {}", name, team.identifier);
    Ok(())
}

/// Soft-deletes a state. New issues and moves stop using it.
pub(crate) fn remove_state_impl(
    ctx: &Context,
    identifier: &str,
    state: &str,
) -> Result<(Team, String)> {
    let team = resolve_team(&ctx.db, ctx.workspace_id(), Some(identifier))?;
    let state_id = resolve_state(&ctx.db, &team, state)?;
    let workflow = ctx.db.get_workflow(&state_id)?;
    ctx.db.delete_workflow(&state_id)?;
    tracing::info!(team = %team.identifier, state_id = %state_id, "workflow state removed");
    Ok((team, workflow.name))
}

#[cfg(test)]
#[path = "team_tests.rs"]
mod tests;
