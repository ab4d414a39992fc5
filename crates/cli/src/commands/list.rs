// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::HashMap;

use tally_core::issue_key;

use super::{open, print_json, Context};
use crate::cli::OutputFormat;
use crate::display::format_issue_line;
use crate::error::Result;
use crate::resolve::resolve_team;

pub fn run(team: Option<String>, output: OutputFormat) -> Result<()> {
    let ctx = open()?;
    let lines = run_impl(&ctx, team.as_deref(), output)?;
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

/// Renders a team's issues, newest first.
pub(crate) fn run_impl(
    ctx: &Context,
    team: Option<&str>,
    output: OutputFormat,
) -> Result<Vec<String>> {
    let team = resolve_team(&ctx.db, ctx.workspace_id(), team)?;
    let issues = ctx.db.list_issues(&team.id)?;

    if output == OutputFormat::Json {
        print_json(&issues)?;
        return Ok(Vec::new());
    }

    let states: HashMap<String, String> = ctx
        .db
        .list_workflows(&team.id)?
        .into_iter()
        .map(|w| (w.id, w.name))
        .collect();

    Ok(issues
        .iter()
        .map(|issue| {
            let state = states
                .get(&issue.state_id)
                .map(String::as_str)
                .unwrap_or(&issue.state_id);
            format_issue_line(&issue_key(&team.identifier, issue.number), state, issue)
        })
        .collect())
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
