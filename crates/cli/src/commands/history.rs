// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::{open, print_json, Context};
use crate::cli::OutputFormat;
use crate::display::{format_history_entry, Names};
use crate::error::Result;
use crate::resolve::resolve_issue;

pub fn run(reference: &str, output: OutputFormat) -> Result<()> {
    let ctx = open()?;
    for line in run_impl(&ctx, reference, output)? {
        println!("{}", line);
    }
    Ok(())
}

/// Renders an issue's history, oldest first.
pub(crate) fn run_impl(
    ctx: &Context,
    reference: &str,
    output: OutputFormat,
) -> Result<Vec<String>> {
    let issue = resolve_issue(&ctx.db, ctx.workspace_id(), reference)?;
    let history = ctx.db.get_history(&issue.id)?;

    if output == OutputFormat::Json {
        print_json(&history)?;
        return Ok(Vec::new());
    }

    let names = names(ctx)?;
    Ok(history
        .iter()
        .flat_map(|entry| format_history_entry(entry, &names))
        .collect())
}

/// Display names for every team, state and label in the workspace.
fn names(ctx: &Context) -> Result<Names> {
    let mut names = Names::new();
    for team in ctx.db.list_teams(ctx.workspace_id())? {
        for state in ctx.db.list_workflows(&team.id)? {
            names.insert(state.id, format!("{} ({})", state.name, team.identifier));
        }
        names.insert(team.id, team.identifier);
    }
    for label in ctx.db.list_labels(ctx.workspace_id())? {
        names.insert(label.id, label.name);
    }
    Ok(names)
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
