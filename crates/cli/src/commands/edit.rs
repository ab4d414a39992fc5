// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tally_core::{Issue, IssueUpdate};

use super::{key_of, open, Context};
use crate::error::Result;
use crate::resolve::{resolve_issue, resolve_labels, resolve_state};

/// Arguments of `tally edit`, as given on the command line.
#[derive(Debug, Default, Clone)]
pub struct EditArgs {
    pub title: Option<String>,
    pub description: Option<String>,
    pub state: Option<String>,
    pub assignee: Option<String>,
    pub unassign: bool,
    pub priority: Option<i64>,
    pub estimate: Option<i64>,
    pub parent: Option<String>,
    pub no_parent: bool,
    pub add_labels: Vec<String>,
    pub remove_labels: Vec<String>,
}

pub fn run(reference: &str, args: EditArgs) -> Result<()> {
    let ctx = open()?;
    let issue = run_impl(&ctx, reference, &args)?;
    println!("Updated {}", key_of(&ctx.db, &issue)?);
    Ok(())
}

pub(crate) fn run_impl(ctx: &Context, reference: &str, args: &EditArgs) -> Result<Issue> {
    let workspace_id = ctx.workspace_id();
    let issue = resolve_issue(&ctx.db, workspace_id, reference)?;
    let team = ctx.db.get_team(&issue.team_id)?;

    let assignee_id = if args.unassign {
        Some(None)
    } else {
        args.assignee.clone().map(Some)
    };
    let parent_id = if args.no_parent {
        Some(None)
    } else {
        args.parent
            .as_deref()
            .map(|p| resolve_issue(&ctx.db, workspace_id, p).map(|i| Some(i.id)))
            .transpose()?
    };
    // An empty description clears it
    let description = args
        .description
        .clone()
        .map(|d| Some(d).filter(|d| !d.trim().is_empty()));

    let update = IssueUpdate {
        title: args.title.clone(),
        description,
        state_id: args
            .state
            .as_deref()
            .map(|s| resolve_state(&ctx.db, &team, s))
            .transpose()?,
        assignee_id,
        priority: args.priority.map(Some),
        parent_id,
        estimate: args.estimate.map(Some),
        add_label_ids: resolve_labels(&ctx.db, workspace_id, &args.add_labels)?,
        remove_label_ids: resolve_labels(&ctx.db, workspace_id, &args.remove_labels)?,
    };

    if update == IssueUpdate::default() {
        return Ok(issue);
    }
    Ok(ctx.service().update_issue(&issue.id, &update, &ctx.user)?)
}

#[cfg(test)]
#[path = "edit_tests.rs"]
mod tests;
