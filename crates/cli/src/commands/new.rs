// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tally_core::{issue_key, CreateIssueDto, Issue, LinkIssueData};

use super::{open, print_json, Context};
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::resolve::{parse_metadata, resolve_issue, resolve_labels, resolve_state, resolve_team};

/// Arguments of `tally new`, as given on the command line.
#[derive(Debug, Default, Clone)]
pub struct NewArgs {
    pub title: Option<String>,
    pub team: Option<String>,
    pub description: Option<String>,
    pub state: Option<String>,
    pub assignee: Option<String>,
    pub priority: Option<i64>,
    pub estimate: Option<i64>,
    pub parent: Option<String>,
    pub labels: Vec<String>,
    pub link: Option<String>,
    pub meta: Vec<String>,
}

pub fn run(args: NewArgs, output: OutputFormat) -> Result<()> {
    let ctx = open()?;
    let (issue, key) = run_impl(&ctx, &args)?;
    match output {
        OutputFormat::Json => print_json(&issue)?,
        OutputFormat::Text => println!("Created {}: {}", key, issue.title),
    }
    Ok(())
}

/// Creates the issue and returns it with its display key.
pub(crate) fn run_impl(ctx: &Context, args: &NewArgs) -> Result<(Issue, String)> {
    let workspace_id = ctx.workspace_id();
    let team = resolve_team(&ctx.db, workspace_id, args.team.as_deref())?;

    let state_id = args
        .state
        .as_deref()
        .map(|s| resolve_state(&ctx.db, &team, s))
        .transpose()?;
    let parent_id = args
        .parent
        .as_deref()
        .map(|p| resolve_issue(&ctx.db, workspace_id, p).map(|i| i.id))
        .transpose()?;
    let metadata = parse_metadata(&args.meta)?;

    let dto = CreateIssueDto {
        team_id: team.id.clone(),
        title: args.title.clone(),
        description: args.description.clone(),
        state_id,
        assignee_id: args.assignee.clone(),
        priority: args.priority,
        parent_id,
        estimate: args.estimate,
        label_ids: resolve_labels(&ctx.db, workspace_id, &args.labels)?,
        link_issue_data: args.link.as_ref().map(|url| LinkIssueData {
            url: url.clone(),
            source_metadata: None,
        }),
        source_metadata: metadata,
    };

    let issue = ctx.service().create_issue(&dto, workspace_id, &ctx.user)?;
    let key = issue_key(&team.identifier, issue.number);
    Ok((issue, key))
}

#[cfg(test)]
#[path = "new_tests.rs"]
mod tests;
