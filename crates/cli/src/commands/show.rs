// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;
use tally_core::{Issue, IssueComment, LinkedIssue};

use super::{key_of, open, print_json, Context};
use crate::cli::OutputFormat;
use crate::display::{format_issue_details, IssueDetails};
use crate::error::Result;
use crate::resolve::resolve_issue;

/// JSON shape of `tally show -o json`.
#[derive(Serialize)]
struct IssueJson<'a> {
    key: &'a str,
    state: &'a str,
    #[serde(flatten)]
    issue: &'a Issue,
    labels: &'a [String],
    links: &'a [LinkedIssue],
    comments: &'a [IssueComment],
}

pub fn run(reference: &str, output: OutputFormat) -> Result<()> {
    let ctx = open()?;
    run_impl(&ctx, reference, output)
}

pub(crate) fn run_impl(ctx: &Context, reference: &str, output: OutputFormat) -> Result<()> {
    let issue = resolve_issue(&ctx.db, ctx.workspace_id(), reference)?;
    let key = key_of(&ctx.db, &issue)?;
    let state = ctx.db.get_workflow(&issue.state_id)?.name;
    let labels = label_names(ctx, &issue)?;
    let links = ctx.db.get_linked_issues(&issue.id)?;
    let comments = ctx.db.get_comments(&issue.id)?;

    match output {
        OutputFormat::Json => print_json(&IssueJson {
            key: &key,
            state: &state,
            issue: &issue,
            labels: &labels,
            links: &links,
            comments: &comments,
        })?,
        OutputFormat::Text => {
            let parent_key = match &issue.parent_id {
                Some(id) => Some(key_of(&ctx.db, &ctx.db.get_issue(id)?)?),
                None => None,
            };
            println!(
                "{}",
                format_issue_details(&IssueDetails {
                    key: &key,
                    state: &state,
                    issue: &issue,
                    parent_key: parent_key.as_deref(),
                    labels: &labels,
                    links: &links,
                    comments: &comments,
                })
            );
        }
    }
    Ok(())
}

/// Names of the issue's labels, in the issue's order.
fn label_names(ctx: &Context, issue: &Issue) -> Result<Vec<String>> {
    if issue.label_ids.is_empty() {
        return Ok(Vec::new());
    }
    let labels = ctx.db.list_labels(ctx.workspace_id())?;
    Ok(issue
        .label_ids
        .iter()
        .map(|id| {
            labels
                .iter()
                .find(|l| &l.id == id)
                .map(|l| l.name.clone())
                .unwrap_or_else(|| id.clone())
        })
        .collect())
}

#[cfg(test)]
#[path = "show_tests.rs"]
mod tests;
