// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tally_core::IssueComment;

use super::{open, Context};
use crate::error::Result;
use crate::resolve::resolve_issue;

pub fn run(reference: &str, body: &str) -> Result<()> {
    let ctx = open()?;
    run_impl(&ctx, reference, body)?;
    println!("Commented on {}", reference);
    Ok(())
}

pub(crate) fn run_impl(ctx: &Context, reference: &str, body: &str) -> Result<IssueComment> {
    let issue = resolve_issue(&ctx.db, ctx.workspace_id(), reference)?;
    Ok(ctx.service().add_comment(&issue.id, &ctx.user, body)?)
}

#[cfg(test)]
#[path = "comment_tests.rs"]
mod tests;
