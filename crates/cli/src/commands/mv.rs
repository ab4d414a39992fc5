// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `tally move`: transfer an issue to another team.

use tally_core::Issue;

use super::{key_of, open, Context};
use crate::error::Result;
use crate::resolve::{resolve_issue, resolve_team};

pub fn run(reference: &str, team: &str) -> Result<()> {
    let ctx = open()?;
    let before = resolve_issue(&ctx.db, ctx.workspace_id(), reference)?;
    let old_key = key_of(&ctx.db, &before)?;
    let issue = run_impl(&ctx, &before.id, team)?;
    println!("Moved {} to {}", old_key, key_of(&ctx.db, &issue)?);
    Ok(())
}

pub(crate) fn run_impl(ctx: &Context, reference: &str, team: &str) -> Result<Issue> {
    let issue = resolve_issue(&ctx.db, ctx.workspace_id(), reference)?;
    let team = resolve_team(&ctx.db, ctx.workspace_id(), Some(team))?;
    Ok(ctx.service().move_issue(&issue.id, &team.id, &ctx.user)?)
}

#[cfg(test)]
#[path = "mv_tests.rs"]
mod tests;
