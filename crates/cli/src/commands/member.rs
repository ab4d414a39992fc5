// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace membership commands.

use tally_core::Member;

use super::{open, print_json, Context};
use crate::cli::OutputFormat;
use crate::error::Result;

pub fn add(user: &str, role: &str) -> Result<()> {
    let ctx = open()?;
    add_impl(&ctx, user, role)
}

/// Adds a member, or changes the role of an existing one.
pub(crate) fn add_impl(ctx: &Context, user: &str, role: &str) -> Result<()> {
    let member = Member {
        user_id: user.trim().to_string(),
        workspace_id: ctx.workspace_id().to_string(),
        role: role.trim().to_lowercase(),
    };
    ctx.db.add_member(&member)?;
    println!("{} is now a {}", member.user_id, member.role);
    Ok(())
}

pub fn list(output: OutputFormat) -> Result<()> {
    let ctx = open()?;
    list_impl(&ctx, output)
}

pub(crate) fn list_impl(ctx: &Context, output: OutputFormat) -> Result<()> {
    let members = ctx.db.list_members(ctx.workspace_id())?;
    match output {
        OutputFormat::Json => print_json(&members)?,
        OutputFormat::Text => {
            for member in &members {
                println!("{}\t{}", member.user_id, member.role);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "member_tests.rs"]
mod tests;
