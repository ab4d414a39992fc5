// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Subscription commands.

use tally_core::SubscribeType;

use super::{key_of, open, Context};
use crate::error::Result;
use crate::resolve::resolve_issue;

pub fn run(reference: &str, user: Option<&str>, op: SubscribeType) -> Result<()> {
    let ctx = open()?;
    let issue = resolve_issue(&ctx.db, ctx.workspace_id(), reference)?;
    let key = key_of(&ctx.db, &issue)?;
    let subscribers = run_impl(&ctx, &issue.id, user, op)?;
    if subscribers.is_empty() {
        println!("{} has no subscribers", key);
    } else {
        println!("{} subscribers: {}", key, subscribers.join(", "));
    }
    Ok(())
}

/// Applies `op` for `user` (default: the acting user) and returns the new subscriber list.
pub(crate) fn run_impl(
    ctx: &Context,
    reference: &str,
    user: Option<&str>,
    op: SubscribeType,
) -> Result<Vec<String>> {
    let issue = resolve_issue(&ctx.db, ctx.workspace_id(), reference)?;
    let user = user.map(str::trim).filter(|u| !u.is_empty()).unwrap_or(&ctx.user);
    Ok(ctx.service().update_subscription(&issue.id, user, op)?)
}

#[cfg(test)]
#[path = "subscribe_tests.rs"]
mod tests;
