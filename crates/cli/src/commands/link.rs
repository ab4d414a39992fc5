// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! External link commands.

use tally_core::{find_existing_link, LinkCheck, LinkedIssue};

use super::{key_of, open, print_json, Context};
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::resolve::{parse_metadata, resolve_issue};

/// Link an external URL to an issue.
pub fn add(reference: &str, url: &str, meta: &[String]) -> Result<()> {
    let ctx = open()?;
    let link = add_impl(&ctx, reference, url, meta)?;
    let issue = ctx.db.get_issue(&link.issue_id)?;
    println!("Linked {} to {}", link.url, key_of(&ctx.db, &issue)?);
    Ok(())
}

pub(crate) fn add_impl(
    ctx: &Context,
    reference: &str,
    url: &str,
    meta: &[String],
) -> Result<LinkedIssue> {
    let issue = resolve_issue(&ctx.db, ctx.workspace_id(), reference)?;
    let metadata = parse_metadata(meta)?;
    Ok(ctx.service().link_issue(&issue.id, url.trim(), metadata)?)
}

/// Report whether a URL may still be linked. A taken URL is an error in text mode.
pub fn check(url: &str, output: OutputFormat) -> Result<()> {
    let ctx = open()?;
    let result = check_impl(&ctx, url)?;
    match output {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Text => {
            if let Some(message) = result.message {
                return Err(tally_core::Error::DuplicateLink(message).into());
            }
            println!("{} is not linked", url.trim());
        }
    }
    Ok(())
}

pub(crate) fn check_impl(ctx: &Context, url: &str) -> Result<LinkCheck> {
    Ok(find_existing_link(&ctx.db, url.trim())?)
}

#[cfg(test)]
#[path = "link_tests.rs"]
mod tests;
