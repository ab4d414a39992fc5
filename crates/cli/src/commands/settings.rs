// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tally_core::SettingsSection;

use super::{open, Context};
use crate::error::Result;

pub fn run(section: &str) -> Result<()> {
    let ctx = open()?;
    for line in run_impl(&ctx, section)? {
        println!("{}", line);
    }
    Ok(())
}

pub(crate) fn run_impl(ctx: &Context, section: &str) -> Result<Vec<String>> {
    let section: SettingsSection = section.parse()?;
    let workspace_id = ctx.workspace_id();
    let mut lines = vec![format!("{}:", section.title())];

    match section {
        SettingsSection::Overview => {
            let workspace = ctx.db.get_workspace(workspace_id)?;
            lines.push(format!("  Name: {}", workspace.name));
            lines.push(format!("  Slug: {}", workspace.slug));
            lines.push(format!("  ID: {}", workspace.id));
            lines.push(format!(
                "  Teams: {}",
                ctx.db.list_teams(workspace_id)?.len()
            ));
            lines.push(format!("  User: {}", ctx.user));
        }
        SettingsSection::Labels => {
            for label in ctx.db.list_labels(workspace_id)? {
                lines.push(format!("  {}", label.name));
            }
        }
        SettingsSection::Members => {
            for member in ctx.db.list_members(workspace_id)? {
                lines.push(format!("  {} ({})", member.user_id, member.role));
            }
        }
    }
    Ok(lines)
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
