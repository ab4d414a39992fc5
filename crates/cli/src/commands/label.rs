// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace label commands.

use chrono::Utc;
use tally_core::id::generate_id;
use tally_core::Label;

use super::{open, print_json, Context};
use crate::cli::OutputFormat;
use crate::error::{Error, Result};

pub fn add(name: &str) -> Result<()> {
    let ctx = open()?;
    add_impl(&ctx, name)?;
    Ok(())
}

pub(crate) fn add_impl(ctx: &Context, name: &str) -> Result<Label> {
    let name = name.trim();
    let existing = ctx.db.list_labels(ctx.workspace_id())?;
    if existing.iter().any(|l| l.name.eq_ignore_ascii_case(name)) {
        return Err(Error::AlreadyExists {
            kind: "label",
            name: name.to_string(),
        });
    }

    let label = Label {
        id: generate_id("lbl", name, &Utc::now()),
        name: name.to_string(),
        workspace_id: ctx.workspace_id().to_string(),
    };
    ctx.db.create_label(&label)?;
    println!("Created label {}", label.name);
    Ok(label)
}

pub fn list(output: OutputFormat) -> Result<()> {
    let ctx = open()?;
    list_impl(&ctx, output)
}

pub(crate) fn list_impl(ctx: &Context, output: OutputFormat) -> Result<()> {
    let labels = ctx.db.list_labels(ctx.workspace_id())?;
    match output {
        OutputFormat::Json => print_json(&labels)?,
        OutputFormat::Text => {
            for label in &labels {
                println!("{}", label.name);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "label_tests.rs"]
mod tests;
