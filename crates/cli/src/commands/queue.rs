// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Inspection of the background job queue.

use super::{open, print_json, Context};
use crate::cli::OutputFormat;
use crate::display::format_job;
use crate::error::Result;

pub fn list(output: OutputFormat) -> Result<()> {
    let ctx = open()?;
    for line in list_impl(&ctx, output)? {
        println!("{}", line);
    }
    Ok(())
}

pub(crate) fn list_impl(ctx: &Context, output: OutputFormat) -> Result<Vec<String>> {
    let jobs = ctx.queue.peek_all()?;
    if output == OutputFormat::Json {
        print_json(&jobs)?;
        return Ok(Vec::new());
    }
    if jobs.is_empty() {
        return Ok(vec!["Queue is empty".to_string()]);
    }
    Ok(jobs
        .iter()
        .enumerate()
        .map(|(i, job)| format_job(i, job))
        .collect())
}

pub fn clear(count: Option<usize>) -> Result<()> {
    let ctx = open()?;
    let removed = clear_impl(&ctx, count)?;
    println!("Removed {} job(s)", removed);
    Ok(())
}

/// Drops the first `count` jobs, or all of them. Returns how many were removed.
pub(crate) fn clear_impl(ctx: &Context, count: Option<usize>) -> Result<usize> {
    let len = ctx.queue.len()?;
    match count {
        Some(n) if n < len => {
            ctx.queue.remove_first(n)?;
            Ok(n)
        }
        _ => {
            ctx.queue.clear()?;
            Ok(len)
        }
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
