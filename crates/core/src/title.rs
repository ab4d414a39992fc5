// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Issue title generation for issues created without a title.

use crate::error::Result;

/// Longest title [`FirstLineTitle`] produces, in characters.
pub const MAX_TITLE_CHARS: usize = 120;

/// Produces a title from an issue description.
pub trait TitleGenerator {
    fn generate_title(&self, description: &str, workspace_id: &str) -> Result<String>;
}

/// Uses the first non-blank line of the description, cut to
/// [`MAX_TITLE_CHARS`] characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstLineTitle;

impl TitleGenerator for FirstLineTitle {
    fn generate_title(&self, description: &str, _workspace_id: &str) -> Result<String> {
        let line = description
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or_default();

        Ok(match line.char_indices().nth(MAX_TITLE_CHARS) {
            Some((cut, _)) => line[..cut].trim_end().to_string(),
            None => line.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "title_tests.rs"]
mod tests;
