// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tally_core::Model;

use crate::error::Result;

pub fn run() -> Result<()> {
    for line in lines() {
        println!("{}", line);
    }
    Ok(())
}

/// One line per model with its scope.
pub(crate) fn lines() -> Vec<String> {
    Model::ALL
        .iter()
        .map(|m| {
            let scope = if m.is_team_scoped() { "team" } else { "workspace" };
            format!("{:<24}{}", m.as_str(), scope)
        })
        .collect()
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;
