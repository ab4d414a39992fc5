// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project configuration management.
//!
//! Configuration is stored in `.tally/config.toml` and includes:
//! - `workspace`: ID of the workspace this directory tracks
//! - `user`: acting user ID (overridden by `TALLY_USER`)
//! - `database`: optional database path
//! - `queue`: optional job queue path

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const WORK_DIR_NAME: &str = ".tally";
const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "tally.db";
const QUEUE_FILE_NAME: &str = "jobs.jsonl";

/// Project configuration stored in `.tally/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Workspace ID.
    pub workspace: String,
    /// Acting user ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Database path (relative to the project root or absolute).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Job queue path (relative to the project root or absolute).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue: Option<String>,
}

impl Config {
    pub fn new(workspace: String) -> Self {
        Config {
            workspace,
            user: None,
            database: None,
            queue: None,
        }
    }

    /// Loads configuration from the given `.tally/` directory.
    pub fn load(work_dir: &Path) -> Result<Self> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = fs::read_to_string(&config_path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Saves configuration to the given `.tally/` directory.
    pub fn save(&self, work_dir: &Path) -> Result<()> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, content)?;
        Ok(())
    }
}

/// Find the .tally directory by walking up from `start`.
pub fn find_work_dir_from(start: &Path) -> Result<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let work_dir = current.join(WORK_DIR_NAME);
        if work_dir.join(CONFIG_FILE_NAME).is_file() {
            return Ok(work_dir);
        }
        if !current.pop() {
            return Err(Error::NotInitialized);
        }
    }
}

/// Find the .tally directory by walking up from the current directory.
pub fn find_work_dir() -> Result<PathBuf> {
    find_work_dir_from(&std::env::current_dir()?)
}

/// Resolves a configured path against the project root, or falls back to
/// `default_name` inside the work directory.
fn resolve_path(work_dir: &Path, configured: Option<&str>, default_name: &str) -> PathBuf {
    match configured {
        Some(p) if Path::new(p).is_absolute() => PathBuf::from(p),
        // Relative to work_dir's parent (the project root)
        Some(p) => work_dir.parent().unwrap_or(work_dir).join(p),
        None => work_dir.join(default_name),
    }
}

/// Get the database path from config.
pub fn get_db_path(work_dir: &Path, config: &Config) -> PathBuf {
    resolve_path(work_dir, config.database.as_deref(), DB_FILE_NAME)
}

/// Get the job queue path from config.
pub fn get_queue_path(work_dir: &Path, config: &Config) -> PathBuf {
    resolve_path(work_dir, config.queue.as_deref(), QUEUE_FILE_NAME)
}

/// Initialize a new .tally directory at the given path.
///
/// A `.tally/` directory without a config file is reused.
pub fn init_work_dir(path: &Path, config: &Config) -> Result<PathBuf> {
    let work_dir = path.join(WORK_DIR_NAME);

    if work_dir.join(CONFIG_FILE_NAME).exists() {
        return Err(Error::AlreadyInitialized(work_dir.display().to_string()));
    }

    fs::create_dir_all(&work_dir)?;
    config.save(&work_dir)?;

    Ok(work_dir)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
