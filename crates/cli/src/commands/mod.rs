// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod comment;
pub mod edit;
pub mod history;
pub mod init;
pub mod label;
pub mod link;
pub mod list;
pub mod member;
pub mod models;
pub mod mv;
pub mod new;
pub mod queue;
pub mod settings;
pub mod show;
pub mod subscribe;
pub mod team;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;

use std::path::PathBuf;

use tally_core::identity::resolve_user;
use tally_core::{issue_key, Database, FirstLineTitle, Issue, IssueService, JobQueue};

use crate::config::{find_work_dir, get_db_path, get_queue_path, Config};
use crate::error::Result;

/// Everything a command needs: the store, the job queue and who is acting.
pub struct Context {
    pub db: Database,
    pub config: Config,
    pub work_dir: PathBuf,
    pub queue: JobQueue,
    pub user: String,
}

impl Context {
    pub fn workspace_id(&self) -> &str {
        &self.config.workspace
    }

    /// Issue service writing its jobs to this context's queue.
    pub fn service(&self) -> IssueService<'_> {
        IssueService::new(&self.db, &self.queue, &self.queue, &FirstLineTitle)
    }
}

/// Helper to open the project from the current directory.
pub fn open() -> Result<Context> {
    let work_dir = find_work_dir()?;
    let config = Config::load(&work_dir)?;
    let db = Database::open(&get_db_path(&work_dir, &config))?;
    let queue = JobQueue::open(&get_queue_path(&work_dir, &config))?;
    let user = resolve_user(config.user.as_deref());
    tracing::debug!(work_dir = %work_dir.display(), user = %user, "project opened");
    Ok(Context {
        db,
        config,
        work_dir,
        queue,
        user,
    })
}

/// The `TEAM-number` key of an issue.
pub(crate) fn key_of(db: &Database, issue: &Issue) -> Result<String> {
    let team = db.get_team(&issue.team_id)?;
    Ok(issue_key(&team.identifier, issue.number))
}

/// Prints `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
