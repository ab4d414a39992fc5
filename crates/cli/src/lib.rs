// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tallyrs - the command-line front end of the tally issue tracker.
//!
//! Commands open the project found by walking up from the current directory
//! (`.tally/config.toml`), then drive [`tally_core::IssueService`] against
//! the SQLite database and the JSONL job queue configured there.
//!
//! ```rust,ignore
//! use clap::Parser;
//! use tallyrs::{run, Cli};
//!
//! let cli = Cli::parse_from(["tally", "new", "Fix login", "--team", "ENG"]);
//! run(cli.command)?;
//! ```

mod cli;
mod commands;
mod display;
mod resolve;

pub mod config;
pub mod error;
pub mod logging;

pub use cli::{
    Cli, Command, LabelCommand, MemberCommand, OutputFormat, QueueCommand, TeamCommand,
};
pub use config::{find_work_dir, get_db_path, get_queue_path, init_work_dir, Config};
pub use error::{Error, Result};

use commands::edit::EditArgs;
use commands::new::NewArgs;
use tally_core::SubscribeType;

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Init { name, user, team } => commands::init::run(name, user, team),
        Command::Team(cmd) => match cmd {
            TeamCommand::Add { identifier, name } => {
                commands::team::add(&identifier, name.as_deref())
            }
            TeamCommand::List { output } => commands::team::list(output),
            TeamCommand::States { identifier } => commands::team::states(&identifier),
            TeamCommand::RemoveState { identifier, state } => {
                commands::team::remove_state(&identifier, &state)
            }
        },
        Command::Label(cmd) => match cmd {
            LabelCommand::Add { name } => commands::label::add(&name),
            LabelCommand::List { output } => commands::label::list(output),
        },
        Command::Member(cmd) => match cmd {
            MemberCommand::Add { user, role } => commands::member::add(&user, &role),
            MemberCommand::List { output } => commands::member::list(output),
        },
        Command::New {
            title,
            team,
            description,
            state,
            assignee,
            priority,
            estimate,
            parent,
            label,
            link,
            meta,
            output,
        } => commands::new::run(
            NewArgs {
                title,
                team,
                description,
                state,
                assignee,
                priority,
                estimate,
                parent,
                labels: label,
                link,
                meta,
            },
            output,
        ),
        Command::List { team, output } => commands::list::run(team, output),
        Command::Edit {
            issue,
            title,
            description,
            state,
            assignee,
            unassign,
            priority,
            estimate,
            parent,
            no_parent,
            add_label,
            remove_label,
        } => commands::edit::run(
            &issue,
            EditArgs {
                title,
                description,
                state,
                assignee,
                unassign,
                priority,
                estimate,
                parent,
                no_parent,
                add_labels: add_label,
                remove_labels: remove_label,
            },
        ),
        Command::Show { issue, output } => commands::show::run(&issue, output),
        Command::History { issue, output } => commands::history::run(&issue, output),
        Command::Subscribe { issue, user } => {
            commands::subscribe::run(&issue, user.as_deref(), SubscribeType::Subscribe)
        }
        Command::Unsubscribe { issue, user } => {
            commands::subscribe::run(&issue, user.as_deref(), SubscribeType::Unsubscribe)
        }
        Command::Link { issue, url, meta } => commands::link::add(&issue, &url, &meta),
        Command::CheckLink { url, output } => commands::link::check(&url, output),
        Command::Move { issue, team } => commands::mv::run(&issue, &team),
        Command::Comment { issue, body } => commands::comment::run(&issue, &body),
        Command::Queue(cmd) => match cmd {
            QueueCommand::List { output } => commands::queue::list(output),
            QueueCommand::Clear { count } => commands::queue::clear(count),
        },
        Command::Settings { section } => commands::settings::run(&section),
        Command::Models => commands::models::run(),
    }
}
