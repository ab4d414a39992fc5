// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::{Parser, Subcommand, ValueEnum};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "tally")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A local issue tracker with history, subscriptions and background jobs")]
pub struct Cli {
    /// Run as if tally was started in <path>
    #[arg(short = 'C', long = "directory", global = true, value_name = "path")]
    pub directory: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize a workspace in the current directory
    #[command(after_help = "\
Examples:
  tally init                         Workspace named after the directory
  tally init --name Acme --team ENG  Named workspace with a first team")]
    Init {
        /// Workspace name (defaults to the directory name)
        #[arg(long, value_parser = non_empty_string)]
        name: Option<String>,

        /// Acting user stored in the config
        #[arg(long, short)]
        user: Option<String>,

        /// Create a first team with this identifier
        #[arg(long, short)]
        team: Option<String>,
    },

    /// Team management
    #[command(subcommand)]
    Team(TeamCommand),

    /// Label management
    #[command(subcommand)]
    Label(LabelCommand),

    /// Workspace member management
    #[command(subcommand)]
    Member(MemberCommand),

    /// Create a new issue
    #[command(after_help = "\
Examples:
  tally new \"Fix login bug\"                  Create in the default state
  tally new \"Fix crash\" -t ENG -s Todo        Create in a given team and state
  tally new -d \"Crash on save\\nstack...\"      Title taken from the description
  tally new \"Sync\" --link https://x/1         Create linked to an external URL")]
    New {
        /// Issue title (derived from the description when omitted)
        title: Option<String>,

        /// Team identifier (optional when the workspace has one team)
        #[arg(long, short)]
        team: Option<String>,

        /// Description
        #[arg(long, short)]
        description: Option<String>,

        /// Workflow state name or ID
        #[arg(long, short)]
        state: Option<String>,

        /// Assignee user ID
        #[arg(long, short)]
        assignee: Option<String>,

        /// Priority (0 = none, 1 = urgent ... 4 = low)
        #[arg(long, short, value_parser = clap::value_parser!(i64).range(0..=4))]
        priority: Option<i64>,

        /// Estimate points
        #[arg(long, short)]
        estimate: Option<i64>,

        /// Parent issue (key or ID)
        #[arg(long)]
        parent: Option<String>,

        /// Label name(s) (comma-separated or repeated)
        #[arg(long, short, value_delimiter = ',')]
        label: Vec<String>,

        /// External URL to link
        #[arg(long)]
        link: Option<String>,

        /// Source metadata for the issue and its link (key=value, repeated)
        #[arg(long = "meta", value_name = "KEY=VALUE")]
        meta: Vec<String>,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// List a team's issues
    List {
        /// Team identifier (optional when the workspace has one team)
        #[arg(long, short)]
        team: Option<String>,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Edit an issue
    #[command(
        arg_required_else_help = true,
        after_help = "\
Examples:
  tally edit ENG-1 --state \"In Progress\"   Move through the workflow
  tally edit ENG-1 -a bob -p 2              Assign and prioritize
  tally edit ENG-1 --unassign               Clear the assignee
  tally edit ENG-1 --add-label bug          Attach a label"
    )]
    Edit {
        /// Issue key or ID
        issue: String,

        #[arg(long, value_parser = non_empty_string)]
        title: Option<String>,

        #[arg(long, short)]
        description: Option<String>,

        /// Workflow state name or ID
        #[arg(long, short)]
        state: Option<String>,

        #[arg(long, short, conflicts_with = "unassign")]
        assignee: Option<String>,

        /// Clear the assignee
        #[arg(long)]
        unassign: bool,

        #[arg(long, short, value_parser = clap::value_parser!(i64).range(0..=4))]
        priority: Option<i64>,

        #[arg(long, short)]
        estimate: Option<i64>,

        /// Parent issue (key or ID)
        #[arg(long, conflicts_with = "no_parent")]
        parent: Option<String>,

        /// Clear the parent
        #[arg(long)]
        no_parent: bool,

        /// Label name(s) to attach
        #[arg(long, value_delimiter = ',')]
        add_label: Vec<String>,

        /// Label name(s) to detach
        #[arg(long, value_delimiter = ',')]
        remove_label: Vec<String>,
    },

    /// Show issue details
    #[command(arg_required_else_help = true)]
    Show {
        /// Issue key or ID
        issue: String,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Show an issue's change history
    #[command(arg_required_else_help = true)]
    History {
        /// Issue key or ID
        issue: String,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Subscribe to an issue's notifications
    #[command(arg_required_else_help = true)]
    Subscribe {
        /// Issue key or ID
        issue: String,

        /// User to subscribe (defaults to the acting user)
        #[arg(long, short)]
        user: Option<String>,
    },

    /// Unsubscribe from an issue's notifications
    #[command(arg_required_else_help = true)]
    Unsubscribe {
        /// Issue key or ID
        issue: String,

        /// User to unsubscribe (defaults to the acting user)
        #[arg(long, short)]
        user: Option<String>,
    },

    /// Link an external URL to an issue
    #[command(
        arg_required_else_help = true,
        after_help = "\
Examples:
  tally link ENG-1 https://github.com/org/repo/issues/9
  tally link ENG-1 https://slack.com/archives/C1/p2 --meta type=slack"
    )]
    Link {
        /// Issue key or ID
        issue: String,

        /// External URL
        #[arg(value_parser = non_empty_string)]
        url: String,

        /// Source metadata (key=value, repeated)
        #[arg(long = "meta", value_name = "KEY=VALUE")]
        meta: Vec<String>,
    },

    /// Check whether a URL is already linked to an issue
    #[command(arg_required_else_help = true)]
    CheckLink {
        /// External URL
        url: String,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Move an issue to another team
    #[command(arg_required_else_help = true)]
    Move {
        /// Issue key or ID
        issue: String,

        /// Destination team identifier
        team: String,
    },

    /// Comment on an issue
    #[command(arg_required_else_help = true)]
    Comment {
        /// Issue key or ID
        issue: String,

        /// Comment text
        #[arg(value_parser = non_empty_string)]
        body: String,
    },

    /// Inspect the background job queue
    #[command(subcommand)]
    Queue(QueueCommand),

    /// Show a workspace settings section (overview, labels, members)
    Settings {
        /// Section key
        #[arg(default_value = "overview")]
        section: String,
    },

    /// List the model names known to the tracker
    Models,
}

/// Team commands.
#[derive(Subcommand)]
pub enum TeamCommand {
    /// Create a team with the default workflow states
    #[command(arg_required_else_help = true)]
    Add {
        /// Short identifier used in issue keys, e.g. ENG
        identifier: String,

        /// Display name (defaults to the identifier)
        name: Option<String>,
    },
    /// List teams
    List {
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },
    /// List a team's workflow states
    States {
        identifier: String,
    },
    /// Retire a workflow state; issues already in it keep it
    #[command(arg_required_else_help = true)]
    RemoveState {
        identifier: String,

        /// State name or ID
        state: String,
    },
}

/// Label commands.
#[derive(Subcommand)]
pub enum LabelCommand {
    /// Create a label
    #[command(arg_required_else_help = true)]
    Add {
        #[arg(value_parser = non_empty_string)]
        name: String,
    },
    /// List labels
    List {
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },
}

/// Member commands.
#[derive(Subcommand)]
pub enum MemberCommand {
    /// Add a user to the workspace (or change their role)
    #[command(arg_required_else_help = true)]
    Add {
        #[arg(value_parser = non_empty_string)]
        user: String,

        #[arg(long, short, default_value = "member")]
        role: String,
    },
    /// List members
    List {
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },
}

/// Job queue commands.
#[derive(Subcommand)]
pub enum QueueCommand {
    /// Print queued jobs, oldest first
    List {
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },
    /// Drop queued jobs
    Clear {
        /// Drop only the first N jobs
        #[arg(long, short = 'n')]
        count: Option<usize>,
    },
}

#[cfg(test)]
#[path = "../cli_tests.rs"]
mod tests;
