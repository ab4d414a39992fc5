// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed database for tracker storage.
//!
//! The [`Database`] struct provides data access for workspaces, teams,
//! workflow states, labels, members, issues, history, comments and links.

mod issues;
mod links;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::Model;
use crate::workflow::Workflow;
use crate::workspace::{Label, Member, Team, Workspace};

/// SQL schema for the tracker database.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS workspaces (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS teams (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    identifier TEXT NOT NULL,
    workspace_id TEXT NOT NULL,
    created_at TEXT NOT NULL,
    UNIQUE (workspace_id, identifier),
    FOREIGN KEY (workspace_id) REFERENCES workspaces(id)
);

-- Workflow states; deleted_at marks soft deletion
CREATE TABLE IF NOT EXISTS workflows (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    category TEXT NOT NULL,
    team_id TEXT NOT NULL,
    position INTEGER NOT NULL DEFAULT 0,
    deleted_at TEXT,
    FOREIGN KEY (team_id) REFERENCES teams(id)
);

CREATE TABLE IF NOT EXISTS labels (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    workspace_id TEXT NOT NULL,
    UNIQUE (workspace_id, name),
    FOREIGN KEY (workspace_id) REFERENCES workspaces(id)
);

CREATE TABLE IF NOT EXISTS members (
    user_id TEXT NOT NULL,
    workspace_id TEXT NOT NULL,
    role TEXT NOT NULL,
    PRIMARY KEY (user_id, workspace_id),
    FOREIGN KEY (workspace_id) REFERENCES workspaces(id)
);

-- label_ids, subscriber_ids and source_metadata are JSON
CREATE TABLE IF NOT EXISTS issues (
    id TEXT PRIMARY KEY,
    number INTEGER NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    team_id TEXT NOT NULL,
    state_id TEXT NOT NULL,
    assignee_id TEXT,
    priority INTEGER,
    parent_id TEXT,
    estimate INTEGER,
    label_ids TEXT NOT NULL DEFAULT '[]',
    subscriber_ids TEXT NOT NULL DEFAULT '[]',
    created_by_id TEXT,
    source_metadata TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (team_id, number),
    FOREIGN KEY (team_id) REFERENCES teams(id),
    FOREIGN KEY (state_id) REFERENCES workflows(id),
    FOREIGN KEY (parent_id) REFERENCES issues(id)
);

CREATE TABLE IF NOT EXISTS issue_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    issue_id TEXT NOT NULL,
    user_id TEXT,
    data TEXT NOT NULL,
    created_at TEXT NOT NULL,
    FOREIGN KEY (issue_id) REFERENCES issues(id)
);

CREATE TABLE IF NOT EXISTS issue_comments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    issue_id TEXT NOT NULL,
    user_id TEXT NOT NULL,
    body TEXT NOT NULL,
    created_at TEXT NOT NULL,
    FOREIGN KEY (issue_id) REFERENCES issues(id)
);

-- One issue per external URL
CREATE TABLE IF NOT EXISTS linked_issues (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    issue_id TEXT NOT NULL,
    url TEXT NOT NULL UNIQUE,
    source_metadata TEXT,
    created_at TEXT NOT NULL,
    FOREIGN KEY (issue_id) REFERENCES issues(id)
);

CREATE INDEX IF NOT EXISTS idx_teams_workspace ON teams(workspace_id);
CREATE INDEX IF NOT EXISTS idx_workflows_team ON workflows(team_id);
CREATE INDEX IF NOT EXISTS idx_issues_team ON issues(team_id);
CREATE INDEX IF NOT EXISTS idx_issues_state ON issues(state_id);
CREATE INDEX IF NOT EXISTS idx_history_issue ON issue_history(issue_id);
CREATE INDEX IF NOT EXISTS idx_comments_issue ON issue_comments(issue_id);
CREATE INDEX IF NOT EXISTS idx_links_issue ON linked_issues(issue_id);
"#;

/// Parse a string value from the database, returning a rusqlite error on parse failure.
fn parse_db<T: std::str::FromStr>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    value.parse().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(Error::CorruptedData(format!(
                "invalid value '{value}' in column '{column}'"
            ))),
        )
    })
}

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(Error::CorruptedData(format!(
                    "invalid timestamp '{value}' in column '{column}'"
                ))),
            )
        })
}

/// Parse a JSON column from the database.
fn parse_json<T: DeserializeOwned>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    serde_json::from_str(value).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(Error::CorruptedData(format!(
                "invalid JSON in column '{column}'"
            ))),
        )
    })
}

/// Check if a rusqlite error is a UNIQUE constraint violation.
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _) => {
            sqlite_err.code == rusqlite::ErrorCode::ConstraintViolation
                && sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        }
        _ => false,
    }
}

/// Create the schema on a database connection.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Map a row to a Workflow.
///
/// Expected columns: id, name, category, team_id, position, deleted_at
fn row_to_workflow(row: &rusqlite::Row) -> rusqlite::Result<Workflow> {
    let category_str: String = row.get(2)?;
    let deleted_str: Option<String> = row.get(5)?;
    Ok(Workflow {
        id: row.get(0)?,
        name: row.get(1)?,
        category: parse_db(&category_str, "category")?,
        team_id: row.get(3)?,
        position: row.get(4)?,
        deleted_at: deleted_str
            .map(|s| parse_timestamp(&s, "deleted_at"))
            .transpose()?,
    })
}

/// Map a row to a Team.
///
/// Expected columns: id, name, identifier, workspace_id, created_at
fn row_to_team(row: &rusqlite::Row) -> rusqlite::Result<Team> {
    let created_str: String = row.get(4)?;
    Ok(Team {
        id: row.get(0)?,
        name: row.get(1)?,
        identifier: row.get(2)?,
        workspace_id: row.get(3)?,
        created_at: parse_timestamp(&created_str, "created_at")?,
    })
}

/// SQLite database connection with tracker operations.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        let db = Database { conn };
        run_migrations(&db.conn)?;
        tracing::debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Begin a transaction that holds the write lock from its first statement.
    ///
    /// Reads inside it see every row other connections have committed, so a
    /// `MAX(...) + 1` computed under it cannot be claimed by another writer.
    pub fn begin_immediate(&self) -> Result<Transaction<'_>> {
        Ok(Transaction::new_unchecked(
            &self.conn,
            TransactionBehavior::Immediate,
        )?)
    }

    /// Create a new workspace.
    pub fn create_workspace(&self, workspace: &Workspace) -> Result<()> {
        self.conn.execute(
            "INSERT INTO workspaces (id, name, slug, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                workspace.id,
                workspace.name,
                workspace.slug,
                workspace.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Get a workspace by ID.
    pub fn get_workspace(&self, id: &str) -> Result<Workspace> {
        let workspace = self
            .conn
            .query_row(
                "SELECT id, name, slug, created_at FROM workspaces WHERE id = ?1",
                params![id],
                |row| {
                    let created_str: String = row.get(3)?;
                    Ok(Workspace {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        slug: row.get(2)?,
                        created_at: parse_timestamp(&created_str, "created_at")?,
                    })
                },
            )
            .optional()?;

        workspace.ok_or_else(|| Error::not_found(Model::Workspace, id))
    }

    /// Create a new team.
    pub fn create_team(&self, team: &Team) -> Result<()> {
        self.conn.execute(
            "INSERT INTO teams (id, name, identifier, workspace_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                team.id,
                team.name,
                team.identifier,
                team.workspace_id,
                team.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Get a team by ID.
    pub fn get_team(&self, id: &str) -> Result<Team> {
        let team = self
            .conn
            .query_row(
                "SELECT id, name, identifier, workspace_id, created_at FROM teams WHERE id = ?1",
                params![id],
                row_to_team,
            )
            .optional()?;

        team.ok_or_else(|| Error::not_found(Model::Team, id))
    }

    /// Get a team by its identifier within a workspace (case-insensitive).
    pub fn get_team_by_identifier(&self, workspace_id: &str, identifier: &str) -> Result<Team> {
        let team = self
            .conn
            .query_row(
                "SELECT id, name, identifier, workspace_id, created_at FROM teams
                 WHERE workspace_id = ?1 AND identifier = ?2 COLLATE NOCASE",
                params![workspace_id, identifier],
                row_to_team,
            )
            .optional()?;

        team.ok_or_else(|| Error::not_found(Model::Team, identifier))
    }

    /// List the teams of a workspace, ordered by identifier.
    pub fn list_teams(&self, workspace_id: &str) -> Result<Vec<Team>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, identifier, workspace_id, created_at FROM teams
             WHERE workspace_id = ?1 ORDER BY identifier",
        )?;

        let teams = stmt
            .query_map(params![workspace_id], row_to_team)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(teams)
    }

    /// Create a workflow state.
    pub fn create_workflow(&self, workflow: &Workflow) -> Result<()> {
        self.conn.execute(
            "INSERT INTO workflows (id, name, category, team_id, position, deleted_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                workflow.id,
                workflow.name,
                workflow.category.as_str(),
                workflow.team_id,
                workflow.position,
                workflow.deleted_at.map(|d| d.to_rfc3339()),
            ],
        )?;
        Ok(())
    }

    /// Get a workflow state by ID, including soft-deleted ones.
    pub fn get_workflow(&self, id: &str) -> Result<Workflow> {
        let workflow = self
            .conn
            .query_row(
                "SELECT id, name, category, team_id, position, deleted_at
                 FROM workflows WHERE id = ?1",
                params![id],
                row_to_workflow,
            )
            .optional()?;

        workflow.ok_or_else(|| Error::not_found(Model::Workflow, id))
    }

    /// List a team's live workflow states in position order.
    pub fn list_workflows(&self, team_id: &str) -> Result<Vec<Workflow>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, category, team_id, position, deleted_at
             FROM workflows WHERE team_id = ?1 AND deleted_at IS NULL
             ORDER BY position, name",
        )?;

        let workflows = stmt
            .query_map(params![team_id], row_to_workflow)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(workflows)
    }

    /// Soft-delete a workflow state.
    pub fn delete_workflow(&self, id: &str) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE workflows SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
            params![Utc::now().to_rfc3339(), id],
        )?;

        if affected == 0 {
            return Err(Error::not_found(Model::Workflow, id));
        }
        Ok(())
    }

    /// Create a label.
    pub fn create_label(&self, label: &Label) -> Result<()> {
        self.conn.execute(
            "INSERT INTO labels (id, name, workspace_id) VALUES (?1, ?2, ?3)",
            params![label.id, label.name, label.workspace_id],
        )?;
        Ok(())
    }

    /// List the labels of a workspace, ordered by name.
    pub fn list_labels(&self, workspace_id: &str) -> Result<Vec<Label>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, workspace_id FROM labels WHERE workspace_id = ?1 ORDER BY name",
        )?;

        let labels = stmt
            .query_map(params![workspace_id], |row| {
                Ok(Label {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    workspace_id: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(labels)
    }

    /// Add or update a workspace member.
    pub fn add_member(&self, member: &Member) -> Result<()> {
        self.conn.execute(
            "INSERT INTO members (user_id, workspace_id, role) VALUES (?1, ?2, ?3)
             ON CONFLICT (user_id, workspace_id) DO UPDATE SET role = excluded.role",
            params![member.user_id, member.workspace_id, member.role],
        )?;
        Ok(())
    }

    /// List the members of a workspace, ordered by user ID.
    pub fn list_members(&self, workspace_id: &str) -> Result<Vec<Member>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, workspace_id, role FROM members
             WHERE workspace_id = ?1 ORDER BY user_id",
        )?;

        let members = stmt
            .query_map(params![workspace_id], |row| {
                Ok(Member {
                    user_id: row.get(0)?,
                    workspace_id: row.get(1)?,
                    role: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(members)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
