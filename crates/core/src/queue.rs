// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Background job queues.
//!
//! Side effects of issue mutations (notifications, similarity indexing,
//! triage handling) are enqueued through the [`NotificationQueue`] and
//! [`IssueQueue`] traits. [`JobQueue`] implements both on top of a JSONL
//! file: one job per line, fsynced on every write.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::issue::{Issue, SourceMetadata};

/// What triggered a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationEventFrom {
    IssueCreated,
    IssueUpdated,
    IssueCommentCreated,
}

impl NotificationEventFrom {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationEventFrom::IssueCreated => "IssueCreated",
            NotificationEventFrom::IssueUpdated => "IssueUpdated",
            NotificationEventFrom::IssueCommentCreated => "IssueCommentCreated",
        }
    }
}

impl fmt::Display for NotificationEventFrom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationEventFrom {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "IssueCreated" => Ok(NotificationEventFrom::IssueCreated),
            "IssueUpdated" => Ok(NotificationEventFrom::IssueUpdated),
            "IssueCommentCreated" => Ok(NotificationEventFrom::IssueCommentCreated),
            _ => Err(Error::InvalidNotificationEvent(s.to_string())),
        }
    }
}

/// Data handed to the notification worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub issue_id: String,
    pub subscriber_ids: Vec<String>,
    pub to_state_id: Option<String>,
    pub to_priority: Option<i64>,
    pub to_assignee_id: Option<String>,
    pub source_metadata: Option<SourceMetadata>,
    pub workspace_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_comment_id: Option<i64>,
}

/// Enqueue interface of the notification worker.
pub trait NotificationQueue {
    fn add_to_notification(
        &self,
        event: NotificationEventFrom,
        actor_id: Option<&str>,
        payload: NotificationPayload,
    ) -> Result<()>;
}

/// Enqueue interface of the issue processing worker.
pub trait IssueQueue {
    /// Index an issue for similarity search.
    fn add_issue_to_vector(&self, issue: &Issue) -> Result<()>;

    /// Run triage handling for an issue. `resend` re-runs it for an issue
    /// that was already triaged.
    fn handle_triage_issue(&self, issue: &Issue, resend: bool) -> Result<()>;
}

/// A queued unit of background work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Job {
    Notification {
        event: NotificationEventFrom,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        actor_id: Option<String>,
        payload: NotificationPayload,
    },
    VectorIndex {
        issue_id: String,
    },
    Triage {
        issue_id: String,
        resend: bool,
    },
}

impl Job {
    /// Short name of the job kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Job::Notification { .. } => "notification",
            Job::VectorIndex { .. } => "vector_index",
            Job::Triage { .. } => "triage",
        }
    }

    /// The issue the job concerns.
    pub fn issue_id(&self) -> &str {
        match self {
            Job::Notification { payload, .. } => &payload.issue_id,
            Job::VectorIndex { issue_id } | Job::Triage { issue_id, .. } => issue_id,
        }
    }
}

/// File-backed queue of [`Job`]s.
pub struct JobQueue {
    path: PathBuf,
}

impl JobQueue {
    /// Create or open a job queue at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        OpenOptions::new().create(true).append(true).open(path)?;

        Ok(JobQueue {
            path: path.to_path_buf(),
        })
    }

    /// Append a job and sync it to disk.
    pub fn push(&self, job: &Job) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let json = serde_json::to_string(job)?;
        writeln!(file, "{}", json)?;
        file.sync_all()?;

        tracing::debug!(kind = job.kind(), issue_id = job.issue_id(), "job enqueued");
        Ok(())
    }

    /// Read all queued jobs without removing them.
    pub fn peek_all(&self) -> Result<Vec<Job>> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut jobs = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            jobs.push(serde_json::from_str(&line)?);
        }

        Ok(jobs)
    }

    /// Drop every queued job.
    pub fn clear(&self) -> Result<()> {
        File::create(&self.path)?;
        Ok(())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.peek_all()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Remove the first `count` jobs, as a worker does after handling them.
    pub fn remove_first(&self, count: usize) -> Result<()> {
        let jobs = self.peek_all()?;
        if count >= jobs.len() {
            return self.clear();
        }

        let mut file = File::create(&self.path)?;
        for job in &jobs[count..] {
            writeln!(file, "{}", serde_json::to_string(job)?)?;
        }
        file.sync_all()?;

        Ok(())
    }
}

impl NotificationQueue for JobQueue {
    fn add_to_notification(
        &self,
        event: NotificationEventFrom,
        actor_id: Option<&str>,
        payload: NotificationPayload,
    ) -> Result<()> {
        self.push(&Job::Notification {
            event,
            actor_id: actor_id.map(str::to_string),
            payload,
        })
    }
}

impl IssueQueue for JobQueue {
    fn add_issue_to_vector(&self, issue: &Issue) -> Result<()> {
        self.push(&Job::VectorIndex {
            issue_id: issue.id.clone(),
        })
    }

    fn handle_triage_issue(&self, issue: &Issue, resend: bool) -> Result<()> {
        self.push(&Job::Triage {
            issue_id: issue.id.clone(),
            resend,
        })
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
