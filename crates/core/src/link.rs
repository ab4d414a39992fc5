// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! External links attached to issues.
//!
//! A [`LinkedIssue`] ties an issue to a URL in some other system (a GitHub
//! issue, a Slack thread, ...). Each URL may be linked to at most one issue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::issue::SourceMetadata;

/// An external URL attached to an issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedIssue {
    /// Database-assigned identifier.
    pub id: i64,
    /// The issue this link belongs to.
    pub issue_id: String,
    /// Full URL of the external resource.
    pub url: String,
    /// Metadata reported by the source integration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_metadata: Option<SourceMetadata>,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
}

impl LinkedIssue {
    /// Creates a new link with the current timestamp.
    pub fn new(issue_id: String, url: String) -> Self {
        LinkedIssue {
            id: 0, // Will be set by database
            issue_id,
            url,
            source_metadata: None,
            created_at: Utc::now(),
        }
    }
}

/// Outcome of checking whether a URL is already linked.
///
/// Mirrors an HTTP-style status so callers can surface it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCheck {
    /// 200 when the URL is free, 400 when it is already linked.
    pub status: u16,
    /// Explanation when the URL is already linked.
    pub message: Option<String>,
}

impl LinkCheck {
    pub const OK: u16 = 200;
    pub const CONFLICT: u16 = 400;

    /// The URL is not linked anywhere.
    pub fn ok() -> Self {
        LinkCheck {
            status: Self::OK,
            message: None,
        }
    }

    /// The URL is already linked to the issue with key `issue_key`.
    pub fn conflict(url: &str, issue_key: &str) -> Self {
        LinkCheck {
            status: Self::CONFLICT,
            message: Some(format!(
                "This {url} has already been linked to an issue {issue_key}"
            )),
        }
    }

    /// Returns true if the URL may be linked.
    pub fn is_ok(&self) -> bool {
        self.status == Self::OK
    }
}

#[cfg(test)]
#[path = "link_tests.rs"]
mod tests;
