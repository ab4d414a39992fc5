// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Linked issue database operations.

use rusqlite::{params, OptionalExtension};

use super::{is_unique_violation, parse_json, parse_timestamp, Database};
use crate::error::{Error, Result};
use crate::link::LinkedIssue;
use crate::lookup::find_existing_link;

/// Map a row to a LinkedIssue.
///
/// Expected columns: id, issue_id, url, source_metadata, created_at
fn row_to_link(row: &rusqlite::Row) -> rusqlite::Result<LinkedIssue> {
    let metadata_str: Option<String> = row.get(3)?;
    let created_str: String = row.get(4)?;
    Ok(LinkedIssue {
        id: row.get(0)?,
        issue_id: row.get(1)?,
        url: row.get(2)?,
        source_metadata: metadata_str
            .map(|s| parse_json(&s, "source_metadata"))
            .transpose()?,
        created_at: parse_timestamp(&created_str, "created_at")?,
    })
}

impl Database {
    /// Attach a URL to an issue, returning the row ID.
    ///
    /// A URL may be linked once; a second insert fails with
    /// [`Error::DuplicateLink`].
    pub fn add_linked_issue(&self, link: &LinkedIssue) -> Result<i64> {
        let metadata = link
            .source_metadata
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let result = self.conn.execute(
            "INSERT INTO linked_issues (issue_id, url, source_metadata, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                link.issue_id,
                link.url,
                metadata,
                link.created_at.to_rfc3339()
            ],
        );

        match result {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(e) if is_unique_violation(&e) => {
                let check = find_existing_link(self, &link.url)?;
                Err(Error::DuplicateLink(check.message.unwrap_or_else(|| {
                    format!("This {} has already been linked to an issue", link.url)
                })))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Find the link for a URL, if any issue has claimed it.
    pub fn find_linked_issue_by_url(&self, url: &str) -> Result<Option<LinkedIssue>> {
        let link = self
            .conn
            .query_row(
                "SELECT id, issue_id, url, source_metadata, created_at
                 FROM linked_issues WHERE url = ?1",
                params![url],
                row_to_link,
            )
            .optional()?;
        Ok(link)
    }

    /// Get all links attached to an issue, oldest first.
    pub fn get_linked_issues(&self, issue_id: &str) -> Result<Vec<LinkedIssue>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, issue_id, url, source_metadata, created_at
             FROM linked_issues WHERE issue_id = ?1 ORDER BY id",
        )?;

        let links = stmt
            .query_map(params![issue_id], row_to_link)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(links)
    }
}

#[cfg(test)]
#[path = "links_tests.rs"]
mod tests;
