// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::HashMap;

use tally_core::{
    FieldChange, FieldValue, Issue, IssueComment, IssueHistory, Job, LinkedIssue, SourceMetadata,
};

/// Maximum line width for wrapped text content (excluding 4-space indent).
const WRAP_WIDTH: usize = 96;

/// Display names for stored IDs (states, teams), keyed by ID.
pub type Names = HashMap<String, String>;

/// Wrap text at word boundaries if it's a single line.
///
/// Multi-line content is returned as-is to preserve user formatting.
pub fn wrap_text(content: &str, width: usize) -> String {
    if content.contains('\n') || content.len() <= width {
        return content.to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in content.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

/// Format a single issue line for list output
pub fn format_issue_line(key: &str, state: &str, issue: &Issue) -> String {
    let state_display = match &issue.assignee_id {
        Some(assignee) => format!("{}, @{}", state, assignee),
        None => state.to_string(),
    };
    format!("- [{}] {}: {}", state_display, key, issue.title)
}

/// What `show` prints about an issue.
pub struct IssueDetails<'a> {
    pub key: &'a str,
    pub state: &'a str,
    pub issue: &'a Issue,
    pub parent_key: Option<&'a str>,
    pub labels: &'a [String],
    pub links: &'a [LinkedIssue],
    pub comments: &'a [IssueComment],
}

/// Format issue details for show command
pub fn format_issue_details(details: &IssueDetails<'_>) -> String {
    let issue = details.issue;
    let mut output = vec![
        format!("{} {}", details.key, issue.title),
        format!("State: {}", details.state),
    ];

    if let Some(assignee) = &issue.assignee_id {
        output.push(format!("Assignee: {}", assignee));
    }
    if let Some(priority) = issue.priority {
        output.push(format!("Priority: {}", priority_label(priority)));
    }
    if let Some(estimate) = issue.estimate {
        output.push(format!("Estimate: {}", estimate));
    }
    if let Some(parent) = details.parent_key {
        output.push(format!("Parent: {}", parent));
    }
    if !details.labels.is_empty() {
        output.push(format!("Labels: {}", details.labels.join(", ")));
    }
    if !issue.subscriber_ids.is_empty() {
        output.push(format!("Subscribers: {}", issue.subscriber_ids.join(", ")));
    }
    if let Some(creator) = &issue.created_by_id {
        output.push(format!("Created by: {}", creator));
    }
    output.push(format!(
        "Created: {}",
        issue.created_at.format("%Y-%m-%d %H:%M")
    ));
    output.push(format!(
        "Updated: {}",
        issue.updated_at.format("%Y-%m-%d %H:%M")
    ));
    if let Some(metadata) = &issue.source_metadata {
        output.push(format!("Source: {}", format_metadata(metadata)));
    }

    if let Some(description) = issue.description.as_deref().filter(|d| !d.trim().is_empty()) {
        output.push(String::new());
        output.push("Description:".to_string());
        for line in wrap_text(description, WRAP_WIDTH).lines() {
            output.push(format!("    {}", line));
        }
    }

    if !details.links.is_empty() {
        output.push(String::new());
        output.push("Links:".to_string());
        for link in details.links {
            output.push(format_link(link));
        }
    }

    if !details.comments.is_empty() {
        output.push(String::new());
        output.push("Comments:".to_string());
        for (i, comment) in details.comments.iter().enumerate() {
            if i > 0 {
                output.push(String::new());
            }
            output.extend(format_comment(comment));
        }
    }

    output.join("\n")
}

/// Priority number as shown to users.
pub fn priority_label(priority: i64) -> String {
    match priority {
        0 => "none".to_string(),
        1 => "urgent".to_string(),
        2 => "high".to_string(),
        3 => "medium".to_string(),
        4 => "low".to_string(),
        n => n.to_string(),
    }
}

/// `key=value` pairs, comma-separated, in key order.
pub fn format_metadata(metadata: &SourceMetadata) -> String {
    metadata
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_link(link: &LinkedIssue) -> String {
    match &link.source_metadata {
        Some(metadata) if !metadata.is_empty() => {
            format!("  - {} ({})", link.url, format_metadata(metadata))
        }
        _ => format!("  - {}", link.url),
    }
}

fn format_comment(comment: &IssueComment) -> Vec<String> {
    let mut lines = vec![format!(
        "  {}  {}",
        comment.created_at.format("%Y-%m-%d %H:%M"),
        comment.user_id
    )];
    for line in wrap_text(&comment.body, WRAP_WIDTH).lines() {
        lines.push(format!("    {}", line));
    }
    lines
}

fn format_value(value: Option<&FieldValue>, names: &Names) -> String {
    match value {
        None => "none".to_string(),
        Some(FieldValue::Id(id)) => names.get(id).cloned().unwrap_or_else(|| id.clone()),
        Some(FieldValue::Number(n)) => n.to_string(),
    }
}

/// Format one history row: timestamp, author and each change.
///
/// ```text
///   2024-01-10 10:30  alice
///     state_id: Backlog -> Todo
///     +label bug
/// ```
pub fn format_history_entry(entry: &IssueHistory, names: &Names) -> Vec<String> {
    let mut lines = vec![format!(
        "  {}  {}",
        entry.created_at.format("%Y-%m-%d %H:%M"),
        entry.user_id.as_deref().unwrap_or("-")
    )];

    for (field, change) in &entry.data.changes {
        let line = match change {
            FieldChange::Initial { to } => {
                format!("    {}: {}", field, format_value(to.as_ref(), names))
            }
            FieldChange::Changed { from, to } => format!(
                "    {}: {} -> {}",
                field,
                format_value(from.as_ref(), names),
                format_value(to.as_ref(), names)
            ),
        };
        lines.push(line);
    }
    for id in &entry.data.added_label_ids {
        lines.push(format!("    +label {}", names.get(id).unwrap_or(id)));
    }
    for id in &entry.data.removed_label_ids {
        lines.push(format!("    -label {}", names.get(id).unwrap_or(id)));
    }
    lines
}

/// Format a queued job for `queue list`.
pub fn format_job(index: usize, job: &Job) -> String {
    let detail = match job {
        Job::Notification {
            event,
            actor_id,
            payload,
        } => format!(
            "{} by {} to [{}]",
            event,
            actor_id.as_deref().unwrap_or("-"),
            payload.subscriber_ids.join(", ")
        ),
        Job::VectorIndex { .. } => String::new(),
        Job::Triage { resend, .. } => format!("resend={}", resend),
    };
    let line = format!("{:>3}  {:<13} {}", index + 1, job.kind(), job.issue_id());
    if detail.is_empty() {
        line
    } else {
        format!("{}  {}", line, detail)
    }
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
