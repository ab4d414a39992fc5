// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    issue = { "Issue", Model::Issue },
    issue_lower = { "issue", Model::Issue },
    linked = { "LinkedIssue", Model::LinkedIssue },
    members = { "UsersOnWorkspaces", Model::UsersOnWorkspaces },
    template = { "TEMPLATE", Model::Template },
)]
fn model_from_str_valid(input: &str, expected: Model) {
    assert_eq!(input.parse::<Model>().unwrap(), expected);
}

#[test]
fn model_from_str_invalid() {
    assert!("Nope".parse::<Model>().is_err());
    assert!("".parse::<Model>().is_err());
}

#[test]
fn model_names_are_unique_and_round_trip() {
    let mut seen = std::collections::HashSet::new();
    for model in Model::ALL {
        assert!(seen.insert(model.as_str()), "duplicate {}", model);
        assert_eq!(model.as_str().parse::<Model>().unwrap(), model);
    }
    assert_eq!(seen.len(), 22);
}

#[parameterized(
    workspace = { Model::Workspace, false },
    label = { Model::Label, false },
    workflow = { Model::Workflow, true },
    issue = { Model::Issue, true },
    cycle = { Model::Cycle, true },
)]
fn model_team_scope(model: Model, expected: bool) {
    assert_eq!(model.is_team_scoped(), expected);
}

#[parameterized(
    overview = { "overview", SettingsSection::Overview },
    labels = { "labels", SettingsSection::Labels },
    members_upper = { "MEMBERS", SettingsSection::Members },
)]
fn settings_section_lookup(key: &str, expected: SettingsSection) {
    assert_eq!(SettingsSection::lookup(key), Some(expected));
    assert_eq!(key.parse::<SettingsSection>().unwrap(), expected);
}

#[test]
fn settings_section_unknown_key() {
    assert_eq!(SettingsSection::lookup("billing"), None);
    let err = "billing".parse::<SettingsSection>().unwrap_err();
    assert!(err.to_string().contains("overview, labels, members"));
}

#[test]
fn settings_sections_in_display_order() {
    let keys: Vec<_> = SETTINGS_SECTIONS.iter().map(|s| s.key()).collect();
    assert_eq!(keys, vec!["overview", "labels", "members"]);
}
