// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Issue change-sets.
//!
//! [`issue_diff`] compares two snapshots of an issue and produces a sparse
//! [`IssueHistoryData`]: one [`FieldChange`] per tracked field whose value
//! changed, plus the labels added and removed.
//!
//! On the wire the record keeps its flat shape (`fromStateId`, `toStateId`,
//! `addedLabelIds`, ...) so stored rows stay readable by other clients.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::issue::{FieldValue, Issue, TrackedField};

const ADDED_LABELS_KEY: &str = "addedLabelIds";
const REMOVED_LABELS_KEY: &str = "removedLabelIds";

/// How a single tracked field moved between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    /// The issue was created; there is no previous value.
    Initial { to: Option<FieldValue> },
    /// The value changed from `from` to `to`.
    Changed {
        from: Option<FieldValue>,
        to: Option<FieldValue>,
    },
}

impl FieldChange {
    /// The previous value, if the change has one.
    pub fn from(&self) -> Option<&FieldValue> {
        match self {
            FieldChange::Initial { .. } => None,
            FieldChange::Changed { from, .. } => from.as_ref(),
        }
    }

    /// The new value.
    pub fn to(&self) -> Option<&FieldValue> {
        match self {
            FieldChange::Initial { to } | FieldChange::Changed { to, .. } => to.as_ref(),
        }
    }
}

/// Sparse record of what changed on an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueHistoryData {
    /// Changed tracked fields only.
    pub changes: BTreeMap<TrackedField, FieldChange>,
    pub added_label_ids: Vec<String>,
    pub removed_label_ids: Vec<String>,
}

impl IssueHistoryData {
    /// Returns the change recorded for a field.
    pub fn change(&self, field: TrackedField) -> Option<&FieldChange> {
        self.changes.get(&field)
    }

    /// Returns true if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
            && self.added_label_ids.is_empty()
            && self.removed_label_ids.is_empty()
    }
}

/// Computes the change-set from `old` to `new`.
///
/// With no previous snapshot every tracked field is reported as
/// [`FieldChange::Initial`] and every label as added.
pub fn issue_diff(new: &Issue, old: Option<&Issue>) -> IssueHistoryData {
    let mut data = IssueHistoryData::default();

    match old {
        Some(old) => {
            for field in TrackedField::ALL {
                let from = old.tracked_value(field);
                let to = new.tracked_value(field);
                if from != to {
                    data.changes.insert(field, FieldChange::Changed { from, to });
                }
            }
            data.added_label_ids = difference(&new.label_ids, &old.label_ids);
            data.removed_label_ids = difference(&old.label_ids, &new.label_ids);
        }
        None => {
            for field in TrackedField::ALL {
                data.changes.insert(
                    field,
                    FieldChange::Initial {
                        to: new.tracked_value(field),
                    },
                );
            }
            data.added_label_ids = difference(&new.label_ids, &[]);
        }
    }

    data
}

/// Elements of `a` missing from `b`, deduplicated, in `a`'s order.
fn difference(a: &[String], b: &[String]) -> Vec<String> {
    let exclude: HashSet<&str> = b.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    a.iter()
        .filter(|id| !exclude.contains(id.as_str()) && seen.insert(id.as_str()))
        .cloned()
        .collect()
}

impl Serialize for IssueHistoryData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let from_count = self
            .changes
            .values()
            .filter(|c| matches!(c, FieldChange::Changed { .. }))
            .count();
        let mut map = serializer.serialize_map(Some(self.changes.len() + from_count + 2))?;
        for (field, change) in &self.changes {
            if let FieldChange::Changed { from, .. } = change {
                map.serialize_entry(field.from_key(), from)?;
            }
            map.serialize_entry(field.to_key(), &change.to())?;
        }
        map.serialize_entry(ADDED_LABELS_KEY, &self.added_label_ids)?;
        map.serialize_entry(REMOVED_LABELS_KEY, &self.removed_label_ids)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for IssueHistoryData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;

        let mut froms: BTreeMap<TrackedField, Option<FieldValue>> = BTreeMap::new();
        let mut tos: BTreeMap<TrackedField, Option<FieldValue>> = BTreeMap::new();
        let mut data = IssueHistoryData::default();

        for (key, value) in raw {
            match key.as_str() {
                ADDED_LABELS_KEY => {
                    data.added_label_ids = Option::<Vec<String>>::deserialize(value)
                        .map_err(de::Error::custom)?
                        .unwrap_or_default();
                }
                REMOVED_LABELS_KEY => {
                    data.removed_label_ids = Option::<Vec<String>>::deserialize(value)
                        .map_err(de::Error::custom)?
                        .unwrap_or_default();
                }
                other => {
                    let Some((field, is_from)) = TrackedField::from_wire_key(other) else {
                        continue;
                    };
                    let value =
                        Option::<FieldValue>::deserialize(value).map_err(de::Error::custom)?;
                    if is_from {
                        froms.insert(field, value);
                    } else {
                        tos.insert(field, value);
                    }
                }
            }
        }

        for field in TrackedField::ALL {
            let to = tos.remove(&field);
            let change = match (froms.remove(&field), to) {
                (Some(from), to) => FieldChange::Changed {
                    from,
                    to: to.flatten(),
                },
                (None, Some(to)) => FieldChange::Initial { to },
                (None, None) => continue,
            };
            data.changes.insert(field, change);
        }

        Ok(data)
    }
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;
