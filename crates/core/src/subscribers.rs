// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Issue subscriber sets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// How a subscriber set is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscribeType {
    Subscribe,
    Unsubscribe,
}

impl SubscribeType {
    /// Returns the string representation used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscribeType::Subscribe => "SUBSCRIBE",
            SubscribeType::Unsubscribe => "UNSUBSCRIBE",
        }
    }
}

impl fmt::Display for SubscribeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SubscribeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "subscribe" => Ok(SubscribeType::Subscribe),
            "unsubscribe" => Ok(SubscribeType::Unsubscribe),
            _ => Err(Error::InvalidOperationKind(s.to_string())),
        }
    }
}

/// Applies a subscribe or unsubscribe to `current` and returns the new set.
///
/// Subscribing adds both the acting user and the assignee; unsubscribing
/// removes only the acting user. Missing or empty IDs are ignored. The result
/// is sorted, so it does not depend on the order of `current`.
pub fn update_subscribers(
    user_id: Option<&str>,
    assignee_id: Option<&str>,
    current: &[String],
    op: SubscribeType,
) -> Vec<String> {
    let mut subscribers: BTreeSet<String> = current.iter().cloned().collect();
    let present = |id: Option<&str>| id.filter(|s| !s.is_empty()).map(str::to_string);

    match op {
        SubscribeType::Unsubscribe => {
            if let Some(user) = present(user_id) {
                subscribers.remove(&user);
            }
        }
        SubscribeType::Subscribe => {
            subscribers.extend(present(user_id));
            subscribers.extend(present(assignee_id));
        }
    }

    subscribers.into_iter().collect()
}

#[cfg(test)]
#[path = "subscribers_tests.rs"]
mod tests;
