// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use chrono::TimeZone;
use std::cell::Cell;

#[test]
fn test_generate_id_format() {
    let created_at = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
    let id = generate_id("iss", "Test issue", &created_at);
    assert!(id.starts_with("iss_"));
    assert_eq!(id.len(), 20); // iss_ + 16 hex chars
    assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_generate_id_distinct_for_same_input() {
    let created_at = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
    let a = generate_id("iss", "Same", &created_at);
    let b = generate_id("iss", "Same", &created_at);
    assert_ne!(a, b);
}

#[test]
fn test_generate_unique_id_retries_on_collision() {
    let attempts = Cell::new(0);
    let id = generate_unique_id("team", "Eng", &Utc::now(), |_| {
        attempts.set(attempts.get() + 1);
        Ok(attempts.get() < 3)
    })
    .unwrap();
    assert_eq!(attempts.get(), 3);
    assert!(id.starts_with("team_"));
}

#[test]
fn test_generate_unique_id_propagates_lookup_error() {
    let err = generate_unique_id("iss", "Broken", &Utc::now(), |_| {
        Err(crate::error::Error::CorruptedData("lookup failed".to_string()))
    })
    .unwrap_err();
    assert!(err.to_string().contains("lookup failed"));
}
