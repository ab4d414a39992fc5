// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Record ID generation.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate an ID from a kind tag, a seed, and a timestamp.
/// Format: {kind}_{hash} where hash is the first 16 hex chars of SHA256(seed + timestamp + counter).
///
/// The process-wide counter keeps IDs distinct when the same seed is used
/// twice within one timestamp tick.
pub fn generate_id(kind: &str, seed: &str, created_at: &DateTime<Utc>) -> String {
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let input = format!("{}{}{}{}", seed, created_at.to_rfc3339(), n, std::process::id());
    let hash = Sha256::digest(input.as_bytes());
    format!("{}_{}", kind, hex::encode(&hash[..8]))
}

/// Generate an ID that does not collide with an existing one.
///
/// Errors from the `exists` check are returned as is.
pub fn generate_unique_id<F>(
    kind: &str,
    seed: &str,
    created_at: &DateTime<Utc>,
    mut exists: F,
) -> Result<String>
where
    F: FnMut(&str) -> Result<bool>,
{
    loop {
        let id = generate_id(kind, seed, created_at);
        if !exists(&id)? {
            return Ok(id);
        }
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
