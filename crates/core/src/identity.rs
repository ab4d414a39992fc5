// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Resolution of the acting user.
//!
//! Every mutation is attributed to a user ID: it becomes the issue creator,
//! the history author and the notification actor.

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;

/// Environment variable that overrides the configured user.
pub const USER_ENV: &str = "TALLY_USER";

/// User ID used when nothing else is available.
pub const ANONYMOUS: &str = "anonymous";

/// Returns the acting user ID.
///
/// Resolution order:
/// 1. `TALLY_USER`
/// 2. the configured user
/// 3. Unix username from USER or LOGNAME (if not a system account)
/// 4. `anonymous`
pub fn resolve_user(configured: Option<&str>) -> String {
    if let Some(user) = env_non_empty(USER_ENV) {
        return user;
    }

    if let Some(user) = configured.map(str::trim).filter(|u| !u.is_empty()) {
        return user.to_string();
    }

    if let Some(name) = get_unix_username() {
        if !is_system_account(&name) {
            return name;
        }
    }

    ANONYMOUS.to_string()
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn get_unix_username() -> Option<String> {
    env_non_empty("USER").or_else(|| env_non_empty("LOGNAME"))
}

fn is_system_account(name: &str) -> bool {
    matches!(
        name.to_lowercase().as_str(),
        "root" | "system" | "administrator" | "admin" | "daemon" | "nobody"
    )
}
