// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[parameterized(
    both = { Some("u"), Some("a"), &["a", "u"] },
    user_only = { Some("u"), None, &["u"] },
    assignee_only = { None, Some("a"), &["a"] },
    empty_user = { Some(""), Some("a"), &["a"] },
    neither = { None, None, &[] },
    same_person = { Some("u"), Some("u"), &["u"] },
)]
fn subscribe_from_empty(user: Option<&str>, assignee: Option<&str>, expected: &[&str]) {
    let result = update_subscribers(user, assignee, &[], SubscribeType::Subscribe);
    assert_eq!(result, ids(expected));
}

#[test]
fn subscribe_keeps_existing_members() {
    let current = ids(&["zed", "bob"]);
    let result = update_subscribers(Some("alice"), None, &current, SubscribeType::Subscribe);
    assert_eq!(result, ids(&["alice", "bob", "zed"]));
}

#[test]
fn unsubscribe_removes_only_user() {
    let current = ids(&["u", "v"]);
    let result = update_subscribers(Some("u"), Some("v"), &current, SubscribeType::Unsubscribe);
    assert_eq!(result, ids(&["v"]));
}

#[test]
fn unsubscribe_missing_user_is_noop() {
    let current = ids(&["v"]);
    let result = update_subscribers(Some("u"), None, &current, SubscribeType::Unsubscribe);
    assert_eq!(result, ids(&["v"]));
}

#[test]
fn result_is_independent_of_input_order() {
    let a = update_subscribers(Some("x"), None, &ids(&["c", "a", "b"]), SubscribeType::Subscribe);
    let b = update_subscribers(Some("x"), None, &ids(&["b", "c", "a"]), SubscribeType::Subscribe);
    assert_eq!(a, b);
}

#[test]
fn duplicates_in_input_collapse() {
    let result = update_subscribers(None, None, &ids(&["a", "a"]), SubscribeType::Subscribe);
    assert_eq!(result, ids(&["a"]));
}

#[parameterized(
    subscribe = { "subscribe", SubscribeType::Subscribe },
    subscribe_upper = { "SUBSCRIBE", SubscribeType::Subscribe },
    unsubscribe = { "UNSUBSCRIBE", SubscribeType::Unsubscribe },
)]
fn subscribe_type_from_str_valid(input: &str, expected: SubscribeType) {
    assert_eq!(input.parse::<SubscribeType>().unwrap(), expected);
}

#[parameterized(
    toggle = { "toggle" },
    empty = { "" },
)]
fn subscribe_type_from_str_invalid(input: &str) {
    let err = input.parse::<SubscribeType>().unwrap_err();
    assert!(matches!(err, Error::InvalidOperationKind(_)));
}
