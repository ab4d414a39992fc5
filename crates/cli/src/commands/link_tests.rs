// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::commands::testing::TestContext;
use crate::error::Error;

const URL: &str = "https://github.com/org/repo/issues/123";

#[test]
fn link_then_check_reports_conflict() {
    let ctx = TestContext::new();
    ctx.create_issue("Linked");
    assert!(check_impl(&ctx, URL).unwrap().is_ok());

    let link = add_impl(&ctx, "ENG-1", URL, &["type=github".to_string()]).unwrap();
    assert!(link.id > 0);
    assert_eq!(
        link.source_metadata.unwrap().get("type").map(String::as_str),
        Some("github")
    );

    let check = check_impl(&ctx, URL).unwrap();
    assert_eq!(check.status, LinkCheck::CONFLICT);
    assert_eq!(
        check.message.as_deref(),
        Some("This https://github.com/org/repo/issues/123 has already been linked to an issue ENG-1")
    );
}

#[test]
fn link_same_url_to_another_issue_fails() {
    let ctx = TestContext::new();
    ctx.create_issue("First");
    ctx.create_issue("Second");
    add_impl(&ctx, "ENG-1", URL, &[]).unwrap();

    let err = add_impl(&ctx, "ENG-2", URL, &[]).unwrap_err();
    assert!(matches!(err, Error::Core(tally_core::Error::DuplicateLink(_))));
}

#[test]
fn link_rejects_bad_metadata() {
    let ctx = TestContext::new();
    ctx.create_issue("First");
    let err = add_impl(&ctx, "ENG-1", URL, &["novalue".to_string()]).unwrap_err();
    assert!(matches!(err, Error::InvalidMetadata(_)));
    assert!(ctx.db.find_linked_issue_by_url(URL).unwrap().is_none());
}
