// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! Unit tests for the Coccinelle check.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::Path;

use tempfile::TempDir;

use super::*;
use crate::check::{Abort, CaseData};
use crate::test_utils::path_context;

#[test]
fn skips_without_zephyr_tree() {
    let tmp = TempDir::new().unwrap();
    let ctx = path_context(tmp.path(), &["app"]);

    let mut case = CaseData::new("Coccinelle");
    match Coccinelle.run(&ctx, &mut case) {
        Err(Abort::Skip(reason)) => assert!(reason.contains("Zephyr tree")),
        other => panic!("expected skip, got {other:?}"),
    }
}

#[test]
fn report_lines_parse_into_violations() {
    let zephyr = Path::new("/ws/deps/zephyr");

    let v = parse_report_line(zephyr, "main_node/src/main.c:42:10: WARNING: unneeded semicolon")
        .unwrap();
    assert_eq!(v.severity, crate::check::Severity::Warning);
    assert_eq!(v.line, Some(42));
    assert_eq!(v.message, "unneeded semicolon");
    assert!(v.file.is_absolute());

    let v = parse_report_line(zephyr, "/abs/path/x.c:7:1: ERROR: NULL dereference").unwrap();
    assert_eq!(v.severity, crate::check::Severity::Error);
    assert_eq!(v.file, Path::new("/abs/path/x.c"));
}

#[test]
fn non_report_lines_are_ignored() {
    let zephyr = Path::new("/z");
    assert!(parse_report_line(zephyr, "processing file x.c").is_none());
    assert!(parse_report_line(zephyr, "").is_none());
}

#[test]
fn build_directories_are_filtered() {
    assert!(path_is_in_build_dir(Path::new("ws/build/zephyr/main.c")));
    assert!(path_is_in_build_dir(Path::new("build_xm126/main.c")));
    assert!(!path_is_in_build_dir(Path::new("ws/builder/main.c")));
    assert!(!path_is_in_build_dir(Path::new("src/main.c")));
}

#[test]
fn header_rules_subset_is_consistent() {
    for rule in HEADER_REPORT_RULES {
        assert!(REPORT_RULES.contains(rule), "{rule} missing from REPORT_RULES");
    }
}
