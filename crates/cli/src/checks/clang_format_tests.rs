// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! Unit tests for the clang-format check.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::check::CaseData;

#[test]
fn patch_hunks_become_notice_findings() {
    let patch = "\
--- a/src/main.c
+++ b/src/main.c
@@ -10,4 +10,3 @@
 int unchanged;
-int  badly    spaced;
+int badly_spaced;
 int trailing_context;
";
    let mut case = CaseData::new("ClangFormat");
    report_patch(&mut case, "src/main.c", patch);

    assert_eq!(case.results.len(), 1);
    let finding = &case.findings[0];
    assert_eq!(finding.file, "src/main.c");
    // start(10) + len(4) - one trailing context line
    assert_eq!(finding.line, Some(13));
    assert!(finding.desc.contains("badly_spaced"));
    assert!(!case.results[0].is_problem(), "notice findings warn only");
}

#[test]
fn multiple_hunks_yield_multiple_findings() {
    let patch = "\
@@ -1,2 +1,2 @@
-int a ;
+int a;
@@ -20,2 +20,2 @@
-int b ;
+int b;
";
    let mut case = CaseData::new("ClangFormat");
    report_patch(&mut case, "x.c", patch);
    assert_eq!(case.results.len(), 2);
}

#[test]
fn hunk_without_changes_is_ignored() {
    let patch = "@@ -1,2 +1,2 @@\n context only\n more context\n";
    let mut case = CaseData::new("ClangFormat");
    report_patch(&mut case, "x.c", patch);
    assert!(case.results.is_empty());
}

#[test]
fn extension_filter_matches_c_and_h_only() {
    assert!(wants(std::path::Path::new("a/b.c")));
    assert!(wants(std::path::Path::new("a/b.h")));
    assert!(!wants(std::path::Path::new("a/b.cpp")));
    assert!(!wants(std::path::Path::new("a/b.py")));
}
