// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! Unit tests for the checkpatch check.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use tempfile::TempDir;

use super::*;
use crate::check::{Abort, CaseData};
use crate::test_utils::path_context;

#[test]
fn skips_when_script_is_missing() {
    let tmp = TempDir::new().unwrap();
    let ctx = path_context(tmp.path(), &["app"]);

    let mut case = CaseData::new("Checkpatch");
    let outcome = Checkpatch.run(&ctx, &mut case);
    match outcome {
        Err(Abort::Skip(reason)) => assert!(reason.contains("checkpatch.pl")),
        other => panic!("expected skip, got {other:?}"),
    }
}

#[test]
fn report_blocks_parse_into_findings() {
    let output = "\
-:31: WARNING:LONG_LINE: line length of 105 exceeds 100 columns
#31: FILE: src/foo.c:10:
+       a very long line indeed
-:40: ERROR:CODE_INDENT: code indent should use tabs where possible
#40: FILE: src/bar.c:22:
+    int x;
";
    let mut case = CaseData::new("Checkpatch");
    report_output(&mut case, output);

    assert_eq!(case.findings.len(), 2);

    let first = &case.findings[0];
    assert_eq!(first.severity, crate::check::Severity::Warning);
    assert_eq!(first.title, "LONG_LINE");
    assert_eq!(first.file, "src/foo.c");
    assert_eq!(first.line, Some(10));
    assert!(first.desc.contains("line length of 105"));

    let second = &case.findings[1];
    assert_eq!(second.severity, crate::check::Severity::Error);
    assert_eq!(second.file, "src/bar.c");
    assert_eq!(second.line, Some(22));
}

#[test]
fn unparseable_output_becomes_one_failure() {
    let mut case = CaseData::new("Checkpatch");
    report_output(&mut case, "total: 3 errors, 1 warnings, 50 lines checked\n");

    assert_eq!(case.results.len(), 1);
    assert!(case.findings.is_empty());
    assert!(case.results[0].text.contains("3 errors"));
}

#[test]
fn excessive_findings_collapse_to_one_failure() {
    let mut output = String::new();
    for i in 0..(MAX_PARSED_FINDINGS + 1) {
        output.push_str(&format!(
            "-:{i}: WARNING:LONG_LINE: too long\n#{i}: FILE: src/f{i}.c:{i}:\n+line\n",
            i = i + 1
        ));
    }

    let mut case = CaseData::new("Checkpatch");
    report_output(&mut case, &output);
    assert_eq!(case.results.len(), 1);
    assert!(case.findings.is_empty());
}
