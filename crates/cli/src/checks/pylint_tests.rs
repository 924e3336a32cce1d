// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! Unit tests for the pylint check.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use tempfile::TempDir;

use super::*;
use crate::check::CaseData;
use crate::test_utils::{create_tree, path_context};

#[test]
fn no_python_files_is_a_clean_pass() {
    let tmp = TempDir::new().unwrap();
    create_tree(tmp.path(), &[("app/main.c", "int main(void) {}\n")]);

    let ctx = path_context(tmp.path(), &["app"]);
    let mut case = CaseData::new("Pylint");
    Pylint.run(&ctx, &mut case).unwrap();
    assert!(case.results.is_empty());
}

#[test]
fn json2_report_parses() {
    let raw = r#"{
        "messages": [
            {
                "messageId": "E0602",
                "path": "tools/gen.py",
                "line": 7,
                "column": 4,
                "message": "Undefined variable 'foo'",
                "symbol": "undefined-variable"
            },
            {
                "messageId": "C0301",
                "path": "tools/gen.py",
                "line": 12,
                "column": 0,
                "message": "Line too long",
                "symbol": "line-too-long"
            }
        ]
    }"#;
    let report: PylintReport = serde_json::from_str(raw).unwrap();
    assert_eq!(report.messages.len(), 2);
    assert_eq!(report.messages[0].message_id, "E0602");
    assert_eq!(report.messages[0].line, Some(7));
    assert_eq!(report.messages[1].symbol, "line-too-long");
}

#[test]
fn report_without_messages_field_parses_empty() {
    let report: PylintReport = serde_json::from_str("{}").unwrap();
    assert!(report.messages.is_empty());
}
