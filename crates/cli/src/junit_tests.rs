// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! Unit tests for JUnit report serialization.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use tempfile::TempDir;

use super::*;
use crate::check::{CaseData, Finding, Severity};

fn sample_suite() -> Suite {
    let mut suite = Suite::new("Compliance");

    let mut failing = CaseData::new("Checkpatch");
    failing.failure("style problems\nover two lines");
    failing.fmtd_failure(
        Finding::new(Severity::Error, "LONG_LINE", "src/main.c")
            .with_line(42)
            .with_desc("line over 100 characters"),
    );
    suite.merge_case(failing.into());

    let mut skipped = CaseData::new("ClangFormat");
    skipped.record_skip("clang-format not found in PATH");
    suite.merge_case(skipped.into());

    suite.merge_case(CaseData::new("Kconfig").into());
    suite
}

#[test]
fn written_report_round_trips() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("compliance.xml");

    let suite = sample_suite();
    write_report(&path, &suite).unwrap();
    let loaded = load_suite(&path).unwrap();

    assert_eq!(loaded.name, suite.name);
    assert_eq!(loaded.cases, suite.cases);
}

#[test]
fn rewritten_report_is_identical() {
    let tmp = TempDir::new().unwrap();
    let first = tmp.path().join("first.xml");
    let second = tmp.path().join("second.xml");

    let suite = sample_suite();
    write_report(&first, &suite).unwrap();
    let loaded = load_suite(&first).unwrap();
    write_report(&second, &loaded).unwrap();

    assert_eq!(
        std::fs::read_to_string(&first).unwrap(),
        std::fs::read_to_string(&second).unwrap()
    );
}

#[test]
fn report_contains_statistics() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("compliance.xml");

    write_report(&path, &sample_suite()).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();

    assert!(content.contains(r#"<testsuite name="Compliance""#));
    assert!(content.contains(r#"tests="3""#));
    assert!(content.contains(r#"failures="1""#));
    assert!(content.contains(r#"skipped="1""#));
}

#[test]
fn xml_special_characters_survive() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("compliance.xml");

    let mut case = CaseData::new("Demo");
    case.failure("bad <angle> & \"quoted\" text");
    let mut suite = Suite::new("Compliance");
    suite.merge_case(case.into());

    write_report(&path, &suite).unwrap();
    let loaded = load_suite(&path).unwrap();
    assert_eq!(loaded.cases[0].results[0].text, "bad <angle> & \"quoted\" text");
}

#[test]
fn missing_testsuite_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("empty.xml");
    std::fs::write(&path, "<?xml version=\"1.0\"?>\n<nothing/>\n").unwrap();

    assert!(load_suite(&path).is_err());
}

#[test]
fn clean_case_has_no_result_entries() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("compliance.xml");

    let mut suite = Suite::new("Compliance");
    suite.merge_case(CaseData::new("Kconfig").into());
    write_report(&path, &suite).unwrap();

    let loaded = load_suite(&path).unwrap();
    assert_eq!(loaded.cases.len(), 1);
    assert!(loaded.cases[0].results.is_empty());
}
