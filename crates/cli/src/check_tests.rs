// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! Unit tests for check result types.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

#[test]
fn finding_text_includes_all_positions() {
    let finding = Finding::new(Severity::Error, "Rule", "src/main.c")
        .with_line(10)
        .with_col(4)
        .with_end(Some(12), Some(8))
        .with_desc("bad code");

    assert_eq!(
        finding.text(),
        "\nRule:bad code\nFile:src/main.c\nLine:10\nColumn:4\nEndLine:12\nEndColumn:8"
    );
}

#[test]
fn finding_text_omits_absent_positions() {
    let finding = Finding::new(Severity::Notice, "Rule", "src/main.c");
    assert_eq!(finding.text(), "\nRule\nFile:src/main.c");
}

#[test]
fn finding_message_uses_desc_over_title() {
    let finding = Finding::new(Severity::Warning, "Rule", "a.c")
        .with_line(3)
        .with_desc("explanation");
    assert_eq!(finding.message(), "a.c:3 explanation");

    let bare = Finding::new(Severity::Warning, "Rule", "a.c");
    assert_eq!(bare.message(), "a.c Rule");
}

#[test]
fn failure_appends_and_continues() {
    let mut case = CaseData::new("Demo");
    case.failure("first");
    case.failure("second");

    assert_eq!(case.results.len(), 2);
    assert!(case.results.iter().all(|r| r.kind == ResultKind::Failure));
    assert_eq!(case.results[0].message, "Demo issues");
    assert_eq!(case.results[0].type_attr, "failure");
    assert_eq!(case.results[0].text, "first");
}

#[test]
fn fmtd_failure_records_finding_for_annotations() {
    let mut case = CaseData::new("Demo");
    case.fmtd_failure(
        Finding::new(Severity::Notice, "Rule", "a.c")
            .with_line(1)
            .with_desc("detail"),
    );

    assert_eq!(case.results.len(), 1);
    assert_eq!(case.results[0].type_attr, "notice");
    assert_eq!(case.findings.len(), 1);
    // Notice findings do not classify the check as failed.
    assert!(!case.results[0].is_problem());
}

#[test]
fn skip_and_error_entries() {
    let mut case = CaseData::new("Demo");
    case.record_skip("tool missing");
    assert_eq!(case.results[0].kind, ResultKind::Skipped);
    assert_eq!(case.results[0].message, "Demo skipped");
    assert_eq!(case.results[0].type_attr, "skip");

    let mut case = CaseData::new("Demo");
    case.record_error("config unreadable");
    assert_eq!(case.results[0].kind, ResultKind::Error);
    assert_eq!(case.results[0].type_attr, "error");
    assert!(case.results[0].is_problem());
}

#[test]
fn result_text_is_trimmed() {
    let mut case = CaseData::new("Demo");
    case.failure("body with trailing space   \n\n");
    assert_eq!(case.results[0].text, "body with trailing space");
}

#[test]
fn severity_parse_folds_unknown_to_warning() {
    assert_eq!(Severity::parse("ERROR"), Severity::Error);
    assert_eq!(Severity::parse("info"), Severity::Notice);
    assert_eq!(Severity::parse("bizarre"), Severity::Warning);
}

#[test]
fn abort_helpers_short_circuit() {
    fn body() -> RunOutcome {
        skip("not applicable")?;
        panic!("unreachable");
    }
    assert_eq!(body(), Err(Abort::Skip("not applicable".to_string())));

    fn infra() -> RunOutcome {
        error("missing file")
    }
    assert_eq!(infra(), Err(Abort::Error("missing file".to_string())));
}
