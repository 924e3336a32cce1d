// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! Unit tests for annotation formatting.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::check::{Finding, Severity};

#[test]
fn full_position_annotation() {
    let finding = Finding::new(Severity::Error, "Ruff (E501)", "tools/gen.py")
        .with_line(10)
        .with_col(5)
        .with_end(Some(10), Some(120))
        .with_desc("line too long");

    assert_eq!(
        format_annotation(&finding),
        "::error file=tools/gen.py,line=10,col=5,endLine=10,endColumn=120,\
         title=Ruff (E501)::tools/gen.py:10 line too long"
    );
}

#[test]
fn file_level_annotation_omits_positions() {
    let finding =
        Finding::new(Severity::Warning, "YAMLLint (syntax)", "cfg.yaml").with_desc("broken");

    assert_eq!(
        format_annotation(&finding),
        "::warning file=cfg.yaml,title=YAMLLint (syntax)::cfg.yaml broken"
    );
}

#[test]
fn message_control_characters_are_escaped() {
    let finding = Finding::new(Severity::Notice, "Rule", "a.c")
        .with_desc("50% done\nnext line\rcarriage");

    let line = format_annotation(&finding);
    assert!(line.ends_with("::a.c 50%25 done%0Anext line%0Dcarriage"));
    assert!(!line.contains('\n'));
    assert!(!line.contains('\r'));
}

#[test]
fn percent_escape_is_not_double_applied() {
    let finding = Finding::new(Severity::Notice, "Rule", "a.c").with_desc("already %25");
    let line = format_annotation(&finding);
    assert!(line.ends_with("::a.c already %2525"));
}
