// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! Unit tests for the check registry.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use tempfile::TempDir;

use super::*;
use crate::test_utils::{create_tree, path_context};

#[test]
fn registry_names_are_unique_case_insensitively() {
    let mut names: Vec<String> = all_checks()
        .iter()
        .map(|c| c.name().to_lowercase())
        .collect();
    let before = names.len();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), before);
}

#[test]
fn check_names_are_sorted() {
    let names = check_names();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    assert!(names.contains(&"Checkpatch"));
    assert!(names.contains(&"Kconfig"));
}

#[test]
fn no_filters_selects_every_check() {
    assert_eq!(filter_checks(&[], &[]).len(), all_checks().len());
}

#[test]
fn include_restricts_case_insensitively() {
    let selected = filter_checks(&["checkpatch".to_string(), "KCONFIG".to_string()], &[]);
    let names: Vec<_> = selected.iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["Checkpatch", "Kconfig"]);
}

#[test]
fn exclude_wins_over_include() {
    let selected = filter_checks(
        &["checkpatch".to_string()],
        &["CheckPatch".to_string()],
    );
    assert!(selected.is_empty());
}

#[test]
fn selection_reports_why_a_check_is_dropped() {
    let include = vec!["kconfig".to_string()];
    let exclude = vec!["ruff".to_string()];
    assert_eq!(selection("Kconfig", &include, &exclude), Selection::Run);
    assert_eq!(selection("Ruff", &include, &exclude), Selection::Excluded);
    assert_eq!(
        selection("Checkpatch", &include, &exclude),
        Selection::NotIncluded
    );
}

#[test]
fn doc_for_known_and_unknown_names() {
    assert!(doc_for("Checkpatch").is_some());
    assert!(doc_for("NoSuchCheck").is_none());
}

#[test]
fn files_in_scope_scans_paths_in_path_mode() {
    let tmp = TempDir::new().unwrap();
    create_tree(tmp.path(), &[("app/a.c", ""), ("elsewhere/b.c", "")]);

    let ctx = path_context(tmp.path(), &["app"]);
    let files = files_in_scope(&ctx).unwrap();
    assert_eq!(files, vec![std::path::PathBuf::from("app/a.c")]);
}

#[test]
fn python_filter_accepts_extension_and_shebang() {
    let tmp = TempDir::new().unwrap();
    create_tree(
        tmp.path(),
        &[
            ("scripts/tool.py", "print('x')\n"),
            ("scripts/run", "#!/usr/bin/env python3\nprint('y')\n"),
            ("scripts/build.sh", "#!/bin/sh\necho z\n"),
        ],
    );

    let files = vec![
        std::path::PathBuf::from("scripts/tool.py"),
        std::path::PathBuf::from("scripts/run"),
        std::path::PathBuf::from("scripts/build.sh"),
    ];
    let py = filter_python_files(tmp.path(), &files);
    assert_eq!(
        py,
        vec![
            std::path::PathBuf::from("scripts/tool.py"),
            std::path::PathBuf::from("scripts/run"),
        ]
    );
}
