// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! Unit tests for scope resolution.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::PathBuf;

use super::*;

#[test]
fn no_flags_selects_default_mode() {
    let scope = Scope::resolve(&[], None);
    assert_eq!(scope.mode, Mode::Default);
    assert_eq!(
        scope.paths,
        vec![PathBuf::from("main_node"), PathBuf::from("secondary_node")]
    );
    assert_eq!(scope.commit_range, DEFAULT_COMMIT_RANGE);
}

#[test]
fn explicit_commits_selects_diff_mode() {
    let scope = Scope::resolve(&[], Some("main..HEAD"));
    assert_eq!(scope.mode, Mode::Diff);
    assert!(scope.paths.is_empty());
    assert_eq!(scope.commit_range, "main..HEAD");
}

#[test]
fn explicit_paths_select_path_mode() {
    let paths = vec![PathBuf::from("app")];
    let scope = Scope::resolve(&paths, None);
    assert_eq!(scope.mode, Mode::Path);
    assert_eq!(scope.paths, paths);
}

#[test]
fn path_wins_over_diff() {
    let paths = vec![PathBuf::from("app")];
    let scope = Scope::resolve(&paths, Some("main..HEAD"));
    assert_eq!(scope.mode, Mode::Path);
    assert_eq!(scope.paths, paths);
    // The range is still carried for checks that want it.
    assert_eq!(scope.commit_range, "main..HEAD");
}

#[test]
fn mode_display() {
    assert_eq!(Mode::Path.to_string(), "path");
    assert_eq!(Mode::Diff.to_string(), "diff");
    assert_eq!(Mode::Default.to_string(), "default");
}
