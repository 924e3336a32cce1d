// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! Unit tests for the CMake style check.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use tempfile::TempDir;

use super::*;
use crate::check::CaseData;
use crate::test_utils::{create_tree, path_context};

#[test]
fn flags_tabs_and_if_spacing() {
    let tmp = TempDir::new().unwrap();
    create_tree(
        tmp.path(),
        &[(
            "app/CMakeLists.txt",
            "project(demo)\n\tadd_subdirectory(src)\nif (FOO)\nendif()\n",
        )],
    );

    let ctx = path_context(tmp.path(), &["app"]);
    let mut case = CaseData::new("CMakeStyle");
    CMakeStyle.run(&ctx, &mut case).unwrap();

    assert_eq!(case.results.len(), 2);
    assert!(case.results[0].text.contains("Line:2"));
    assert!(case.results[0].text.contains("spaces instead of tabs"));
    assert!(case.results[1].text.contains("Line:3"));
    assert!(case.results[1].text.contains("Remove space before '('"));
}

#[test]
fn ignores_non_cmake_files() {
    let tmp = TempDir::new().unwrap();
    create_tree(tmp.path(), &[("app/notes.txt", "\tif (FOO)\n")]);

    let ctx = path_context(tmp.path(), &["app"]);
    let mut case = CaseData::new("CMakeStyle");
    CMakeStyle.run(&ctx, &mut case).unwrap();
    assert!(case.results.is_empty());
}

#[test]
fn accepts_cmake_extension() {
    let tmp = TempDir::new().unwrap();
    create_tree(tmp.path(), &[("app/helpers.cmake", "\tmessage(x)\n")]);

    let ctx = path_context(tmp.path(), &["app"]);
    let mut case = CaseData::new("CMakeStyle");
    CMakeStyle.run(&ctx, &mut case).unwrap();
    assert_eq!(case.results.len(), 1);
}

#[test]
fn clean_tree_yields_no_findings() {
    let tmp = TempDir::new().unwrap();
    create_tree(
        tmp.path(),
        &[("app/CMakeLists.txt", "project(demo)\nif(FOO)\nendif()\n")],
    );

    let ctx = path_context(tmp.path(), &["app"]);
    let mut case = CaseData::new("CMakeStyle");
    CMakeStyle.run(&ctx, &mut case).unwrap();
    assert!(case.results.is_empty());
}
