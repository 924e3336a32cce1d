// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! CMake style check.
//!
//! Self-contained line scan of `*.cmake` and `CMakeLists.txt` files.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::check::{CaseData, Check, CheckContext, Finding, RunOutcome, Severity};
use crate::checks::files_in_scope;

#[allow(clippy::expect_used)]
static TAB_INDENTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\t+").expect("valid regex"));

#[allow(clippy::expect_used)]
static SPACE_BEFORE_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*if\s+\(").expect("valid regex"));

pub struct CMakeStyle;

impl Check for CMakeStyle {
    fn name(&self) -> &'static str {
        "CMakeStyle"
    }

    fn doc(&self) -> &'static str {
        "See https://docs.zephyrproject.org/latest/contribute/style/cmake.html for more details."
    }

    fn run(&self, ctx: &CheckContext, case: &mut CaseData) -> RunOutcome {
        for file in files_in_scope(ctx)? {
            let is_cmake = file.extension().is_some_and(|e| e == "cmake")
                || file.file_name().is_some_and(|n| n == "CMakeLists.txt");
            if is_cmake {
                check_style(ctx, case, &file);
            }
        }
        Ok(())
    }
}

fn check_style(ctx: &CheckContext, case: &mut CaseData, file: &Path) {
    let Ok(content) = std::fs::read_to_string(ctx.git_top.join(file)) else {
        return;
    };
    let fname = file.to_string_lossy();

    for (idx, line) in content.lines().enumerate() {
        let line_num = (idx + 1) as u32;

        if TAB_INDENTATION.is_match(line) {
            case.fmtd_failure(
                Finding::new(Severity::Error, "CMakeStyle", fname.as_ref())
                    .with_line(line_num)
                    .with_desc("Use spaces instead of tabs for indentation"),
            );
        }

        if SPACE_BEFORE_PAREN.is_match(line) {
            case.fmtd_failure(
                Finding::new(Severity::Error, "CMakeStyle", fname.as_ref())
                    .with_line(line_num)
                    .with_desc("Remove space before '(' in if() statements"),
            );
        }
    }
}

#[cfg(test)]
#[path = "cmake_style_tests.rs"]
mod tests;
