// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! Check registry and selection.
//!
//! All 11 built-in checks are registered here, in execution order:
//! - clangformat: C/C++ formatting via clang-format
//! - checkpatch: patch style via checkpatch.pl
//! - cmakestyle: CMake style rules
//! - devicetreebindings: devicetree binding properties
//! - yamllint: YAML style via yamllint
//! - kconfig: Kconfig symbol hygiene
//! - pylint: Python linting via pylint
//! - ruff: Python linting/formatting via ruff
//! - coccinelle: semantic patch rules via coccicheck
//! - devicetreelinting: DTS formatting via dts-linter
//! - codechecker: static analysis via CodeChecker

pub mod checkpatch;
pub mod clang_format;
pub mod cmake_style;
pub mod coccinelle;
pub mod codechecker;
pub mod devicetree_bindings;
pub mod devicetree_linting;
pub mod kconfig;
pub mod pylint;
pub mod ruff;
pub mod yaml_lint;

use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::check::{Abort, Check, CheckContext};
use crate::git;
use crate::scope::Mode;
use crate::walker;

/// Create all registered checks, in execution order.
pub fn all_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(clang_format::ClangFormat),
        Box::new(checkpatch::Checkpatch),
        Box::new(cmake_style::CMakeStyle),
        Box::new(devicetree_bindings::DevicetreeBindings),
        Box::new(yaml_lint::YamlLint),
        Box::new(kconfig::Kconfig),
        Box::new(pylint::Pylint),
        Box::new(ruff::Ruff),
        Box::new(coccinelle::Coccinelle),
        Box::new(devicetree_linting::DevicetreeLinting),
        Box::new(codechecker::CodeChecker),
    ]
}

/// All registered check names, sorted lexicographically for `--list`.
pub fn check_names() -> Vec<&'static str> {
    let mut names: Vec<_> = all_checks().iter().map(|c| c.name()).collect();
    names.sort_unstable();
    names
}

/// Documentation string for a registered check.
pub fn doc_for(name: &str) -> Option<&'static str> {
    all_checks()
        .iter()
        .find(|c| c.name() == name)
        .map(|c| c.doc())
}

/// Outcome of the include/exclude filters for one check name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Run,
    /// Dropped by the exclude list (always wins over include).
    Excluded,
    /// Not named by a non-empty include list.
    NotIncluded,
}

/// Apply the filters to one name. Both lists must be lowercased.
pub fn selection(name: &str, include: &[String], exclude: &[String]) -> Selection {
    let lower = name.to_lowercase();
    if exclude.contains(&lower) {
        Selection::Excluded
    } else if !include.is_empty() && !include.contains(&lower) {
        Selection::NotIncluded
    } else {
        Selection::Run
    }
}

/// Filter the registry by include/exclude name lists (case-insensitive).
pub fn filter_checks(include: &[String], exclude: &[String]) -> Vec<Box<dyn Check>> {
    let include: Vec<String> = include.iter().map(|s| s.to_lowercase()).collect();
    let exclude: Vec<String> = exclude.iter().map(|s| s.to_lowercase()).collect();
    all_checks()
        .into_iter()
        .filter(|c| selection(c.name(), &include, &exclude) == Selection::Run)
        .collect()
}

/// The file set a check should consider under the current scope.
///
/// Path/default mode scans the filesystem; diff mode lists changed files
/// from the commit range (deletions excluded).
pub(crate) fn files_in_scope(ctx: &CheckContext) -> Result<Vec<PathBuf>, Abort> {
    match ctx.scope.mode {
        Mode::Diff => git::changed_files(&ctx.git_top, &ctx.scope.commit_range)
            .map_err(|e| Abort::Error(format!("failed to list changed files: {e}"))),
        Mode::Path | Mode::Default => {
            Ok(walker::files_from_paths(&ctx.git_top, &ctx.scope.paths))
        }
    }
}

/// Whether an external tool can be spawned at all.
pub(crate) fn tool_available(tool: &str) -> bool {
    Command::new(tool)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

/// Combined stdout+stderr of a finished command, lossily decoded.
pub(crate) fn merged_output(output: &std::process::Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    if !output.stderr.is_empty() {
        text.push_str(&String::from_utf8_lossy(&output.stderr));
    }
    text
}

/// Keep Python files: `.py` extension or a python shebang on line one.
pub(crate) fn filter_python_files(top: &std::path::Path, files: &[PathBuf]) -> Vec<PathBuf> {
    files
        .iter()
        .filter(|f| {
            if f.extension().is_some_and(|e| e == "py") {
                return true;
            }
            let path = top.join(f);
            std::fs::read(&path).is_ok_and(|bytes| {
                bytes.starts_with(b"#!")
                    && bytes
                        .split(|&b| b == b'\n')
                        .next()
                        .is_some_and(|line| String::from_utf8_lossy(line).contains("python"))
            })
        })
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
