// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! Target scope resolution.
//!
//! The three analysis modes are a priority chain: an explicit path list
//! selects path mode, an explicit commit range selects diff mode, and
//! neither selects the built-in default directory set. Resolution always
//! succeeds; whether the targets exist is each check's problem.

use std::fmt;
use std::path::PathBuf;

/// Commit range used when none is given on the command line.
pub const DEFAULT_COMMIT_RANGE: &str = "HEAD~1..HEAD";

/// Directories analyzed in default mode.
pub const DEFAULT_TARGET_DIRS: &[&str] = &["main_node", "secondary_node"];

/// How the target set was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Explicit file/directory list.
    Path,
    /// Git commit range.
    Diff,
    /// Built-in default directory set.
    Default,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Path => "path",
            Mode::Diff => "diff",
            Mode::Default => "default",
        })
    }
}

/// The canonical target set every check consumes.
///
/// Computed once at startup, immutable thereafter.
#[derive(Debug, Clone)]
pub struct Scope {
    pub mode: Mode,
    /// Target paths in path/default mode; empty in diff mode.
    pub paths: Vec<PathBuf>,
    /// Commit range; meaningful in diff mode only.
    pub commit_range: String,
}

impl Scope {
    /// Resolve the scope from the command line.
    ///
    /// `commits` is `Some` only when `-c/--commits` was given explicitly;
    /// path mode wins when both paths and a range are present.
    pub fn resolve(paths: &[PathBuf], commits: Option<&str>) -> Self {
        let commit_range = commits.unwrap_or(DEFAULT_COMMIT_RANGE).to_string();

        if !paths.is_empty() {
            Scope {
                mode: Mode::Path,
                paths: paths.to_vec(),
                commit_range,
            }
        } else if commits.is_some() {
            Scope {
                mode: Mode::Diff,
                paths: Vec::new(),
                commit_range,
            }
        } else {
            Scope {
                mode: Mode::Default,
                paths: DEFAULT_TARGET_DIRS.iter().map(PathBuf::from).collect(),
                commit_range,
            }
        }
    }
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
