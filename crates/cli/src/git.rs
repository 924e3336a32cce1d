// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! Git plumbing for diff mode.
//!
//! Uses git2 (libgit2) for all git operations to avoid subprocess overhead.
//!
//! Range grammar: `a..b` compares the two revisions, `a..` compares `a`
//! against `HEAD`, and a bare `a` compares the revision against the
//! working tree (including the index).

use std::path::{Path, PathBuf};

use git2::{Delta, Diff, DiffFormat, DiffOptions, Repository};

use crate::error::{Error, Result};

/// Extract the interesting path from a diff delta.
///
/// `new_file()` covers add/modify/rename/copy; deleted files only have
/// `old_file()`.
fn extract_path<'a>(delta: &'a git2::DiffDelta<'a>) -> Option<&'a Path> {
    delta.new_file().path().or_else(|| delta.old_file().path())
}

/// Find the top-level repository directory containing `start`.
pub fn discover_top(start: &Path) -> Result<PathBuf> {
    let repo = Repository::discover(start)?;
    let workdir = repo
        .workdir()
        .ok_or_else(|| Error::Report("bare repository has no working tree".to_string()))?;
    Ok(workdir.to_path_buf())
}

fn range_diff<'r>(
    repo: &'r Repository,
    range: &str,
    mut opts: DiffOptions,
) -> Result<Diff<'r>> {
    if let Some((base, head)) = range.split_once("..") {
        let base_tree = repo.revparse_single(base)?.peel_to_tree()?;
        let head_spec = if head.is_empty() { "HEAD" } else { head };
        let head_tree = repo.revparse_single(head_spec)?.peel_to_tree()?;
        Ok(repo.diff_tree_to_tree(Some(&base_tree), Some(&head_tree), Some(&mut opts))?)
    } else {
        let base_tree = repo.revparse_single(range)?.peel_to_tree()?;
        Ok(repo.diff_tree_to_workdir_with_index(Some(&base_tree), Some(&mut opts))?)
    }
}

/// List files touched by the commit range, excluding deletions.
///
/// Paths are relative to the repository top. Entries that no longer exist
/// on disk (e.g. submodule directories) are dropped.
pub fn changed_files(top: &Path, range: &str) -> Result<Vec<PathBuf>> {
    let repo = Repository::discover(top)?;
    let diff = range_diff(&repo, range, DiffOptions::new())?;

    let mut files = Vec::new();
    for delta in diff.deltas() {
        if delta.status() == Delta::Deleted {
            continue;
        }
        if let Some(path) = extract_path(&delta) {
            if top.join(path).exists() {
                files.push(path.to_path_buf());
            }
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Produce unified patch text for the commit range.
///
/// `paths` restricts the diff when non-empty; `context_lines` mirrors the
/// `-U` flag of `git diff`.
pub fn diff_text(
    top: &Path,
    range: &str,
    paths: &[PathBuf],
    context_lines: u32,
) -> Result<String> {
    let repo = Repository::discover(top)?;
    let mut opts = DiffOptions::new();
    opts.context_lines(context_lines);
    for path in paths {
        opts.pathspec(path);
    }
    let diff = range_diff(&repo, range, opts)?;

    let mut text = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        match line.origin() {
            '+' | '-' | ' ' => text.push(line.origin()),
            _ => {}
        }
        text.push_str(&String::from_utf8_lossy(line.content()));
        true
    })?;
    Ok(text)
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
