// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! Filesystem scanning for path and default mode.
//!
//! Uses the `ignore` crate for file discovery. Unlike a gitignore-driven
//! walk, scope expansion is explicit: everything under the target paths is
//! a candidate except paths containing a component from
//! [`IGNORE_PATH_PARTS`].

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use ignore::WalkBuilder;

/// Directory components excluded when scanning the filesystem.
pub const IGNORE_PATH_PARTS: &[&str] = &[
    ".git",
    "build",
    "deps",
    "build_sca",
    "buildsca",
    ".cache",
    "sca_logs",
    "venv",
    ".venv",
    ".ruff_cache",
];

/// Whether any path component is in the ignore set.
pub fn is_ignored(path: &Path) -> bool {
    path.components().any(|c| match c {
        Component::Normal(name) => name
            .to_str()
            .is_some_and(|n| IGNORE_PATH_PARTS.contains(&n)),
        _ => false,
    })
}

/// Expand target paths into a sorted, deduplicated list of files.
///
/// Directories are scanned recursively; single files are kept as-is.
/// Results are relative to `top` when possible, absolute otherwise.
pub fn files_from_paths(top: &Path, paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut out: BTreeSet<PathBuf> = BTreeSet::new();

    for target in paths {
        let abs = if target.is_absolute() {
            target.clone()
        } else {
            top.join(target)
        };

        if abs.is_dir() {
            let walk = WalkBuilder::new(&abs)
                .standard_filters(false)
                .filter_entry(|entry| {
                    entry
                        .file_name()
                        .to_str()
                        .is_none_or(|name| !IGNORE_PATH_PARTS.contains(&name))
                })
                .build();
            for entry in walk.flatten() {
                if entry.file_type().is_some_and(|ft| ft.is_file()) {
                    out.insert(relative_to(entry.path(), top));
                }
            }
        } else if abs.is_file() && !is_ignored(&abs) {
            out.insert(relative_to(&abs, top));
        }
    }

    out.into_iter().collect()
}

/// Ascend from `path` until a directory containing `prj.conf` is found.
///
/// Returns `None` when the search reaches `top` without a hit.
pub fn find_app_root(top: &Path, path: &Path) -> Option<PathBuf> {
    let abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        top.join(path)
    };
    let mut dir = if abs.is_dir() {
        abs
    } else {
        abs.parent()?.to_path_buf()
    };

    loop {
        if dir.join("prj.conf").is_file() {
            return Some(dir);
        }
        if dir == top {
            return None;
        }
        dir = dir.parent()?.to_path_buf();
    }
}

fn relative_to(path: &Path, top: &Path) -> PathBuf {
    path.strip_prefix(top).unwrap_or(path).to_path_buf()
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
