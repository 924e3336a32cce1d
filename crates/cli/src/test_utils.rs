//! Shared unit test utilities.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::check::CheckContext;
use crate::scope::{Mode, Scope};

/// Creates a directory tree from a list of (path, content) pairs.
///
/// Parent directories are created automatically.
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}

/// Context rooted in a temp directory, in path mode over `paths`.
pub fn path_context(root: &Path, paths: &[&str]) -> CheckContext {
    CheckContext {
        git_top: root.to_path_buf(),
        workspace_base: root.to_path_buf(),
        zephyr_base: root.join("deps").join("zephyr"),
        scope: Scope {
            mode: Mode::Path,
            paths: paths.iter().map(PathBuf::from).collect(),
            commit_range: "HEAD~1..HEAD".to_string(),
        },
        case_output: true,
    }
}

/// Context in diff mode over the given commit range.
pub fn diff_context(root: &Path, range: &str) -> CheckContext {
    CheckContext {
        git_top: root.to_path_buf(),
        workspace_base: root.to_path_buf(),
        zephyr_base: root.join("deps").join("zephyr"),
        scope: Scope {
            mode: Mode::Diff,
            paths: Vec::new(),
            commit_range: range.to_string(),
        },
        case_output: true,
    }
}

/// Initialize a git repository with one initial commit.
pub fn init_repo(dir: &TempDir) -> git2::Repository {
    let repo = git2::Repository::init(dir.path()).unwrap();
    fs::write(dir.path().join("README.md"), "# project\n").unwrap();
    commit_all(&repo, "initial commit");
    repo
}

/// Stage everything and commit.
pub fn commit_all(repo: &git2::Repository, message: &str) -> git2::Oid {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let sig = git2::Signature::now("Test User", "test@example.com").unwrap();
    let parent = repo
        .head()
        .ok()
        .and_then(|h| h.target())
        .map(|oid| repo.find_commit(oid).unwrap());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap()
}
