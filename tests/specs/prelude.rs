//! Test helpers for behavioral specifications.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates::prelude::*;

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Returns a Command configured to run the comply binary in `dir`.
pub fn comply_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("comply"));
    cmd.current_dir(dir);
    // Keep the environment reproducible regardless of the host shell.
    cmd.env_remove("WORKSPACE_BASE");
    cmd.env_remove("COMPLY_LOG");
    cmd
}

/// A temp directory holding a git repository with one initial commit.
pub struct TestRepo {
    pub dir: TempDir,
    repo: git2::Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let repo = git2::Repository::init(dir.path()).unwrap();
        let this = Self { dir, repo };
        this.write("README.md", "# workspace\n");
        this.commit("initial commit");
        this
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, rel: &str, content: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn commit(&self, message: &str) {
        let mut index = self.repo.index().unwrap();
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();
        let sig = git2::Signature::now("Test User", "test@example.com").unwrap();
        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|h| h.target())
            .map(|oid| self.repo.find_commit(oid).unwrap());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap();
    }
}

/// CMake content that trips the CMakeStyle check (tab indentation).
pub const BAD_CMAKE: &str = "project(demo)\n\tadd_subdirectory(src)\n";

/// CMake content that passes the CMakeStyle check.
pub const GOOD_CMAKE: &str = "project(demo)\nadd_subdirectory(src)\n";
