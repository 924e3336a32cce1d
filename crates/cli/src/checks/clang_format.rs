// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! clang-format check.
//!
//! Path/default mode runs `clang-format --dry-run` per file. Diff mode
//! feeds the range diff through `clang-format-diff.py` and turns the
//! suggested patch into per-hunk findings.

use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::LazyLock;

use regex::Regex;

use crate::check::{
    self, Abort, CaseData, Check, CheckContext, Finding, RunOutcome, Severity,
};
use crate::checks::{files_in_scope, merged_output, tool_available};
use crate::git;
use crate::scope::Mode;

const EXTS: &[&str] = &["c", "h"];

#[allow(clippy::expect_used)]
static HUNK_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+\d+(?:,\d+)? @@").expect("valid regex")
});

pub struct ClangFormat;

impl Check for ClangFormat {
    fn name(&self) -> &'static str {
        "ClangFormat"
    }

    fn doc(&self) -> &'static str {
        "See https://clang.llvm.org/docs/ClangFormat.html for more details."
    }

    fn run(&self, ctx: &CheckContext, case: &mut CaseData) -> RunOutcome {
        match ctx.scope.mode {
            Mode::Path | Mode::Default => self.run_on_files(ctx, case),
            Mode::Diff => self.run_on_diff(ctx, case),
        }
    }
}

fn wants(file: &std::path::Path) -> bool {
    file.extension()
        .is_some_and(|e| EXTS.iter().any(|x| e == *x))
}

impl ClangFormat {
    fn run_on_files(&self, ctx: &CheckContext, case: &mut CaseData) -> RunOutcome {
        if !tool_available("clang-format") {
            return check::skip("clang-format not found in PATH");
        }

        for file in files_in_scope(ctx)? {
            if !wants(&file) {
                continue;
            }
            let output = Command::new("clang-format")
                .args(["--dry-run", "--Werror", "--style=file"])
                .arg(&file)
                .current_dir(&ctx.git_top)
                .output()
                .map_err(|e| Abort::Error(format!("failed to run clang-format: {e}")))?;
            if !output.status.success() {
                case.failure(&merged_output(&output));
            }
        }
        Ok(())
    }

    fn run_on_diff(&self, ctx: &CheckContext, case: &mut CaseData) -> RunOutcome {
        if !tool_available("clang-format-diff.py") {
            return check::skip("clang-format-diff.py not found in PATH");
        }

        for file in files_in_scope(ctx)? {
            if !wants(&file) {
                continue;
            }

            let diff = git::diff_text(&ctx.git_top, &ctx.scope.commit_range, &[file.clone()], 0)
                .map_err(|e| Abort::Error(format!("failed to diff {}: {e}", file.display())))?;
            if diff.is_empty() {
                continue;
            }

            let mut child = Command::new("clang-format-diff.py")
                .arg("-p1")
                .current_dir(&ctx.git_top)
                .stdin(Stdio::piped())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .spawn()
                .map_err(|e| Abort::Error(format!("failed to run clang-format-diff.py: {e}")))?;
            if let Some(mut stdin) = child.stdin.take() {
                let _ = stdin.write_all(diff.as_bytes());
            }
            let output = child
                .wait_with_output()
                .map_err(|e| Abort::Error(format!("clang-format-diff.py did not finish: {e}")))?;

            let patch = merged_output(&output);
            if !output.status.success() || !patch.trim().is_empty() {
                report_patch(case, &file.to_string_lossy(), &patch);
            }
        }
        Ok(())
    }
}

/// Turn a clang-format-diff fix patch into one finding per hunk.
fn report_patch(case: &mut CaseData, file: &str, patch: &str) {
    let lines: Vec<&str> = patch.lines().collect();
    let mut idx = 0;

    while idx < lines.len() {
        let Some(caps) = HUNK_HEADER.captures(lines[idx]) else {
            idx += 1;
            continue;
        };
        let start: u32 = caps
            .get(1)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(1);
        let len: u32 = caps
            .get(2)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(1);

        let mut body = Vec::new();
        idx += 1;
        while idx < lines.len() && !lines[idx].starts_with("@@") && !lines[idx].starts_with("---") {
            body.push(lines[idx]);
            idx += 1;
        }

        let changed = |l: &&str| l.starts_with('+') || l.starts_with('-');
        let Some(first) = body.iter().position(changed) else {
            continue;
        };
        let trailing = body.iter().rev().take_while(|l| !changed(l)).count();
        let msg: String = body[first..body.len() - trailing]
            .iter()
            .map(|l| format!("{l}\n"))
            .collect();

        case.fmtd_failure(
            Finding::new(
                Severity::Notice,
                "You may want to run clang-format on this change",
                file,
            )
            .with_line(start + len - trailing as u32)
            .with_desc(format!("\r\n{msg}")),
        );
    }
}

#[cfg(test)]
#[path = "clang_format_tests.rs"]
mod tests;
