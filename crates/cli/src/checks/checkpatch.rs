// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! checkpatch.pl check.
//!
//! Path/default mode runs checkpatch over the files directly; diff mode
//! feeds the range diff on stdin and parses the report into formatted
//! findings.

use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::LazyLock;

use regex::Regex;

use crate::check::{
    self, Abort, CaseData, Check, CheckContext, Finding, RunOutcome, Severity,
};
use crate::checks::{files_in_scope, merged_output};
use crate::git;
use crate::scope::Mode;

const EXTS: &[&str] = &["c", "h", "cpp", "hpp", "cc", "S", "s", "inc"];

/// Guard against pathological reports: past this many parsed findings the
/// whole output is pushed as a single failure instead.
const MAX_PARSED_FINDINGS: usize = 500;

#[allow(clippy::expect_used)]
static REPORT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\s*\S+:(\d+):\s*(ERROR|WARNING):(.+?):(.+)(?:\n|\r\n?)+^\s*#(\d+):\s*FILE:\s*(.+):(\d+):",
    )
    .expect("valid regex")
});

pub struct Checkpatch;

impl Check for Checkpatch {
    fn name(&self) -> &'static str {
        "Checkpatch"
    }

    fn doc(&self) -> &'static str {
        "See https://docs.zephyrproject.org/latest/contribute/guidelines.html#coding-style for more details."
    }

    fn run(&self, ctx: &CheckContext, case: &mut CaseData) -> RunOutcome {
        let checkpatch = ctx.zephyr_base.join("scripts").join("checkpatch.pl");
        if !checkpatch.exists() {
            return check::skip(format!("{} not found", checkpatch.display()));
        }

        match ctx.scope.mode {
            Mode::Path | Mode::Default => {
                let files: Vec<_> = files_in_scope(ctx)?
                    .into_iter()
                    .filter(|f| f.extension().is_some_and(|e| EXTS.iter().any(|x| e == *x)))
                    .collect();
                if files.is_empty() {
                    return Ok(());
                }

                let output = Command::new(&checkpatch)
                    .args(["--no-tree", "--terse", "--file"])
                    .args(&files)
                    .current_dir(&ctx.git_top)
                    .output()
                    .map_err(|e| Abort::Error(format!("failed to run checkpatch: {e}")))?;
                if !output.status.success() {
                    case.failure(&merged_output(&output));
                }
                Ok(())
            }
            Mode::Diff => {
                let diff = git::diff_text(&ctx.git_top, &ctx.scope.commit_range, &[], 3)
                    .map_err(|e| Abort::Error(format!("failed to produce diff: {e}")))?;

                let mut child = Command::new(&checkpatch)
                    .args(["--mailback", "--no-tree", "-"])
                    .current_dir(&ctx.git_top)
                    .stdin(Stdio::piped())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped())
                    .spawn()
                    .map_err(|e| Abort::Error(format!("failed to run checkpatch: {e}")))?;
                if let Some(mut stdin) = child.stdin.take() {
                    let _ = stdin.write_all(diff.as_bytes());
                }
                let output = child
                    .wait_with_output()
                    .map_err(|e| Abort::Error(format!("checkpatch did not finish: {e}")))?;

                if !output.status.success() {
                    report_output(case, &merged_output(&output));
                }
                Ok(())
            }
        }
    }
}

fn report_output(case: &mut CaseData, output: &str) {
    let matches: Vec<_> = REPORT_BLOCK.captures_iter(output).collect();

    if matches.len() > MAX_PARSED_FINDINGS || matches.is_empty() {
        case.failure(output);
        return;
    }

    for caps in matches {
        let severity = Severity::parse(caps.get(2).map_or("", |m| m.as_str()));
        let title = caps.get(3).map_or("", |m| m.as_str()).trim();
        let desc = caps.get(4).map_or("", |m| m.as_str()).trim();
        let file = caps.get(6).map_or("", |m| m.as_str());
        let line: Option<u32> = caps.get(7).and_then(|m| m.as_str().parse().ok());

        let mut finding = Finding::new(severity, title, file).with_desc(desc);
        if let Some(line) = line {
            finding = finding.with_line(line);
        }
        case.fmtd_failure(finding);
    }
}

#[cfg(test)]
#[path = "checkpatch_tests.rs"]
mod tests;
