// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! yamllint check.
//!
//! Wraps the `yamllint` tool in parsable output mode and turns each
//! reported problem into a formatted finding.

use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;

use crate::check::{self, Abort, CaseData, Check, CheckContext, Finding, RunOutcome, Severity};
use crate::checks::{files_in_scope, merged_output, tool_available};

/// `file:line:col: [level] message (rule)`
#[allow(clippy::expect_used)]
static PARSABLE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?):(\d+):(\d+): \[(error|warning)\] (.+?)(?: \(([^)]+)\))?$")
        .expect("valid regex")
});

pub struct YamlLint;

impl Check for YamlLint {
    fn name(&self) -> &'static str {
        "YAMLLint"
    }

    fn doc(&self) -> &'static str {
        "Check YAML files with YAMLLint."
    }

    fn run(&self, ctx: &CheckContext, case: &mut CaseData) -> RunOutcome {
        if !tool_available("yamllint") {
            return check::skip("yamllint not found in PATH");
        }

        let files: Vec<_> = files_in_scope(ctx)?
            .into_iter()
            .filter(|f| f.extension().is_some_and(|e| e == "yaml" || e == "yml"))
            .collect();
        if files.is_empty() {
            return Ok(());
        }

        let mut cmd = Command::new("yamllint");
        cmd.args(["-f", "parsable"]);
        let config = ctx.workspace_base.join(".yamllint");
        if config.is_file() {
            cmd.arg("-c").arg(&config);
        }
        let output = cmd
            .args(&files)
            .current_dir(&ctx.git_top)
            .output()
            .map_err(|e| Abort::Error(format!("failed to run yamllint: {e}")))?;

        let text = merged_output(&output);
        let mut parsed_any = false;
        for line in text.lines() {
            let Some(caps) = PARSABLE_LINE.captures(line) else {
                continue;
            };
            parsed_any = true;
            let file = caps.get(1).map_or("", |m| m.as_str());
            let line_num: Option<u32> = caps.get(2).and_then(|m| m.as_str().parse().ok());
            let col: Option<u32> = caps.get(3).and_then(|m| m.as_str().parse().ok());
            let desc = caps.get(5).map_or("", |m| m.as_str());
            let rule = caps.get(6).map_or("unknown", |m| m.as_str());

            let mut finding =
                Finding::new(Severity::Warning, format!("YAMLLint ({rule})"), file)
                    .with_desc(desc);
            if let Some(n) = line_num {
                finding = finding.with_line(n);
                if let Some(c) = col {
                    finding = finding.with_col(c);
                }
            }
            case.fmtd_failure(finding);
        }

        // Non-zero exit without a single parsable line means the tool
        // itself misbehaved; keep the raw output.
        if !output.status.success() && !parsed_any && !text.trim().is_empty() {
            case.failure(&text);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "yaml_lint_tests.rs"]
mod tests;
