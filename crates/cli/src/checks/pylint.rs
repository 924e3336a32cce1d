// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! pylint check.
//!
//! Runs pylint with JSON output over the Python files in scope. Message
//! ids starting with F/E map to error findings, everything else to
//! warnings. Unparseable output degrades to one plain failure.

use std::process::Command;

use serde::Deserialize;

use crate::check::{self, Abort, CaseData, Check, CheckContext, Finding, RunOutcome, Severity};
use crate::checks::{files_in_scope, filter_python_files, merged_output, tool_available};

#[derive(Deserialize)]
struct PylintReport {
    #[serde(default)]
    messages: Vec<PylintMessage>,
}

#[derive(Deserialize)]
struct PylintMessage {
    #[serde(rename = "messageId")]
    message_id: String,
    path: String,
    line: Option<u32>,
    column: Option<u32>,
    message: String,
    symbol: String,
}

pub struct Pylint;

impl Check for Pylint {
    fn name(&self) -> &'static str {
        "Pylint"
    }

    fn doc(&self) -> &'static str {
        "See https://www.pylint.org/ for more details"
    }

    fn run(&self, ctx: &CheckContext, case: &mut CaseData) -> RunOutcome {
        let files = files_in_scope(ctx)?;
        let py_files = filter_python_files(&ctx.git_top, &files);
        if py_files.is_empty() {
            tracing::info!("pylint: no Python files found to analyze");
            return Ok(());
        }

        if !tool_available("pylint") {
            return check::skip("pylint not found in PATH");
        }

        let mut cmd = Command::new("pylint");
        cmd.arg("--output-format=json2");
        let rcfile = ctx.git_top.join(".pylintrc");
        if rcfile.is_file() {
            cmd.arg(format!("--rcfile={}", rcfile.display()));
        }
        // Zephyr ships extra pylint checkers; expose them when present.
        let checker_dir = ctx.zephyr_base.join("scripts").join("pylint").join("checkers");
        if checker_dir.is_dir() {
            let mut pythonpath = checker_dir.display().to_string();
            if let Ok(existing) = std::env::var("PYTHONPATH") {
                pythonpath = format!("{pythonpath}:{existing}");
            }
            cmd.env("PYTHONPATH", pythonpath);
            cmd.arg("--load-plugins=argparse-checker");
        }

        let output = cmd
            .args(&py_files)
            .current_dir(&ctx.git_top)
            .output()
            .map_err(|e| Abort::Error(format!("failed to run pylint: {e}")))?;
        if output.status.success() {
            return Ok(());
        }

        let text = merged_output(&output);
        let report: PylintReport = match serde_json::from_slice(&output.stdout) {
            Ok(report) => report,
            Err(e) => {
                tracing::error!("failed to parse pylint JSON output: {e}");
                case.failure(&format!("Pylint execution failed:\n{text}"));
                return Ok(());
            }
        };

        if report.messages.is_empty() {
            case.failure(&text);
            return Ok(());
        }

        for m in report.messages {
            let severity = match m.message_id.chars().next() {
                Some('F') | Some('E') => Severity::Error,
                _ => Severity::Warning,
            };
            let mut finding = Finding::new(severity, &m.message_id, &m.path)
                .with_desc(format!("{} ({})", m.message, m.symbol));
            if let Some(line) = m.line {
                finding = finding.with_line(line);
                if let Some(col) = m.column {
                    finding = finding.with_col(col);
                }
            }
            case.fmtd_failure(finding);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "pylint_tests.rs"]
mod tests;
