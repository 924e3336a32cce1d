// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! ruff check.
//!
//! Two passes over the Python files in scope: `ruff check` with JSON
//! output for lint findings, then `ruff format --diff` per file for
//! formatting drift.

use std::path::PathBuf;
use std::process::Command;

use serde::Deserialize;

use crate::check::{self, Abort, CaseData, Check, CheckContext, Finding, RunOutcome, Severity};
use crate::checks::{files_in_scope, filter_python_files, merged_output, tool_available};

#[derive(Deserialize)]
struct RuffMessage {
    code: Option<String>,
    filename: String,
    location: Option<RuffLocation>,
    end_location: Option<RuffLocation>,
    message: String,
    url: Option<String>,
}

#[derive(Deserialize)]
struct RuffLocation {
    row: Option<u32>,
    column: Option<u32>,
}

pub struct Ruff;

impl Check for Ruff {
    fn name(&self) -> &'static str {
        "Ruff"
    }

    fn doc(&self) -> &'static str {
        "See https://docs.astral.sh/ruff/ for more details"
    }

    fn run(&self, ctx: &CheckContext, case: &mut CaseData) -> RunOutcome {
        let files = files_in_scope(ctx)?;
        let py_files = filter_python_files(&ctx.git_top, &files);
        if py_files.is_empty() {
            tracing::info!("ruff: no Python files found to analyze");
            return Ok(());
        }

        if !tool_available("ruff") {
            return check::skip("ruff not found in PATH");
        }

        run_ruff_check(ctx, case, &py_files)?;
        run_ruff_format(ctx, case, &py_files)
    }
}

fn config_args(ctx: &CheckContext, cmd: &mut Command) {
    let config = ctx.git_top.join(".ruff.toml");
    if config.is_file() {
        cmd.arg("--config").arg(&config);
    }
}

fn run_ruff_check(ctx: &CheckContext, case: &mut CaseData, py_files: &[PathBuf]) -> RunOutcome {
    let mut cmd = Command::new("ruff");
    cmd.arg("check");
    config_args(ctx, &mut cmd);
    let output = cmd
        .arg("--output-format=json")
        .args(py_files)
        .current_dir(&ctx.git_top)
        .output()
        .map_err(|e| Abort::Error(format!("failed to run ruff: {e}")))?;
    if output.status.success() {
        return Ok(());
    }

    let messages: Vec<RuffMessage> = match serde_json::from_slice(&output.stdout) {
        Ok(messages) => messages,
        Err(e) => {
            tracing::error!("failed to parse ruff JSON output: {e}");
            case.failure(&format!("Ruff check execution failed:\n{}", merged_output(&output)));
            return Ok(());
        }
    };

    for m in messages {
        let code = m.code.as_deref().unwrap_or("unknown");
        let mut desc = m.message.clone();
        if let Some(url) = &m.url {
            desc = format!("{desc} - see {url}");
        }
        let mut finding =
            Finding::new(Severity::Error, format!("Ruff ({code})"), &m.filename).with_desc(desc);
        if let Some(row) = m.location.as_ref().and_then(|l| l.row) {
            finding = finding.with_line(row);
            if let Some(col) = m.location.as_ref().and_then(|l| l.column) {
                finding = finding.with_col(col);
            }
            finding = finding.with_end(
                m.end_location.as_ref().and_then(|l| l.row),
                m.end_location.as_ref().and_then(|l| l.column),
            );
        }
        case.fmtd_failure(finding);
    }
    Ok(())
}

fn run_ruff_format(ctx: &CheckContext, case: &mut CaseData, py_files: &[PathBuf]) -> RunOutcome {
    for file in py_files {
        let mut cmd = Command::new("ruff");
        cmd.arg("format");
        config_args(ctx, &mut cmd);
        let output = cmd
            .args(["--force-exclude", "--diff"])
            .arg(file)
            .current_dir(&ctx.git_top)
            .output()
            .map_err(|e| Abort::Error(format!("failed to run ruff format: {e}")))?;
        if !output.status.success() {
            case.fmtd_failure(
                Finding::new(Severity::Error, "Ruff format", file.to_string_lossy()).with_desc(
                    format!("File needs formatting. Run: ruff format {}", file.display()),
                ),
            );
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "ruff_tests.rs"]
mod tests;
