// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! Coccinelle check.
//!
//! Runs the Zephyr coccicheck driver in report mode, one rule at a time,
//! and parses `file:line:col: SEVERITY: message` lines. Findings under
//! build directories are dropped.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::check::{self, Abort, CaseData, Check, CheckContext, Finding, RunOutcome, Severity};
use crate::git;
use crate::scope::Mode;
use crate::walker::IGNORE_PATH_PARTS;

/// Rules run in report mode (each must support `--mode=report`).
const REPORT_RULES: &[&str] = &[
    "array_size.cocci",
    "boolean.cocci",
    "const_config_info.cocci",
    "deref_null.cocci",
    "find_dev_usage.cocci",
    "identifier_length.cocci",
    "int_ms_to_timeout.cocci",
    "mini_lock.cocci",
    "noderef.cocci",
    "reserved_names.cocci",
    "returnvar.cocci",
    "same_identifier.cocci",
    "semicolon.cocci",
    "unsigned_lesser_than_zero.cocci",
    "unsigned_suffix.cocci",
    "ztest_strcmp.cocci",
];

/// Rules that should also inspect headers.
const HEADER_REPORT_RULES: &[&str] = &[
    "array_size.cocci",
    "identifier_length.cocci",
    "reserved_names.cocci",
    "same_identifier.cocci",
];

pub struct Coccinelle;

impl Check for Coccinelle {
    fn name(&self) -> &'static str {
        "Coccinelle"
    }

    fn doc(&self) -> &'static str {
        "See https://docs.zephyrproject.org/latest/develop/coccinelle.html for more details"
    }

    fn path_hint(&self) -> crate::check::PathHint {
        crate::check::PathHint::ZephyrBase
    }

    fn run(&self, ctx: &CheckContext, case: &mut CaseData) -> RunOutcome {
        if !ctx.zephyr_base.is_dir() {
            return check::skip("Zephyr tree not found at deps/zephyr");
        }
        let coccicheck = ctx.zephyr_base.join("scripts").join("coccicheck");
        if !coccicheck.is_file() {
            return check::skip("coccicheck not found in Zephyr tree");
        }

        let target_dirs = target_dirs(ctx)?;
        if target_dirs.is_empty() {
            return check::skip("No target directories found to analyze");
        }

        for rule in REPORT_RULES {
            let cocci_file = ctx
                .zephyr_base
                .join("scripts")
                .join("coccinelle")
                .join(*rule);
            if !cocci_file.is_file() {
                tracing::warn!("skipping rule {rule} (file not found)");
                continue;
            }

            let mut cmd = Command::new(&coccicheck);
            cmd.arg("--mode=report")
                .arg(format!("--cocci={}", cocci_file.display()));
            if HEADER_REPORT_RULES.contains(rule) {
                cmd.arg("--sp-flag=--include-headers");
            }
            let output = cmd
                .args(&target_dirs)
                .current_dir(&ctx.zephyr_base)
                .output()
                .map_err(|e| Abort::Error(format!("failed to run coccicheck: {e}")))?;

            let stdout = String::from_utf8_lossy(&output.stdout);
            let mut rule_errors = output.status.code().is_none_or(|c| c > 1);

            for line in stdout.lines() {
                if line.contains("Invalid mode") {
                    rule_errors = true;
                }
                if let Some(violation) = parse_report_line(&ctx.zephyr_base, line) {
                    if path_is_in_build_dir(&violation.file) {
                        continue;
                    }
                    let mut finding = Finding::new(
                        violation.severity,
                        format!("Coccinelle ({rule})"),
                        violation.file.to_string_lossy(),
                    )
                    .with_desc(violation.message);
                    if let Some(n) = violation.line {
                        finding = finding.with_line(n);
                    }
                    case.fmtd_failure(finding);
                }
            }

            if rule_errors {
                case.failure(&format!("Coccinelle rule {rule} failed with internal errors"));
            }
        }
        Ok(())
    }
}

/// Directories to hand to coccicheck, depending on the scope mode.
fn target_dirs(ctx: &CheckContext) -> Result<Vec<PathBuf>, Abort> {
    match ctx.scope.mode {
        Mode::Diff => {
            let files = git::changed_files(&ctx.git_top, &ctx.scope.commit_range)
                .map_err(|e| Abort::Error(format!("failed to list changed files: {e}")))?;
            // coccicheck recurses, so the top-level directory per file is enough.
            let mut dirs = BTreeSet::new();
            for file in files {
                if !file.extension().is_some_and(|e| e == "c" || e == "h") {
                    continue;
                }
                if let Some(std::path::Component::Normal(top)) = file.components().next() {
                    if top.to_str().is_some_and(|n| IGNORE_PATH_PARTS.contains(&n)) {
                        continue;
                    }
                    let abs = ctx.git_top.join(top);
                    if abs.is_dir() {
                        dirs.insert(abs);
                    }
                }
            }
            if dirs.is_empty() {
                check::skip("No C/H files modified in diff")?;
            }
            Ok(dirs.into_iter().collect())
        }
        Mode::Path | Mode::Default => {
            let mut dirs = Vec::new();
            for target in &ctx.scope.paths {
                let abs = if target.is_absolute() {
                    target.clone()
                } else {
                    ctx.git_top.join(target)
                };
                if abs == ctx.git_top {
                    // Analyzing the repository root: expand into subdirectories.
                    let Ok(entries) = std::fs::read_dir(&abs) else {
                        continue;
                    };
                    for entry in entries.flatten() {
                        let sub = entry.path();
                        let skip = entry
                            .file_name()
                            .to_str()
                            .is_some_and(|n| IGNORE_PATH_PARTS.contains(&n));
                        if sub.is_dir() && !skip {
                            dirs.push(sub);
                        }
                    }
                } else if abs.is_dir()
                    && abs
                        .file_name()
                        .and_then(|n| n.to_str())
                        .is_none_or(|n| !IGNORE_PATH_PARTS.contains(&n))
                {
                    dirs.push(abs);
                }
            }
            dirs.sort();
            Ok(dirs)
        }
    }
}

struct Violation {
    severity: Severity,
    file: PathBuf,
    line: Option<u32>,
    message: String,
}

/// Parse one `file:line:col: SEVERITY: message` report line.
fn parse_report_line(zephyr_base: &Path, line: &str) -> Option<Violation> {
    if !line.contains("WARNING:") && !line.contains("ERROR:") {
        return None;
    }
    let stripped = line.trim_start();
    let mut parts = stripped.splitn(3, ':');
    let file = parts.next()?;
    let line_num: Option<u32> = parts.next()?.parse().ok();
    let rest = parts.next()?;

    let (severity, message) = if let Some((_, msg)) = rest.split_once("ERROR:") {
        (Severity::Error, msg.trim())
    } else if let Some((_, msg)) = rest.split_once("WARNING:") {
        (Severity::Warning, msg.trim())
    } else {
        (Severity::Warning, rest.trim())
    };

    let mut path = PathBuf::from(file);
    if !path.is_absolute() {
        path = zephyr_base.join(path);
    }
    Some(Violation {
        severity,
        file: path,
        line: line_num,
        message: message.to_string(),
    })
}

/// Whether a path has a `build` or `build_*` segment.
fn path_is_in_build_dir(path: &Path) -> bool {
    path.components().any(|c| match c {
        std::path::Component::Normal(name) => name
            .to_str()
            .is_some_and(|n| n == "build" || n.starts_with("build_")),
        _ => false,
    })
}

#[cfg(test)]
#[path = "coccinelle_tests.rs"]
mod tests;
