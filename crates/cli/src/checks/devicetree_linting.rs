// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! Devicetree linting check.
//!
//! Wraps the `dts-linter` npm package (via npx) with JSON output.
//! Path/default mode discovers applications and lints each one in its own
//! working directory; diff mode lints the modified DTS files directly.
//! Suggested formatting fixes are merged into a single `dts_linter.patch`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Deserialize;

use crate::check::{self, Abort, CaseData, Check, CheckContext, Finding, RunOutcome, Severity};
use crate::git;
use crate::scope::Mode;
use crate::walker::{self, IGNORE_PATH_PARTS};

const DTS_EXTS: &[&str] = &["dts", "dtsi", "overlay"];

/// dts-linter accepts many files per invocation; batch to keep the
/// command line bounded.
const BATCH_SIZE: usize = 500;

const INSTALL_HINT: &str = "dts-linter not installed. To run this check, install Node.js and \
                            then run [npm --prefix ./scripts/checks ci] command inside \
                            WORKSPACE_BASE";

#[derive(Deserialize)]
struct LinterOutput {
    #[serde(default)]
    issues: Vec<LinterIssue>,
}

#[derive(Deserialize)]
struct LinterIssue {
    level: Option<String>,
    title: Option<String>,
    file: Option<String>,
    #[serde(rename = "startLine")]
    start_line: Option<u32>,
    #[serde(rename = "startCol")]
    start_col: Option<u32>,
    #[serde(rename = "endLine")]
    end_line: Option<u32>,
    #[serde(rename = "endCol")]
    end_col: Option<u32>,
    message: Option<String>,
}

pub struct DevicetreeLinting;

impl Check for DevicetreeLinting {
    fn name(&self) -> &'static str {
        "DevicetreeLinting"
    }

    fn doc(&self) -> &'static str {
        "See https://docs.zephyrproject.org/latest/contribute/style/devicetree.html for more details."
    }

    fn run(&self, ctx: &CheckContext, case: &mut CaseData) -> RunOutcome {
        if !ensure_npx(ctx) {
            return check::skip(INSTALL_HINT);
        }

        let mut patches = Vec::new();
        let outcome = match ctx.scope.mode {
            Mode::Diff => self.run_on_diff(ctx, case, &mut patches),
            Mode::Path | Mode::Default => self.run_on_apps(ctx, case, &mut patches),
        };

        merge_patches(ctx, &patches);
        outcome
    }
}

impl DevicetreeLinting {
    fn run_on_diff(
        &self,
        ctx: &CheckContext,
        case: &mut CaseData,
        patches: &mut Vec<PathBuf>,
    ) -> RunOutcome {
        let files = git::changed_files(&ctx.git_top, &ctx.scope.commit_range)
            .map_err(|e| Abort::Error(format!("failed to list changed files: {e}")))?;
        let dts_files: Vec<PathBuf> = files.into_iter().filter(|f| is_dts(f)).collect();
        if dts_files.is_empty() {
            return check::skip("No DTS files modified");
        }

        for (batch_idx, batch) in dts_files.chunks(BATCH_SIZE).enumerate() {
            let patch = ctx.git_top.join(format!("dts_linter_{batch_idx}.patch"));
            patches.push(patch.clone());

            let mut cmd = linter_command(ctx, &patch);
            for file in batch {
                cmd.arg("--file").arg(file);
            }
            run_linter(case, cmd, None);
        }
        Ok(())
    }

    fn run_on_apps(
        &self,
        ctx: &CheckContext,
        case: &mut CaseData,
        patches: &mut Vec<PathBuf>,
    ) -> RunOutcome {
        let search_dirs: Vec<PathBuf> = ctx
            .scope
            .paths
            .iter()
            .map(|p| {
                if p.is_absolute() {
                    p.clone()
                } else {
                    ctx.git_top.join(p)
                }
            })
            .collect();

        let applications = find_applications(&search_dirs);
        if applications.is_empty() {
            tracing::info!("devicetree linting: no applications found to analyze");
            return Ok(());
        }

        for (app_idx, app) in applications.iter().enumerate() {
            let dts_files = dts_files_in(app);
            if dts_files.is_empty() {
                continue;
            }

            for (batch_idx, batch) in dts_files.chunks(BATCH_SIZE).enumerate() {
                let patch = ctx
                    .git_top
                    .join(format!("dts_linter_app{}_batch{batch_idx}.patch", app_idx + 1));
                patches.push(patch.clone());

                let mut cmd = linter_command(ctx, &patch);
                cmd.arg("--cwd").arg(app);
                for file in batch {
                    let arg = file.strip_prefix(app).unwrap_or(file);
                    cmd.arg("--file").arg(arg);
                }
                run_linter(case, cmd, Some(app));
            }
        }
        Ok(())
    }
}

fn is_dts(file: &Path) -> bool {
    file.extension()
        .is_some_and(|e| DTS_EXTS.iter().any(|x| e == *x))
}

fn ensure_npx(ctx: &CheckContext) -> bool {
    Command::new("npx")
        .arg("--prefix")
        .arg(ctx.git_top.join("scripts").join("checks"))
        .args(["--no", "dts-linter", "--", "--version"])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

fn linter_command(ctx: &CheckContext, patch: &Path) -> Command {
    let mut cmd = Command::new("npx");
    cmd.arg("--prefix")
        .arg(ctx.git_top.join("scripts").join("checks"))
        .args(["--no", "dts-linter", "--", "--outputFormat", "json", "--format"])
        .arg("--patchFile")
        .arg(patch)
        .current_dir(&ctx.git_top);
    cmd
}

/// Run one linter invocation and fold its JSON issues into the case.
fn run_linter(case: &mut CaseData, mut cmd: Command, app: Option<&Path>) {
    let output = match cmd.output() {
        Ok(output) => output,
        Err(e) => {
            case.failure(&format!("failed to run dts-linter: {e}"));
            return;
        }
    };

    // Exit code 1 means formatting issues were found, which is expected.
    if output.status.code().is_none_or(|c| c > 1) {
        let mut msg = format!(
            "dts-linter exited with unexpected code {:?}",
            output.status.code()
        );
        if !output.stderr.is_empty() {
            msg.push_str(&format!(
                "\nstderr: {}",
                String::from_utf8_lossy(&output.stderr)
            ));
        }
        if let Some(app) = app {
            msg = format!("Error in {}: {msg}", app.display());
        }
        case.failure(&msg);
        return;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if stdout.trim().is_empty() {
        return;
    }

    let parsed: LinterOutput = match serde_json::from_str(&stdout) {
        Ok(parsed) => parsed,
        Err(e) => {
            let preview: String = stdout.chars().take(500).collect();
            case.failure(&format!(
                "Failed to parse dts-linter JSON output: {e}\nOutput preview: {preview}"
            ));
            return;
        }
    };

    for issue in parsed.issues {
        let level = issue.level.as_deref().unwrap_or("unknown");
        let message = issue.message.unwrap_or_default();
        if level == "info" {
            tracing::info!("{message}");
            continue;
        }
        let mut finding = Finding::new(
            Severity::parse(level),
            issue.title.unwrap_or_default(),
            issue.file.unwrap_or_default(),
        )
        .with_desc(message);
        if let Some(line) = issue.start_line {
            finding = finding.with_line(line);
            if let Some(col) = issue.start_col {
                finding = finding.with_col(col);
            }
            finding = finding.with_end(issue.end_line, issue.end_col);
        }
        case.fmtd_failure(finding);
    }
}

/// Find application directories (containing `prj.conf` or
/// `CMakeLists.txt`) under the search directories. Does not recurse into
/// a found application.
fn find_applications(search_dirs: &[PathBuf]) -> Vec<PathBuf> {
    fn visit(dir: &Path, apps: &mut Vec<PathBuf>) {
        if dir.join("prj.conf").is_file() || dir.join("CMakeLists.txt").is_file() {
            apps.push(dir.to_path_buf());
            return;
        }
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let skip = entry
                .file_name()
                .to_str()
                .is_some_and(|n| IGNORE_PATH_PARTS.contains(&n));
            if path.is_dir() && !skip {
                visit(&path, apps);
            }
        }
    }

    let mut apps = Vec::new();
    for dir in search_dirs {
        if !dir.exists() {
            tracing::warn!("devicetree linting: directory does not exist: {}", dir.display());
            continue;
        }
        visit(dir, &mut apps);
    }
    apps
}

/// All DTS files within one application directory (absolute paths).
fn dts_files_in(app: &Path) -> Vec<PathBuf> {
    walker::files_from_paths(app, &[PathBuf::from(".")])
        .into_iter()
        .filter(|f| is_dts(f))
        .map(|f| app.join(f))
        .collect()
}

/// Concatenate the per-batch patch files into `dts_linter.patch` and
/// remove the intermediates.
fn merge_patches(ctx: &CheckContext, patches: &[PathBuf]) {
    if patches.is_empty() {
        return;
    }
    let final_path = ctx.git_top.join("dts_linter.patch");
    let mut merged = Vec::new();
    for patch in patches {
        if let Ok(bytes) = fs::read(patch) {
            merged.extend_from_slice(&bytes);
        }
        let _ = fs::remove_file(patch);
    }

    if merged.is_empty() {
        return;
    }
    if let Err(e) = fs::write(&final_path, merged) {
        tracing::warn!("failed to write {}: {e}", final_path.display());
        return;
    }

    if ctx.case_output {
        tracing::info!("generated formatting patch: {}", final_path.display());
        tracing::info!("apply with: git apply dts_linter.patch");
    } else {
        let _ = fs::remove_file(&final_path);
    }
}

#[cfg(test)]
#[path = "devicetree_linting_tests.rs"]
mod tests;
