// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! CodeChecker static analysis check.
//!
//! For every detected application (a directory with `prj.conf` up-tree)
//! the check configures a build with `west build --cmake-only`, runs
//! `CodeChecker analyze` over the compilation database, and parses the
//! report listing into findings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;

use crate::check::{self, CaseData, Check, CheckContext, Finding, RunOutcome, Severity};
use crate::checks::{files_in_scope, tool_available};
use crate::walker::find_app_root;

const ANALYZABLE_EXTS: &[&str] = &["c", "h", "cpp", "hpp", "cc", "S", "s", "inc"];

#[allow(clippy::expect_used)]
static ANSI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-?]*[ -/]*[@-~]").expect("valid regex"));

#[allow(clippy::expect_used)]
static ISSUE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([A-Z]+)\]\s+([^:]+):(\d+):(\d+):\s+(.+?)\s+\[([^\]]+)\]\s*$")
        .expect("valid regex")
});

enum Status {
    Ok,
    Fail(String),
    Error(String),
}

struct Issue {
    severity: Severity,
    file: String,
    line: u32,
    col: u32,
    checker: String,
    msg: String,
}

pub struct CodeChecker;

impl Check for CodeChecker {
    fn name(&self) -> &'static str {
        "CodeChecker"
    }

    fn doc(&self) -> &'static str {
        "See https://codechecker.readthedocs.io/ for more details"
    }

    fn run(&self, ctx: &CheckContext, case: &mut CaseData) -> RunOutcome {
        if !tool_available("CodeChecker") {
            return check::skip("CodeChecker not found in PATH");
        }
        if !tool_available("west") {
            return check::skip("west not found in PATH");
        }

        // Map each application to the files it should be analyzed for;
        // `None` means the whole application.
        let mut apps: BTreeMap<PathBuf, Option<Vec<PathBuf>>> = BTreeMap::new();

        match ctx.scope.mode {
            crate::scope::Mode::Default => {
                for dir in &ctx.scope.paths {
                    match find_app_root(&ctx.git_top, dir) {
                        Some(app) => {
                            apps.insert(app, None);
                        }
                        None => tracing::warn!(
                            "default app root not found (no prj.conf up-tree): {}",
                            dir.display()
                        ),
                    }
                }
                if apps.is_empty() {
                    return check::skip("No default Zephyr apps found (main_node/secondary_node)");
                }
            }
            crate::scope::Mode::Path => {
                // Whole directories that are (or contain) an app analyze fully.
                for target in &ctx.scope.paths {
                    let abs = ctx.git_top.join(target);
                    if abs.is_dir() {
                        if let Some(app) = find_app_root(&ctx.git_top, target) {
                            apps.insert(app, None);
                        }
                    }
                }
                let files = analyzable(files_in_scope(ctx)?);
                if files.is_empty() && apps.is_empty() {
                    return check::skip("No files to list in path mode");
                }
                group_by_app(ctx, &files, &mut apps);
                if apps.is_empty() {
                    return check::skip("No Zephyr apps found for listed files");
                }
            }
            crate::scope::Mode::Diff => {
                let files = analyzable(files_in_scope(ctx)?);
                if files.is_empty() {
                    return check::skip("No analyzable files after filtering in diff mode");
                }
                group_by_app(ctx, &files, &mut apps);
                if apps.is_empty() {
                    return check::skip("No Zephyr apps found for listed files");
                }
            }
        }

        let mut results = Vec::new();
        for (app, only_files) in apps {
            tracing::info!("analyzing app: {}", display_rel(&ctx.git_top, &app));
            let status = analyze_app(ctx, &app);
            results.push((app, status, only_files));
        }
        finalize(ctx, case, results)
    }
}

fn analyzable(files: Vec<PathBuf>) -> Vec<PathBuf> {
    files
        .into_iter()
        .filter(|f| {
            f.extension()
                .is_some_and(|e| ANALYZABLE_EXTS.iter().any(|x| e == *x))
        })
        .collect()
}

fn group_by_app(
    ctx: &CheckContext,
    files: &[PathBuf],
    apps: &mut BTreeMap<PathBuf, Option<Vec<PathBuf>>>,
) {
    for file in files {
        match find_app_root(&ctx.git_top, file) {
            Some(app) => match apps.entry(app).or_insert_with(|| Some(Vec::new())) {
                Some(list) => list.push(file.clone()),
                None => {}
            },
            None => tracing::warn!("no app (no prj.conf up-tree): {}", file.display()),
        }
    }
}

fn display_rel(top: &Path, path: &Path) -> String {
    path.strip_prefix(top)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

fn board_for_app(app: &Path) -> &'static str {
    if app
        .components()
        .any(|c| c.as_os_str() == "secondary_node")
    {
        "adafruit_feather_m0_lora"
    } else {
        "qemu_cortex_m3"
    }
}

fn run_captured(cmd: &mut Command) -> Result<(bool, String), String> {
    let output = cmd.output().map_err(|e| e.to_string())?;
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    Ok((output.status.success(), text))
}

/// Configure, analyze, and parse one application.
fn analyze_app(ctx: &CheckContext, app: &Path) -> Status {
    let board = board_for_app(app);
    let rel = display_rel(&ctx.git_top, app);
    let build_dir = ctx.git_top.join("buildsca").join(&rel).join(board);

    if build_dir.exists() {
        let _ = std::fs::remove_dir_all(&build_dir);
    }
    if let Err(e) = std::fs::create_dir_all(&build_dir) {
        return Status::Error(format!("failed to create {}: {e}", build_dir.display()));
    }

    let west = run_captured(
        Command::new("west")
            .args(["build", "-b", board, "-d"])
            .arg(&build_dir)
            .arg(app)
            .args(["-p", "always", "--cmake-only", "--", "-DCMAKE_EXPORT_COMPILE_COMMANDS=ON"])
            .current_dir(&ctx.git_top),
    );
    match west {
        Ok((true, _)) => {}
        Ok((false, out)) => return Status::Error(format!("west build failed for {rel}\n{out}")),
        Err(e) => return Status::Error(format!("west build failed for {rel}\n{e}")),
    }

    let compile_db = build_dir.join("compile_commands.json");
    if !compile_db.is_file() {
        return Status::Error(format!("Missing compile_commands.json for {rel}"));
    }

    let reports_dir = build_dir.join("reports");
    let _ = std::fs::create_dir_all(&reports_dir);

    let skip_file = ctx.git_top.join(".codechecker.skip");
    let mut analyze = Command::new("CodeChecker");
    analyze
        .arg("analyze")
        .arg(&compile_db)
        .arg("-o")
        .arg(&reports_dir)
        .arg("-q")
        .args(["--analyzers", "clangsa", "clang-tidy", "cppcheck"])
        .arg("--analyzer-config")
        .arg(format!("clang-tidy:HeaderFilterRegex=.*/{rel}/.*"))
        // Zephyr logging macros trigger reserved identifier diagnostics
        .args(["-d", "clang-diagnostic-reserved-identifier"])
        .args(["-d", "clang-diagnostic-reserved-macro-identifier"])
        .current_dir(&ctx.git_top);
    if skip_file.is_file() {
        analyze.arg("-i").arg(&skip_file);
    }
    match run_captured(&mut analyze) {
        Ok((true, _)) => {}
        Ok((false, out)) => {
            return Status::Error(format!("CodeChecker analyze error for {rel}\n{out}"));
        }
        Err(e) => return Status::Error(format!("CodeChecker analyze error for {rel}\n{e}")),
    }

    let mut parse = Command::new("CodeChecker");
    parse
        .arg("parse")
        .arg(&reports_dir)
        .arg("--print-steps")
        .arg("--trim-path-prefix")
        .arg(&ctx.git_top)
        .current_dir(&ctx.git_top);
    if skip_file.is_file() {
        parse.arg("-i").arg(&skip_file);
    }
    let output = match parse.output() {
        Ok(output) => output,
        Err(e) => return Status::Error(format!("CodeChecker parse error for {rel}\n{e}")),
    };
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));

    match output.status.code() {
        Some(0) => Status::Ok,
        // Exit code 2 means reports were found.
        Some(2) => Status::Fail(format!("CodeChecker reports for {rel}\n{text}")),
        _ => Status::Error(format!("CodeChecker parse error for {rel}\n{text}")),
    }
}

fn map_severity(sev: &str) -> Severity {
    match sev.trim().to_ascii_uppercase().as_str() {
        "HIGH" | "CRITICAL" | "SEVERE" => Severity::Error,
        "MEDIUM" => Severity::Warning,
        _ => Severity::Notice,
    }
}

/// Strip ANSI sequences and characters that are not valid in XML text.
fn sanitize_for_xml(s: &str) -> String {
    ANSI.replace_all(s, "")
        .chars()
        .filter(|&ch| {
            matches!(ch, '\t' | '\n' | '\r')
                || ('\u{20}'..='\u{D7FF}').contains(&ch)
                || ('\u{E000}'..='\u{FFFD}').contains(&ch)
                || ch > '\u{FFFF}'
        })
        .collect()
}

/// Parse `[SEV] file:line:col: msg [checker]` lines with up to two lines
/// of following context.
fn extract_issues(ctx: &CheckContext, out: &str) -> Vec<Issue> {
    let cleaned = ANSI.replace_all(out, "");
    let lines: Vec<&str> = cleaned.lines().collect();
    let mut issues = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let Some(caps) = ISSUE_LINE.captures(lines[i].trim()) else {
            i += 1;
            continue;
        };

        let mut msg = caps.get(5).map_or("", |m| m.as_str()).trim_end().to_string();
        let mut j = i + 1;
        let mut context = Vec::new();
        while j < lines.len() && context.len() < 2 {
            let next = lines[j].trim_end();
            if next.trim().is_empty()
                || ISSUE_LINE.is_match(next.trim())
                || next.starts_with("----====")
                || next.starts_with("[INFO")
            {
                break;
            }
            context.push(next.to_string());
            j += 1;
        }
        if !context.is_empty() {
            msg = format!("{msg}\r\n{}", context.join("\r\n"));
        }

        let file = normalize_repo_rel(ctx, caps.get(2).map_or("", |m| m.as_str()).trim());
        issues.push(Issue {
            severity: map_severity(caps.get(1).map_or("", |m| m.as_str())),
            file,
            line: caps.get(3).and_then(|m| m.as_str().parse().ok()).unwrap_or(1),
            col: caps.get(4).and_then(|m| m.as_str().parse().ok()).unwrap_or(1),
            checker: caps.get(6).map_or("", |m| m.as_str()).trim().to_string(),
            msg,
        });
        i = j;
    }
    issues
}

fn normalize_repo_rel(ctx: &CheckContext, p: &str) -> String {
    let mut path = PathBuf::from(p);
    if !path.is_absolute() {
        path = ctx.git_top.join(path);
    }
    let rel = path
        .strip_prefix(&ctx.git_top)
        .unwrap_or(&path)
        .to_string_lossy()
        .replace('\\', "/");
    rel.strip_prefix("./").unwrap_or(&rel).to_string()
}

fn finalize(
    ctx: &CheckContext,
    case: &mut CaseData,
    results: Vec<(PathBuf, Status, Option<Vec<PathBuf>>)>,
) -> RunOutcome {
    let mut errors = Vec::new();
    let mut fails = Vec::new();

    for (app, status, only_files) in results {
        match status {
            Status::Ok => {}
            Status::Error(out) => errors.push((app, out)),
            Status::Fail(out) => fails.push((app, out, only_files)),
        }
    }

    if !errors.is_empty() {
        let mut msg = vec!["CodeChecker errors:".to_string()];
        for (app, out) in errors {
            msg.push(format!("\n=== {} ===\n{out}", display_rel(&ctx.git_top, &app)));
        }
        return check::error(sanitize_for_xml(&msg.join("\n")));
    }

    let mut any_reported = false;
    let mut parsing_failed = Vec::new();

    for (app, out, only_files) in fails {
        let mut issues = extract_issues(ctx, &out);
        if issues.is_empty() {
            parsing_failed.push((app, out));
            continue;
        }

        let app_rel = display_rel(&ctx.git_top, &app);
        match &only_files {
            Some(files) => {
                let keep: Vec<String> = files
                    .iter()
                    .map(|f| normalize_repo_rel(ctx, &f.to_string_lossy()))
                    .collect();
                issues.retain(|issue| keep.contains(&issue.file));
            }
            None => {
                let prefixes = [format!("{app_rel}/src/"), format!("{app_rel}/include/")];
                issues.retain(|issue| prefixes.iter().any(|p| issue.file.starts_with(p)));
            }
        }

        for issue in issues {
            any_reported = true;
            case.fmtd_failure(
                Finding::new(issue.severity, &issue.checker, &issue.file)
                    .with_line(issue.line)
                    .with_col(issue.col)
                    .with_desc(sanitize_for_xml(&issue.msg)),
            );
        }
    }

    if !any_reported && !parsing_failed.is_empty() {
        let mut msg = vec!["CodeChecker reports (could not parse issues):".to_string()];
        for (app, out) in parsing_failed {
            msg.push(format!("\n=== {} ===\n{out}", display_rel(&ctx.git_top, &app)));
        }
        case.failure(&sanitize_for_xml(&msg.join("\n")));
    }
    Ok(())
}

#[cfg(test)]
#[path = "codechecker_tests.rs"]
mod tests;
