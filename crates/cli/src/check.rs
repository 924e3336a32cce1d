// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! Check contract and result accumulation types.
//!
//! Every compliance check implements the [`Check`] trait. During `run` a
//! check appends findings to its [`CaseData`] and may end early by
//! returning an [`Abort`] (skip or infrastructure error). Plain failures
//! never end the run; a check can report many of them.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::scope::Scope;

/// Severity of a formatted finding.
///
/// Free-form severities from tool output are folded into these three;
/// `error` is the only kind that marks a check as failed on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Notice,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Notice => "notice",
        }
    }

    /// Parse a tool-reported severity, defaulting to warning.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "error" | "critical" | "fatal" => Severity::Error,
            "notice" | "info" => Severity::Notice,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured, position-addressable finding.
///
/// `file` is always present; a column is never recorded without a line.
#[derive(Debug, Clone)]
pub struct Finding {
    pub severity: Severity,
    pub title: String,
    pub file: String,
    pub line: Option<u32>,
    pub col: Option<u32>,
    pub end_line: Option<u32>,
    pub end_col: Option<u32>,
    pub desc: String,
}

impl Finding {
    pub fn new(severity: Severity, title: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            file: file.into(),
            line: None,
            col: None,
            end_line: None,
            end_col: None,
            desc: String::new(),
        }
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_col(mut self, col: u32) -> Self {
        self.col = Some(col);
        self
    }

    pub fn with_end(mut self, end_line: Option<u32>, end_col: Option<u32>) -> Self {
        self.end_line = end_line;
        self.end_col = end_col;
        self
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    /// Multi-line text body stored in the report.
    pub fn text(&self) -> String {
        let mut txt = String::new();
        txt.push('\n');
        txt.push_str(&self.title);
        if !self.desc.is_empty() {
            txt.push(':');
            txt.push_str(&self.desc);
        }
        txt.push_str(&format!("\nFile:{}", self.file));
        if let Some(line) = self.line {
            txt.push_str(&format!("\nLine:{line}"));
        }
        if let Some(col) = self.col {
            txt.push_str(&format!("\nColumn:{col}"));
        }
        if let Some(end_line) = self.end_line {
            txt.push_str(&format!("\nEndLine:{end_line}"));
        }
        if let Some(end_col) = self.end_col {
            txt.push_str(&format!("\nEndColumn:{end_col}"));
        }
        txt
    }

    /// One-line message used for the report entry and for annotations.
    pub fn message(&self) -> String {
        let body = if self.desc.is_empty() {
            &self.title
        } else {
            &self.desc
        };
        match self.line {
            Some(line) => format!("{}:{} {}", self.file, line, body),
            None => format!("{} {}", self.file, body),
        }
    }
}

/// Kind of a report entry, matching the JUnit result elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Skipped,
    Error,
    Failure,
}

impl ResultKind {
    pub fn element(self) -> &'static str {
        match self {
            ResultKind::Skipped => "skipped",
            ResultKind::Error => "error",
            ResultKind::Failure => "failure",
        }
    }

    pub fn from_element(name: &str) -> Option<Self> {
        match name {
            "skipped" => Some(ResultKind::Skipped),
            "error" => Some(ResultKind::Error),
            "failure" => Some(ResultKind::Failure),
            _ => None,
        }
    }
}

/// One result entry on a test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseResult {
    pub kind: ResultKind,
    pub message: String,
    /// The `type` attribute: "failure", "skip", "error", or a finding severity.
    pub type_attr: String,
    /// Free-text body, trailing whitespace trimmed.
    pub text: String,
}

impl CaseResult {
    /// Whether this entry marks its check as failed (rather than warning-only).
    pub fn is_problem(&self) -> bool {
        matches!(self.type_attr.as_str(), "error" | "failure")
    }
}

/// Per-invocation result accumulator for one check.
///
/// Constructed immediately before the check runs and turned into a report
/// case afterwards; never reused across runs.
#[derive(Debug)]
pub struct CaseData {
    pub name: String,
    pub results: Vec<CaseResult>,
    /// Formatted findings kept aside for annotation emission.
    pub findings: Vec<Finding>,
}

impl CaseData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            results: Vec::new(),
            findings: Vec::new(),
        }
    }

    fn push(&mut self, kind: ResultKind, message: String, type_attr: &str, text: &str) {
        self.results.push(CaseResult {
            kind,
            message,
            type_attr: type_attr.to_string(),
            text: text.trim_end().to_string(),
        });
    }

    /// Record one plain failure. May be called many times per run.
    pub fn failure(&mut self, text: &str) {
        self.push(
            ResultKind::Failure,
            format!("{} issues", self.name),
            "failure",
            text,
        );
    }

    /// Record one formatted failure with position data.
    pub fn fmtd_failure(&mut self, finding: Finding) {
        self.push(
            ResultKind::Failure,
            finding.message(),
            finding.severity.as_str(),
            &finding.text(),
        );
        self.findings.push(finding);
    }

    /// Record the skip entry for an unwound check.
    pub fn record_skip(&mut self, text: &str) {
        self.push(
            ResultKind::Skipped,
            format!("{} skipped", self.name),
            "skip",
            text,
        );
    }

    /// Record the infrastructure-error entry for an unwound check.
    pub fn record_error(&mut self, text: &str) {
        self.push(
            ResultKind::Error,
            format!("{} error", self.name),
            "error",
            text,
        );
    }
}

/// Early termination of a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Abort {
    /// Preconditions not met; not a failure.
    Skip(String),
    /// The check could not be evaluated at all.
    Error(String),
}

/// What a check's `run` returns.
pub type RunOutcome = Result<(), Abort>;

/// End the check as skipped. Use as `return check::skip("...")`.
pub fn skip(reason: impl Into<String>) -> RunOutcome {
    Err(Abort::Skip(reason.into()))
}

/// End the check with an infrastructure error.
pub fn error(reason: impl Into<String>) -> RunOutcome {
    Err(Abort::Error(reason.into()))
}

/// Where a check conceptually executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathHint {
    GitTop,
    WorkspaceBase,
    ZephyrBase,
}

/// Immutable context shared by reference with every check invocation.
pub struct CheckContext {
    /// Top-level repository directory.
    pub git_top: PathBuf,
    /// Workspace root (`WORKSPACE_BASE` env or the git top).
    pub workspace_base: PathBuf,
    /// Zephyr tree, `<workspace>/deps/zephyr`.
    pub zephyr_base: PathBuf,
    /// Resolved target scope.
    pub scope: Scope,
    /// Whether per-check output files may be written.
    pub case_output: bool,
}

impl CheckContext {
    pub fn resolve_hint(&self, hint: PathHint) -> &Path {
        match hint {
            PathHint::GitTop => &self.git_top,
            PathHint::WorkspaceBase => &self.workspace_base,
            PathHint::ZephyrBase => &self.zephyr_base,
        }
    }
}

/// The Check trait defines a single compliance check.
///
/// Object-safe to allow dynamic dispatch via `Box<dyn Check>`.
pub trait Check {
    /// Stable identifier, case-insensitive unique within the registry.
    fn name(&self) -> &'static str;

    /// Reference to the rule set being checked.
    fn doc(&self) -> &'static str;

    /// The directory the check conceptually runs in.
    fn path_hint(&self) -> PathHint {
        PathHint::GitTop
    }

    /// Run the check, appending findings to `case`.
    ///
    /// Implementations should:
    /// - return `check::skip(..)` if prerequisites are missing
    /// - return `check::error(..)` if the check cannot be evaluated
    /// - call `case.failure(..)` / `case.fmtd_failure(..)` for each issue
    fn run(&self, ctx: &CheckContext, case: &mut CaseData) -> RunOutcome;
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
