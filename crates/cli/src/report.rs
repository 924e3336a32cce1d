// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! Report suite: aggregation, prior-run merging, and classification.

use std::path::Path;

use crate::check::{CaseData, CaseResult, ResultKind};
use crate::error::{Error, Result};

/// Classname attribute carried by every test case.
pub const CLASSNAME: &str = "Guidelines";

/// One test case: the outcome of one executed check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub name: String,
    pub classname: String,
    pub results: Vec<CaseResult>,
}

impl From<CaseData> for TestCase {
    fn from(case: CaseData) -> Self {
        TestCase {
            name: case.name,
            classname: CLASSNAME.to_string(),
            results: case.results,
        }
    }
}

impl TestCase {
    pub fn is_skipped(&self) -> bool {
        self.results
            .iter()
            .any(|r| r.kind == ResultKind::Skipped)
    }
}

/// How a case counts towards the run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseClass {
    /// No result entries at all.
    Clean,
    /// Skipped; excluded from both counts.
    Skipped,
    /// At least one error/failure-kind entry.
    Failed,
    /// Only warning/notice-kind entries.
    Warning,
}

pub fn classify(case: &TestCase) -> CaseClass {
    if case.results.is_empty() {
        CaseClass::Clean
    } else if case.is_skipped() {
        CaseClass::Skipped
    } else if case.results.iter().any(CaseResult::is_problem) {
        CaseClass::Failed
    } else {
        CaseClass::Warning
    }
}

/// Suite statistics written to the report header.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub tests: usize,
    pub failures: usize,
    pub errors: usize,
    pub skipped: usize,
}

/// Ordered collection of at most one case per check name.
#[derive(Debug, Clone)]
pub struct Suite {
    pub name: String,
    pub cases: Vec<TestCase>,
}

impl Suite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    /// Insert a case, replacing any existing entry of the same name.
    ///
    /// The most recent execution wins outright, regardless of outcome
    /// kind; cases not re-run keep their prior entry.
    pub fn merge_case(&mut self, case: TestCase) {
        match self.cases.iter_mut().find(|c| c.name == case.name) {
            Some(existing) => *existing = case,
            None => self.cases.push(case),
        }
    }

    pub fn statistics(&self) -> Stats {
        let mut stats = Stats {
            tests: self.cases.len(),
            ..Stats::default()
        };
        for case in &self.cases {
            if case.results.iter().any(|r| r.kind == ResultKind::Error) {
                stats.errors += 1;
            } else if case.results.iter().any(|r| r.kind == ResultKind::Failure) {
                stats.failures += 1;
            } else if case.is_skipped() {
                stats.skipped += 1;
            }
        }
        stats
    }

    /// Split cases into (failed, warning-only), logging skips.
    pub fn summarize(&self) -> (Vec<&TestCase>, Vec<&TestCase>) {
        let mut failed = Vec::new();
        let mut warning = Vec::new();
        for case in &self.cases {
            match classify(case) {
                CaseClass::Failed => failed.push(case),
                CaseClass::Warning => warning.push(case),
                CaseClass::Skipped => tracing::warn!("skipped {}", case.name),
                CaseClass::Clean => tracing::info!("no result for {}", case.name),
            }
        }
        (failed, warning)
    }
}

/// Write one `<check-name>.txt` per failing/warning check.
///
/// Each file holds the check's documentation string followed by every
/// result entry's text body.
pub fn write_case_outputs(
    dir: &Path,
    cases: &[&TestCase],
    doc_for: impl Fn(&str) -> Option<&'static str>,
) -> Result<()> {
    for case in cases {
        let mut body = String::new();
        body.push_str(doc_for(&case.name).unwrap_or(""));
        body.push('\n');
        for res in &case.results {
            body.push_str(&format!("\n {}", res.text.trim()));
        }
        let path = dir.join(format!("{}.txt", case.name));
        std::fs::write(&path, body).map_err(|e| Error::io(&path, e))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
