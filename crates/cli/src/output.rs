// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! Console output: progress banners and the end-of-run summary.

use std::io::Write;
use std::path::Path;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::report::TestCase;

fn stdout() -> StandardStream {
    StandardStream::stdout(ColorChoice::Auto)
}

fn color(c: Color) -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(c));
    spec
}

/// Per-check progress banner, printed before the check runs.
pub fn print_running(name: &str, dir: &Path) -> std::io::Result<()> {
    let mut out = stdout();
    out.set_color(&color(Color::Blue))?;
    write!(out, "Running {name:<30}")?;
    out.reset()?;
    writeln!(out, " tests in {} ...", dir.display())
}

/// Printed for checks removed by an exclude filter.
pub fn print_skipping(name: &str) -> std::io::Result<()> {
    let mut out = stdout();
    out.set_color(&color(Color::Ansi256(214)))?;
    writeln!(out, "Skipping {name}")?;
    out.reset()
}

/// Failure/warning counts, then one banner and detail block per case.
///
/// Result bodies go through the error or warning log channel depending on
/// the entry kind, matching the log-level filtering of the rest of the
/// console output.
pub fn print_summary(failed: &[&TestCase], warning: &[&TestCase]) -> std::io::Result<()> {
    let mut out = stdout();

    if !failed.is_empty() {
        out.set_color(&color(Color::Red))?;
        writeln!(out, "{} check(s) failed", failed.len())?;
        out.reset()?;
    }
    if !warning.is_empty() {
        out.set_color(&color(Color::Yellow))?;
        writeln!(out, "{} check(s) with warnings only", warning.len())?;
        out.reset()?;
    }

    for case in failed.iter().chain(warning.iter()) {
        writeln!(out)?;
        out.set_color(&color(Color::Red))?;
        writeln!(out, "{}", "-".repeat(80))?;
        out.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(out, "{}", case.name)?;
        out.set_color(&color(Color::Red))?;
        writeln!(out, "{}", "-".repeat(80))?;
        out.reset()?;

        for res in &case.results {
            let errmsg = res.text.trim();
            if res.is_problem() {
                tracing::error!("test {} failed: \n{}", case.name, errmsg);
            } else {
                tracing::warn!("test {} warning: \n{}", case.name, errmsg);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
