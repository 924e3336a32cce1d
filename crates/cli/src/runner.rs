// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! Sequential check runner with environment isolation and a fault barrier.
//!
//! Checks run strictly back-to-back in registry order; they mutate shared
//! process state (environment variables, shared-name temp files), so the
//! runner must not be parallelized without redesigning the isolation.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;

use crate::annotate;
use crate::check::{Abort, CaseData, Check, CheckContext};
use crate::checks::{self, Selection};
use crate::cli::Cli;
use crate::envguard::EnvSnapshot;
use crate::error::Error;
use crate::git;
use crate::junit;
use crate::output;
use crate::report::{Suite, TestCase};
use crate::scope::Scope;

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Execute one check inside the environment guard and the fault barrier.
///
/// A panic becomes one failure entry carrying the check name and panic
/// message; findings recorded before the panic are kept. The environment
/// is restored on every exit path.
pub fn run_check(check: &dyn Check, ctx: &CheckContext) -> CaseData {
    let mut case = CaseData::new(check.name());
    let _env = EnvSnapshot::capture();

    let outcome = catch_unwind(AssertUnwindSafe(|| check.run(ctx, &mut case)));
    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(Abort::Skip(reason))) => case.record_skip(&reason),
        Ok(Err(Abort::Error(reason))) => case.record_error(&reason),
        Err(payload) => {
            case.failure(&format!(
                "A panic occurred in {}:\n{}",
                check.name(),
                panic_message(payload.as_ref())
            ));
        }
    }
    case
}

/// Top-level driver: resolve scope, iterate the filtered registry, merge
/// results, write the report, and return the exit status (failed plus
/// warning-only check count).
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    let cwd = std::env::current_dir()?;
    let git_top = git::discover_top(&cwd)?;
    let workspace_base = match std::env::var_os("WORKSPACE_BASE") {
        Some(base) => std::path::PathBuf::from(base),
        None => git_top.clone(),
    };
    let zephyr_base = workspace_base.join("deps").join("zephyr");

    let scope = Scope::resolve(&cli.paths, cli.commits.as_deref());
    tracing::info!("running checks in '{}' mode", scope.mode);

    if cli.list {
        for name in checks::check_names() {
            println!("{name}");
        }
        return Ok(0);
    }

    let mut suite = match &cli.previous_run {
        Some(path) => {
            if !path.exists() {
                return Err(Error::PriorRunMissing { path: path.clone() }.into());
            }
            tracing::info!("loading previous results from {}", path.display());
            junit::load_suite(path)?
        }
        None => Suite::new("Compliance"),
    };

    let ctx = CheckContext {
        git_top,
        workspace_base,
        zephyr_base,
        scope,
        case_output: !cli.no_case_output,
    };

    let include: Vec<String> = cli.module.iter().map(|s| s.to_lowercase()).collect();
    let exclude: Vec<String> = cli.exclude_module.iter().map(|s| s.to_lowercase()).collect();

    for check in checks::all_checks() {
        match checks::selection(check.name(), &include, &exclude) {
            Selection::NotIncluded => continue,
            Selection::Excluded => {
                output::print_skipping(check.name())?;
                continue;
            }
            Selection::Run => {}
        }

        output::print_running(check.name(), ctx.resolve_hint(check.path_hint()))?;
        let case = run_check(check.as_ref(), &ctx);

        if cli.annotate {
            for finding in &case.findings {
                annotate::print_annotation(finding);
            }
        }
        suite.merge_case(case.into());
    }

    if !cli.output.is_empty() {
        junit::write_report(Path::new(&cli.output), &suite)?;
    }

    let (failed, warning) = suite.summarize();
    if !failed.is_empty() || !warning.is_empty() {
        output::print_summary(&failed, &warning)?;

        if ctx.case_output {
            let cases: Vec<&TestCase> = failed.iter().chain(warning.iter()).copied().collect();
            crate::report::write_case_outputs(&cwd, &cases, checks::doc_for)?;
        }
    }

    if !cli.output.is_empty() {
        println!("\nComplete results in {}", cli.output);
    }
    Ok((failed.len() + warning.len()) as i32)
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
