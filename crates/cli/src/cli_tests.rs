// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! Unit tests for CLI argument parsing.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use clap::Parser;

use super::*;

#[test]
fn defaults() {
    let cli = Cli::try_parse_from(["comply"]).unwrap();
    assert!(cli.commits.is_none());
    assert_eq!(cli.output, "compliance.xml");
    assert!(!cli.no_case_output);
    assert!(!cli.list);
    assert!(cli.module.is_empty());
    assert!(cli.exclude_module.is_empty());
    assert!(cli.previous_run.is_none());
    assert!(!cli.annotate);
    assert!(cli.paths.is_empty());
}

#[test]
fn repeatable_flags_accumulate() {
    let cli = Cli::try_parse_from([
        "comply", "-m", "Checkpatch", "-m", "kconfig", "-e", "ruff", "-p", "app1", "-p", "app2",
    ])
    .unwrap();
    assert_eq!(cli.module, vec!["Checkpatch", "kconfig"]);
    assert_eq!(cli.exclude_module, vec!["ruff"]);
    assert_eq!(cli.paths.len(), 2);
}

#[test]
fn commit_range_is_tracked_only_when_given() {
    let cli = Cli::try_parse_from(["comply", "-c", "main..HEAD"]).unwrap();
    assert_eq!(cli.commits.as_deref(), Some("main..HEAD"));
}

#[test]
fn output_can_be_disabled_with_empty_value() {
    let cli = Cli::try_parse_from(["comply", "-o", ""]).unwrap();
    assert!(cli.output.is_empty());
}

#[test]
fn loglevel_values_parse() {
    for (arg, expected) in [
        ("error", "error"),
        ("warn", "warn"),
        ("info", "info"),
        ("debug", "debug"),
        ("trace", "trace"),
    ] {
        let cli = Cli::try_parse_from(["comply", "-v", arg]).unwrap();
        assert_eq!(cli.loglevel.unwrap().as_filter(), expected);
    }
}
