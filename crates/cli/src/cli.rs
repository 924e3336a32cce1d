// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::Parser;

/// Check for coding style and documentation warnings
#[derive(Parser)]
#[command(name = "comply")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Commit range in the form: a..[b], default is HEAD~1..HEAD
    #[arg(short = 'c', long = "commits", value_name = "RANGE")]
    pub commits: Option<String>,

    /// Name of outfile in JUnit format; empty disables report writing
    #[arg(
        short = 'o',
        long = "output",
        default_value = "compliance.xml",
        value_name = "FILE"
    )]
    pub output: String,

    /// Do not store the individual test case output
    #[arg(short = 'n', long = "no-case-output")]
    pub no_case_output: bool,

    /// List all checks and exit
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Console log level
    #[arg(short = 'v', long = "loglevel", value_enum)]
    pub loglevel: Option<LogLevel>,

    /// Checks to run; all checks by default (case insensitive)
    #[arg(short = 'm', long = "module", value_name = "NAME")]
    pub module: Vec<String>,

    /// Do not run the specified checks (case insensitive)
    #[arg(short = 'e', long = "exclude-module", value_name = "NAME")]
    pub exclude_module: Vec<String>,

    /// Pre-load JUnit results from a previous run and combine with new results
    #[arg(short = 'j', long = "previous-run", value_name = "FILE")]
    pub previous_run: Option<PathBuf>,

    /// Print GitHub Actions-compatible annotations
    #[arg(long)]
    pub annotate: bool,

    /// Application directory to analyze (can be specified multiple times).
    /// Default: main_node, secondary_node
    #[arg(short = 'p', long = "path", value_name = "DIR")]
    pub paths: Vec<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive string for the tracing env filter.
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
