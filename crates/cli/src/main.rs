// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! Comply CLI entry point.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use comply::cli::{Cli, LogLevel};

fn init_logging(level: Option<LogLevel>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level.as_filter()),
        None => EnvFilter::try_from_env("COMPLY_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.loglevel);

    // The exit code is the number of failed plus warning-only checks;
    // fatal driver errors exit 2 through a distinct path.
    match comply::runner::run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("comply: error: {e:#}");
            std::process::exit(2);
        }
    }
}
