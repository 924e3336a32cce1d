// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! Environment isolation between checks.
//!
//! [`EnvSnapshot`] captures the full environment variable set on
//! construction and restores it exactly on drop, so a check cannot leak
//! configuration to the next one no matter how it exits (return, abort,
//! or panic unwinding through the fault barrier).

use std::collections::HashMap;
use std::env;
use std::ffi::OsString;

/// RAII snapshot of the process environment.
pub struct EnvSnapshot {
    saved: HashMap<OsString, OsString>,
}

impl EnvSnapshot {
    /// Capture the current environment.
    pub fn capture() -> Self {
        Self {
            saved: env::vars_os().collect(),
        }
    }
}

impl Drop for EnvSnapshot {
    // set_var/remove_var are unsafe in edition 2024 because of concurrent
    // getenv callers; the check runner is strictly single-threaded.
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        let current: Vec<OsString> = env::vars_os().map(|(key, _)| key).collect();
        for key in current {
            if !self.saved.contains_key(&key) {
                unsafe { env::remove_var(&key) };
            }
        }
        for (key, value) in &self.saved {
            unsafe { env::set_var(key, value) };
        }
    }
}

#[cfg(test)]
#[path = "envguard_tests.rs"]
mod tests;
