// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! Unit tests for console output.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::Path;

use super::*;
use crate::check::CaseData;
use crate::report::TestCase;

#[test]
fn printing_banners_succeeds() {
    print_running("Checkpatch", Path::new("/repo")).unwrap();
    print_skipping("Kconfig").unwrap();
}

#[test]
fn summary_handles_empty_and_nonempty_sets() {
    print_summary(&[], &[]).unwrap();

    let mut case = CaseData::new("Demo");
    case.failure("body");
    let case: TestCase = case.into();
    print_summary(&[&case], &[]).unwrap();
}
