// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! GitHub Actions-compatible annotation emission.
//!
//! One line per formatted finding:
//! `::<severity> file=<path>[,line=N][,col=N][,endLine=N][,endColumn=N],title=<t>::<message>`
//! with `%`, newline, and carriage return percent-escaped in the message.

use percent_encoding::{AsciiSet, utf8_percent_encode};

use crate::check::Finding;

/// Only `%`, `\n`, and `\r` are escaped; everything else passes through.
const MESSAGE_ESCAPES: &AsciiSet = &AsciiSet::EMPTY.add(b'%').add(b'\n').add(b'\r');

/// Format one annotation line for a finding.
pub fn format_annotation(finding: &Finding) -> String {
    let msg = utf8_percent_encode(&finding.message(), MESSAGE_ESCAPES).to_string();

    let mut line = format!("::{} file={}", finding.severity, finding.file);
    if let Some(n) = finding.line {
        line.push_str(&format!(",line={n}"));
    }
    if let Some(n) = finding.col {
        line.push_str(&format!(",col={n}"));
    }
    if let Some(n) = finding.end_line {
        line.push_str(&format!(",endLine={n}"));
    }
    if let Some(n) = finding.end_col {
        line.push_str(&format!(",endColumn={n}"));
    }
    line.push_str(&format!(",title={}::{}", finding.title, msg));
    line
}

/// Print an annotation line to standard output.
pub fn print_annotation(finding: &Finding) {
    println!("{}", format_annotation(finding));
}

#[cfg(test)]
#[path = "annotate_tests.rs"]
mod tests;
