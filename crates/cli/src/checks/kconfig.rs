// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! Kconfig symbol hygiene check.
//!
//! Scans the Kconfig trees of the workspace (and the Zephyr tree when
//! present) for defined symbols, then flags:
//! - boolean prompts that start with "Enable"
//! - symbols defined with a prompt or help text in defconfig files
//! - `CONFIG_*` references outside Kconfig files to undefined symbols
//!
//! Not applicable in diff mode; a symbol table only makes sense against a
//! full tree.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::check::{self, CaseData, Check, CheckContext, RunOutcome};
use crate::scope::Mode;
use crate::walker::{self, IGNORE_PATH_PARTS};

#[allow(clippy::expect_used)]
static CONFIG_DEF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:menu)?config\s+([A-Z0-9_]+)\s*(?:#.*)?$").expect("valid regex")
});

#[allow(clippy::expect_used)]
static CHOICE_DEF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*choice\s+([A-Z0-9_]+)\s*$").expect("valid regex"));

#[allow(clippy::expect_used)]
static LOG_MODULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*module\s*=\s*([A-Z0-9_]+)\s*(?:#.*)?$").expect("valid regex"));

#[allow(clippy::expect_used)]
static BOOL_PROMPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*(?:bool|prompt)\s+"([^"]*)""#).expect("valid regex"));

#[allow(clippy::expect_used)]
static PROMPT_OR_HELP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(?:help\b|prompt\s+"|(?:bool|string|int|hex)\s+")"#).expect("valid regex")
});

#[allow(clippy::expect_used)]
static CONFIG_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bCONFIG_[A-Z0-9_]+").expect("valid regex"));

/// Symbols generated by the logging template for each `module = FOO` line.
const LOG_LEVEL_SUFFIXES: &[&str] = &[
    "_LOG_LEVEL",
    "_LOG_LEVEL_DBG",
    "_LOG_LEVEL_ERR",
    "_LOG_LEVEL_INF",
    "_LOG_LEVEL_WRN",
    "_LOG_LEVEL_OFF",
    "_LOG_LEVEL_INHERIT",
    "_LOG_LEVEL_DEFAULT",
];

/// Symbols referenced without a definition on purpose (docs, examples,
/// settings consumed by other build systems). Sorted, no CONFIG_ prefix.
const UNDEF_ALLOWLIST: &[&str] = &[
    "ALSO_MISSING",
    "APP_LINK_WITH_",
    "APP_LOG_LEVEL",
    "BOARD_",
    "DESCRIPTION",
    "ERR",
    "EXPERIMENTAL",
    "FLAG",
    "FOO",
    "FOO_LOG_LEVEL",
    "FOO_SETTING_1",
    "FOO_SETTING_2",
    "MISSING",
    "MODULES",
    "MYFEATURE",
    "MY_DRIVER_0",
    "OPT",
    "OPT_0",
    "SEL",
    "SHIFT",
    "SOC_SERIES_",
    "SOME_BOOL",
    "SOME_INT",
    "SOME_OTHER_BOOL",
    "SOME_STRING",
    "STACK_SIZE",
    "TEST1",
    "TYPE_BOOLEAN",
    "USB_CONSOLE",
    "USE_STDC_",
    "WHATEVER",
];

pub struct Kconfig;

impl Check for Kconfig {
    fn name(&self) -> &'static str {
        "Kconfig"
    }

    fn doc(&self) -> &'static str {
        "See https://docs.zephyrproject.org/latest/build/kconfig/tips.html for more details."
    }

    fn run(&self, ctx: &CheckContext, case: &mut CaseData) -> RunOutcome {
        if ctx.scope.mode == Mode::Diff {
            return check::skip(
                "Kconfig checks are not applicable in diff mode (use -p or default mode)",
            );
        }

        let analyze_all = ctx.scope.paths.iter().any(|p| p == Path::new("."));
        let app_dirs: Vec<PathBuf> = if analyze_all {
            top_level_dirs(&ctx.git_top)
        } else {
            ctx.scope
                .paths
                .iter()
                .filter(|p| *p != Path::new("."))
                .cloned()
                .collect()
        };

        let kconfig_files = collect_kconfig_files(ctx);
        let defined = defined_symbols(&kconfig_files);

        // Structure checks only cover the workspace tree, not Zephyr's.
        for file in &kconfig_files {
            if file.starts_with(&ctx.zephyr_base) {
                continue;
            }
            check_enable_prompts(case, &ctx.git_top, file);
            check_defconfig_definitions(case, &ctx.git_top, file);
        }

        check_undef_references(ctx, case, &defined, &app_dirs);
        Ok(())
    }
}

fn top_level_dirs(git_top: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(git_top) else {
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .filter(|e| e.path().is_dir())
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_none_or(|n| !IGNORE_PATH_PARTS.contains(&n))
        })
        .map(|e| PathBuf::from(e.file_name()))
        .collect();
    dirs.sort();
    dirs
}

/// Absolute paths of every Kconfig file in the workspace and Zephyr trees.
fn collect_kconfig_files(ctx: &CheckContext) -> Vec<PathBuf> {
    let is_kconfig = |p: &Path| {
        p.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("Kconfig"))
    };

    let mut files: Vec<PathBuf> = walker::files_from_paths(&ctx.git_top, &[PathBuf::from(".")])
        .into_iter()
        .filter(|f| is_kconfig(f))
        .map(|f| ctx.git_top.join(f))
        .collect();

    // deps/ is excluded from the workspace walk, so the Zephyr tree needs
    // its own pass.
    if ctx.zephyr_base.is_dir() {
        files.extend(
            walker::files_from_paths(&ctx.zephyr_base, &[PathBuf::from(".")])
                .into_iter()
                .filter(|f| is_kconfig(f))
                .map(|f| ctx.zephyr_base.join(f)),
        );
    }
    files
}

/// Every symbol name defined in the given Kconfig files, plus the
/// logging-template symbols derived from `module =` lines.
fn defined_symbols(kconfig_files: &[PathBuf]) -> BTreeSet<String> {
    let mut defined = BTreeSet::new();
    for file in kconfig_files {
        let Ok(content) = std::fs::read_to_string(file) else {
            continue;
        };
        for line in content.lines() {
            if let Some(caps) = CONFIG_DEF.captures(line).or_else(|| CHOICE_DEF.captures(line)) {
                if let Some(name) = caps.get(1) {
                    defined.insert(name.as_str().to_string());
                }
            }
            if let Some(caps) = LOG_MODULE.captures(line) {
                if let Some(name) = caps.get(1) {
                    for suffix in LOG_LEVEL_SUFFIXES {
                        defined.insert(format!("{}{}", name.as_str(), suffix));
                    }
                }
            }
        }
    }
    defined
}

fn display_rel(top: &Path, file: &Path) -> String {
    file.strip_prefix(top)
        .unwrap_or(file)
        .to_string_lossy()
        .into_owned()
}

fn check_enable_prompts(case: &mut CaseData, git_top: &Path, file: &Path) {
    let Ok(content) = std::fs::read_to_string(file) else {
        return;
    };
    let mut current: Option<String> = None;

    for line in content.lines() {
        if let Some(caps) = CONFIG_DEF.captures(line) {
            current = caps.get(1).map(|m| m.as_str().to_string());
            continue;
        }
        let Some(symbol) = &current else { continue };
        if let Some(caps) = BOOL_PROMPT.captures(line) {
            let prompt = caps.get(1).map_or("", |m| m.as_str());
            if prompt.starts_with("Enable") || prompt.starts_with("enable") {
                case.failure(&format!(
                    "\nBoolean option '{}' prompt must not start with 'Enable...'. Please\n\
                     check Kconfig guidelines.\n(defined in {})",
                    symbol,
                    display_rel(git_top, file),
                ));
            }
        }
    }
}

fn check_defconfig_definitions(case: &mut CaseData, git_top: &Path, file: &Path) {
    let name_has_defconfig = file
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.contains("defconfig"));
    if !name_has_defconfig {
        return;
    }
    let Ok(content) = std::fs::read_to_string(file) else {
        return;
    };

    let mut current: Option<String> = None;
    let mut reported: BTreeSet<String> = BTreeSet::new();

    for line in content.lines() {
        if let Some(caps) = CONFIG_DEF.captures(line) {
            current = caps.get(1).map(|m| m.as_str().to_string());
            continue;
        }
        let Some(symbol) = current.clone() else { continue };
        if PROMPT_OR_HELP.is_match(line) && reported.insert(symbol.clone()) {
            case.failure(&format!(
                "\nKconfig node '{}' found with prompt or help in {}.\n\
                 Options must not be defined in defconfig files.",
                symbol,
                display_rel(git_top, file),
            ));
        }
    }
}

/// Whether a reference site disables the undefined-symbol check:
/// `CONFIG_FOO_*`-style globs, macro pasting, and shell/CMake expansions.
fn reference_exempt(rest: &str) -> bool {
    if let Some(first) = rest.chars().next() {
        if matches!(first, '$' | '@' | '{' | '*') {
            return true;
        }
    }
    rest.trim_start().starts_with("##")
}

fn check_undef_references(
    ctx: &CheckContext,
    case: &mut CaseData,
    defined: &BTreeSet<String>,
    app_dirs: &[PathBuf],
) {
    let mut undef_to_locs: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for file in walker::files_from_paths(&ctx.git_top, app_dirs) {
        // Kconfig files define symbols; only references outside them count.
        if file
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("Kconfig"))
        {
            continue;
        }
        let Ok(bytes) = std::fs::read(ctx.git_top.join(&file)) else {
            continue;
        };
        if bytes.contains(&0) {
            continue;
        }
        let content = String::from_utf8_lossy(&bytes);

        for (idx, line) in content.lines().enumerate() {
            for m in CONFIG_REF.find_iter(line) {
                if reference_exempt(&line[m.end()..]) {
                    continue;
                }
                let sym = &m.as_str()[7..];
                let known = defined.contains(sym)
                    || UNDEF_ALLOWLIST.contains(&sym)
                    || sym
                        .strip_suffix("_MODULE")
                        .is_some_and(|base| defined.contains(base));
                if !known {
                    undef_to_locs
                        .entry(sym.to_string())
                        .or_default()
                        .push(format!("{}:{}", file.display(), idx + 1));
                }
            }
        }
    }

    if undef_to_locs.is_empty() {
        return;
    }

    let undef_desc: String = undef_to_locs
        .iter()
        .map(|(sym, locs)| format!("CONFIG_{:<35} {}\n", sym, locs.join(", ")))
        .collect();

    case.failure(&format!(
        "\nFound references to undefined Kconfig symbols. If any of these are false\n\
         positives, then add them to the undefined-symbol allowlist.\n\n\
         If the reference is for a comment like /* CONFIG_FOO_* */ (or\n\
         /* CONFIG_FOO_*_... */), then please use exactly that form (with the '*'). The\n\
         check knows not to flag it.\n\n\
         More generally, a reference followed by $, @, {{, *, or ## will never be\n\
         flagged.\n\n{undef_desc}",
    ));
}

#[cfg(test)]
#[path = "kconfig_tests.rs"]
mod tests;
