// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Groble Gark LLC

//! Devicetree bindings check.
//!
//! Parses binding YAML files directly and flags unwanted property
//! declarations: names with underscores (unless allowlisted) and the
//! redundant `required: false`. Child bindings are checked recursively.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::check::{self, CaseData, Check, CheckContext, RunOutcome};
use crate::checks::files_in_scope;
use crate::scope::Mode;
use crate::walker;

const BINDINGS_PATH: &str = "dts/bindings/";

pub struct DevicetreeBindings;

impl Check for DevicetreeBindings {
    fn name(&self) -> &'static str {
        "DevicetreeBindings"
    }

    fn doc(&self) -> &'static str {
        "See https://docs.zephyrproject.org/latest/build/dts/bindings-syntax.html for more details."
    }

    fn run(&self, ctx: &CheckContext, case: &mut CaseData) -> RunOutcome {
        let bindings = binding_files(ctx)?;
        let allowlist = load_allowlist(&ctx.git_top);

        for binding in bindings {
            let path = ctx.git_top.join(&binding);
            let Ok(content) = std::fs::read_to_string(&path) else {
                continue;
            };
            let Ok(doc) = serde_yaml::from_str::<Value>(&content) else {
                case.failure(&format!("{}: not valid YAML", binding.display()));
                continue;
            };
            check_binding(case, &binding, &doc, &allowlist);
        }
        Ok(())
    }
}

fn is_binding_yaml(path: &Path) -> bool {
    let p = path.to_string_lossy().replace('\\', "/");
    (p.starts_with(BINDINGS_PATH) || p.contains(&format!("/{BINDINGS_PATH}")))
        && p.ends_with(".yaml")
}

/// The binding files to inspect under the current scope.
fn binding_files(ctx: &CheckContext) -> Result<Vec<PathBuf>, crate::check::Abort> {
    let files = files_in_scope(ctx)?;
    let changed: Vec<PathBuf> = files.into_iter().filter(|f| is_binding_yaml(f)).collect();

    match ctx.scope.mode {
        Mode::Path | Mode::Default => {
            if changed.is_empty() {
                check::skip("no devicetree bindings found in selected paths")?;
            }
            Ok(changed)
        }
        Mode::Diff => {
            if changed.is_empty() {
                check::skip("no changes to bindings were made")?;
            }
            // Re-scan every binding under the roots that changed, so a
            // changed include is checked together with its siblings.
            let roots: BTreeSet<PathBuf> = changed
                .iter()
                .filter_map(|f| {
                    let p = f.to_string_lossy().replace('\\', "/");
                    p.find(BINDINGS_PATH)
                        .map(|idx| PathBuf::from(&p[..idx + BINDINGS_PATH.len()]))
                })
                .collect();
            let roots: Vec<PathBuf> = roots.into_iter().collect();
            Ok(walker::files_from_paths(&ctx.git_top, &roots)
                .into_iter()
                .filter(|f| is_binding_yaml(f))
                .collect())
        }
    }
}

fn load_allowlist(git_top: &Path) -> BTreeSet<String> {
    let path = git_top.join("bindings_properties_allowlist.yaml");
    let Ok(content) = std::fs::read_to_string(&path) else {
        return BTreeSet::new();
    };
    match serde_yaml::from_str::<Vec<String>>(&content) {
        Ok(names) => names.into_iter().collect(),
        Err(_) => BTreeSet::new(),
    }
}

/// Check one binding document and, recursively, its child bindings.
fn check_binding(case: &mut CaseData, path: &Path, doc: &Value, allowlist: &BTreeSet<String>) {
    let compatible = doc
        .get("compatible")
        .and_then(Value::as_str)
        .unwrap_or("unknown");

    if let Some(props) = doc.get("properties").and_then(Value::as_mapping) {
        for (name, spec) in props {
            let Some(name) = name.as_str() else {
                continue;
            };

            if name.contains('_') && !allowlist.contains(name) {
                let better = name.replace('_', "-");
                case.failure(&format!(
                    "{}: property '{}' contains underscores.\n\
                     \tUse '{}' instead unless this property name is from Linux\n\
                     Or another authoritative upstream source of bindings for compatible '{}'.\n\
                     \tHint: update 'bindings_properties_allowlist.yaml' if you need to \
                     override this check for this property.",
                    path.display(),
                    name,
                    better,
                    compatible,
                ));
            }

            if spec.get("required").and_then(Value::as_bool) == Some(false) {
                case.failure(&format!(
                    "{}: property \"{}\": 'required: false' is redundant, please remove",
                    path.display(),
                    name,
                ));
            }
        }
    }

    if let Some(child) = doc.get("child-binding") {
        check_binding(case, path, child, allowlist);
    }
}

#[cfg(test)]
#[path = "devicetree_bindings_tests.rs"]
mod tests;
