//! Dependency linking pass
//!
//! Links every extracted function, method, and class to the other known
//! top-level symbols its text calls. Linking is purely name-based: no type
//! resolution, no member-access calls, same file only. Known limitations,
//! kept deliberately:
//!
//! - two same-named symbols from different scopes are not distinguished
//! - calls through member access (`obj.method()`) are invisible
//! - method names are not link targets, so method-to-method calls inside a
//!   class produce no edge
//!
//! The pass is pure: raw symbols in, fully-linked [`AnalysisResult`] out.
//! Nothing is mutated after assembly.

use crate::report::{AnalysisResult, ClassInfo, FunctionInfo};
use crate::symbol::{RawClass, RawFunction};
use std::collections::HashSet;

/// Link raw symbols into the final analysis result
///
/// Known symbols are the top-level function names plus the class names.
/// Method names are excluded.
pub fn link(functions: Vec<RawFunction>, classes: Vec<RawClass>) -> AnalysisResult {
    let known: HashSet<&str> = functions
        .iter()
        .map(|f| f.name.as_str())
        .chain(classes.iter().map(|c| c.name.as_str()))
        .collect();

    let linked_functions = functions
        .iter()
        .map(|f| link_function(f, &known))
        .collect();
    let linked_classes = classes.iter().map(|c| link_class(c, &known)).collect();

    AnalysisResult {
        functions: linked_functions,
        classes: linked_classes,
    }
}

fn link_function(raw: &RawFunction, known: &HashSet<&str>) -> FunctionInfo {
    FunctionInfo {
        name: raw.name.clone(),
        signature: raw.signature.clone(),
        dependencies: resolve(&raw.callees, &raw.name, known),
    }
}

fn link_class(raw: &RawClass, known: &HashSet<&str>) -> ClassInfo {
    ClassInfo {
        name: raw.name.clone(),
        signature: raw.signature.clone(),
        methods: raw.methods.iter().map(|m| link_function(m, known)).collect(),
        dependencies: resolve(&raw.callees, &raw.name, known),
    }
}

/// Filter callee names down to dependency edges
///
/// Skips self-calls and unknown names; keeps set semantics with first-seen
/// order.
fn resolve(callees: &[String], owner: &str, known: &HashSet<&str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut dependencies = Vec::new();
    for callee in callees {
        if callee == owner || !known.contains(callee.as_str()) {
            continue;
        }
        if seen.insert(callee.as_str()) {
            dependencies.push(callee.clone());
        }
    }
    dependencies
}
