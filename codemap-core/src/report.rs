//! Output model and rendering
//!
//! Global invariants enforced:
//! - Deterministic output ordering
//! - Byte-for-byte identical output across runs

use serde::{Deserialize, Serialize};

/// A top-level function or a class method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionInfo {
    pub name: String,
    /// Declaration text up to the body block, trimmed
    pub signature: String,
    /// Names of other known top-level symbols this function's body calls,
    /// first-seen order, no duplicates
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub dependencies: Vec<String>,
}

/// A class declaration with its methods
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub name: String,
    /// Class header rendered as `"<header> { ... }"`
    pub signature: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub methods: Vec<FunctionInfo>,
    /// Known symbols called anywhere in the class declaration's text; not
    /// the union of the methods' dependencies
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub dependencies: Vec<String>,
}

/// Structure of one analyzed source file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub functions: Vec<FunctionInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub classes: Vec<ClassInfo>,
}

impl AnalysisResult {
    /// True when the file yielded no extractable symbols
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.classes.is_empty()
    }
}

/// Analysis result paired with its source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStructure {
    pub file: String,
    pub language: String,
    pub structure: AnalysisResult,
}

/// Sort file structures deterministically by path
pub fn sort_structures(mut structures: Vec<FileStructure>) -> Vec<FileStructure> {
    structures.sort_by(|a, b| a.file.cmp(&b.file));
    structures
}

/// Render file structures as text output
pub fn render_text(structures: &[FileStructure]) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:<36} {:<10} {:<28} {}\n",
        "FILE", "KIND", "SYMBOL", "DEPENDENCIES"
    ));

    for fs in structures {
        for function in &fs.structure.functions {
            push_row(&mut output, &fs.file, "function", &function.name, &function.dependencies);
        }
        for class in &fs.structure.classes {
            push_row(&mut output, &fs.file, "class", &class.name, &class.dependencies);
            for method in &class.methods {
                let qualified = format!("{}.{}", class.name, method.name);
                push_row(&mut output, &fs.file, "method", &qualified, &method.dependencies);
            }
        }
    }

    output
}

fn push_row(output: &mut String, file: &str, kind: &str, symbol: &str, dependencies: &[String]) {
    let deps = if dependencies.is_empty() {
        "-".to_string()
    } else {
        dependencies.join(", ")
    };
    output.push_str(&format!(
        "{:<36} {:<10} {:<28} {}\n",
        truncate_or_pad(file, 36),
        kind,
        truncate_or_pad(symbol, 28),
        deps
    ));
}

/// Render file structures as JSON output
pub fn render_json(structures: &[FileStructure]) -> String {
    serde_json::to_string_pretty(structures).unwrap_or_else(|_| "[]".to_string())
}

/// Truncate or pad string to fixed width
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.len() > width {
        format!("{}...", &s[..width.saturating_sub(3)])
    } else {
        format!("{:<width$}", s, width = width)
    }
}
