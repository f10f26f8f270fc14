//! Codemap core library - source structure extraction for TypeScript and JavaScript
//!
//! Parses each source file into a syntax tree, extracts its top-level
//! functions and classes (with methods), and links every symbol to the other
//! known symbols in the same file that its body calls.

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Analysis is strictly per-file; no state is carried between calls
// - Linking is name-based and same-file only
// - Deterministic traversal and output order
// - A file that fails to read or parse is skipped, never aborts the batch

pub mod analyzer;
pub mod config;
pub mod language;
pub mod linker;
pub mod report;
pub mod symbol;

pub use analyzer::StructureAnalyzer;
pub use config::ResolvedConfig;
pub use language::Language;
pub use report::{
    render_json, render_text, sort_structures, AnalysisResult, ClassInfo, FileStructure,
    FunctionInfo,
};

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Analyze all supported source files at the given path
///
/// `path` may be a single file or a directory tree. Files excluded by the
/// resolved configuration are not analyzed. Files are processed in parallel;
/// the result is sorted by file path.
pub fn scan_path(path: &Path, config: Option<&ResolvedConfig>) -> Result<Vec<FileStructure>> {
    let files: Vec<PathBuf> = collect_source_files(path)?
        .into_iter()
        .filter(|file| config.map_or(true, |c| c.should_include(file)))
        .collect();

    let total = files.len();
    let structures: Vec<FileStructure> = files
        .par_iter()
        .filter_map(|file| match analyze_source_file(file) {
            Ok(structure) => Some(structure),
            Err(e) => {
                log::warn!("skipping file {}: {:#}", file.display(), e);
                None
            }
        })
        .collect();

    let skipped = total - structures.len();
    if skipped > 0 {
        log::warn!("skipped {} file(s) due to read or setup errors", skipped);
    }

    Ok(sort_structures(structures))
}

/// Analyze one source file from disk
pub fn analyze_source_file(path: &Path) -> Result<FileStructure> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read file: {}", path.display()))?;
    let language = Language::from_path(path)
        .ok_or_else(|| anyhow::anyhow!("unsupported file type: {}", path.display()))?;
    let analyzer = StructureAnalyzer::for_language(language)?;
    let structure = analyzer.analyze_named(&source, &path.to_string_lossy());

    Ok(FileStructure {
        file: path.to_string_lossy().replace('\\', "/"),
        language: language.name().to_string(),
        structure,
    })
}

/// Check if a file is a supported source file
fn is_supported_source_file(filename: &str) -> bool {
    // Skip TypeScript declaration files (.d.ts)
    if filename.ends_with(".d.ts") {
        return false;
    }

    if let Some(ext) = Path::new(filename).extension().and_then(|e| e.to_str()) {
        Language::from_extension(ext).is_some()
    } else {
        false
    }
}

/// Collect all supported source files from a path (file or directory)
///
/// Supported languages and extensions:
/// - TypeScript: .ts, .mts, .cts (excludes .d.ts declaration files)
/// - TSX: .tsx
/// - JavaScript: .js, .mjs, .cjs
/// - JSX: .jsx
fn collect_source_files(path: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if path.is_file() {
        if let Some(filename) = path.file_name().and_then(|n| n.to_str()) {
            if is_supported_source_file(filename) {
                files.push(path.to_path_buf());
            }
        }
    } else if path.is_dir() {
        collect_source_files_recursive(path, &mut files)?;
    }

    // Sort files for deterministic order
    files.sort();

    Ok(files)
}

/// Returns true for directory names that should not be traversed
fn is_skipped_dir(name: &str) -> bool {
    name.starts_with('.')
        || name == "node_modules"
        || name == "dist"
        || name == "build"
        || name == "out"
        || name == "coverage"
}

/// Process one directory entry, pushing source files or recursing into dirs
fn process_dir_entry(path: PathBuf, metadata: std::fs::Metadata, files: &mut Vec<PathBuf>) -> Result<()> {
    use std::ffi::OsStr;

    if metadata.is_symlink() {
        return Ok(());
    }

    if metadata.is_dir() {
        if let Some(name) = path.file_name().and_then(|n: &OsStr| n.to_str()) {
            if is_skipped_dir(name) {
                return Ok(());
            }
        }
        collect_source_files_recursive(&path, files)?;
    } else if metadata.is_file() {
        if let Some(filename) = path.file_name().and_then(|n: &OsStr| n.to_str()) {
            if is_supported_source_file(filename) {
                files.push(path);
            }
        }
    }

    Ok(())
}

/// Recursively collect supported source files from a directory
fn collect_source_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry_result in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry_result?;
        let path = entry.path();
        let metadata = std::fs::symlink_metadata(&path)
            .with_context(|| format!("failed to read metadata: {}", path.display()))?;
        process_dir_entry(path, metadata, files)?;
    }

    Ok(())
}
