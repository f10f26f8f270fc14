//! Structure analysis orchestration - ties together parsing, extraction, and
//! dependency linking for one source file

use crate::language::{EcmaScriptParser, Language, StructureParser};
use crate::linker;
use crate::report::AnalysisResult;
use anyhow::Result;

/// Analyzes one source file's text into its function/class structure
///
/// The analyzer is stateless across calls: each `analyze` works on its own
/// freshly parsed tree and result. Independent invocations over different
/// files are safe to run in parallel.
pub struct StructureAnalyzer {
    parser: Box<dyn StructureParser>,
}

impl StructureAnalyzer {
    /// Create an analyzer over an injected parser capability
    pub fn new(parser: Box<dyn StructureParser>) -> Self {
        StructureAnalyzer { parser }
    }

    /// Create an analyzer for one of the supported languages
    pub fn for_language(language: Language) -> Result<Self> {
        Ok(Self::new(Box::new(EcmaScriptParser::new(language)?)))
    }

    /// Analyze source text into its structure
    ///
    /// Never propagates a parse failure: a source the parser cannot handle is
    /// logged and yields an empty result, so a caller iterating over many
    /// files is not aborted by one bad file.
    pub fn analyze(&self, source: &str) -> AnalysisResult {
        self.analyze_named(source, "<source>")
    }

    /// Analyze with a filename for log messages
    pub fn analyze_named(&self, source: &str, filename: &str) -> AnalysisResult {
        let parsed = match self.parser.parse(source, filename) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::warn!("parse failed for {}: {:#}", filename, e);
                return AnalysisResult::default();
            }
        };

        let functions = parsed.extract_functions();
        let classes = parsed.extract_classes();
        linker::link(functions, classes)
    }
}
