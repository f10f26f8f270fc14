//! Raw symbol model produced by extraction
//!
//! These types carry what the parser saw, before the linking pass filters
//! callee names against the file's known symbols. They flow only between the
//! parser seam and the linker; the output model lives in `report`.

/// A function or method as extracted from the syntax tree
#[derive(Debug, Clone)]
pub struct RawFunction {
    pub name: String,
    /// Declaration text up to (not including) the body block, trimmed.
    /// A declaration with no body keeps its full text.
    pub signature: String,
    /// Start byte of the declaration node; node identity within one pass
    pub start: usize,
    /// Bare-identifier callee names found in the body, in source order,
    /// unfiltered and with duplicates
    pub callees: Vec<String>,
}

/// A class declaration as extracted from the syntax tree
#[derive(Debug, Clone)]
pub struct RawClass {
    pub name: String,
    pub signature: String,
    pub start: usize,
    /// Methods directly in the class body, in source order
    pub methods: Vec<RawFunction>,
    /// Callee names from the whole class declaration text, not just the
    /// union of its methods' bodies
    pub callees: Vec<String>,
}
