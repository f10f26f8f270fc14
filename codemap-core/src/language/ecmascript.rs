//! TypeScript/JavaScript structure extraction using tree-sitter
//!
//! Declarations are found with query patterns rather than manual tree walks.
//! The bare patterns match a declaration at any depth, so an exported
//! declaration is reached twice (once bare, once through its export wrapper);
//! extraction deduplicates by the declaration node's start byte.

use crate::language::parser::{ParsedSource, StructureParser};
use crate::language::Language;
use crate::symbol::{RawClass, RawFunction};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::sync::Arc;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor, QueryMatch, Tree};

/// Function declarations, bare and export-wrapped. Both patterns capture the
/// inner declaration node.
const FUNCTION_QUERY: &str = r#"
(function_declaration
  name: (identifier) @name) @function

(export_statement
  declaration: (function_declaration
    name: (identifier) @name) @function)
"#;

/// Class declarations, same wrapping rule as functions. The name is matched
/// by field rather than kind because the TypeScript grammar tags class names
/// differently from the JavaScript grammar.
const CLASS_QUERY: &str = r#"
(class_declaration
  name: (_) @name) @class

(export_statement
  declaration: (class_declaration
    name: (_) @name) @class)
"#;

const METHOD_QUERY: &str = r#"
(method_definition
  name: (property_identifier) @name) @method
"#;

/// Call sites whose callee is a bare identifier. Member calls
/// (`obj.method()`) have a member-expression callee and are not matched.
const CALL_QUERY: &str = r#"
(call_expression
  function: (identifier) @callee)
"#;

/// Compiled query set for one grammar
struct EcmaQueries {
    functions: Query,
    classes: Query,
    methods: Query,
    calls: Query,
}

impl EcmaQueries {
    fn compile(grammar: &tree_sitter::Language) -> Result<Self> {
        Ok(EcmaQueries {
            functions: Query::new(grammar, FUNCTION_QUERY)
                .context("failed to compile function query")?,
            classes: Query::new(grammar, CLASS_QUERY).context("failed to compile class query")?,
            methods: Query::new(grammar, METHOD_QUERY)
                .context("failed to compile method query")?,
            calls: Query::new(grammar, CALL_QUERY).context("failed to compile call query")?,
        })
    }
}

/// ECMAScript-family parser using tree-sitter
pub struct EcmaScriptParser {
    language: Language,
    queries: Arc<EcmaQueries>,
}

impl EcmaScriptParser {
    /// Create a parser for one language variant, compiling its queries
    pub fn new(language: Language) -> Result<Self> {
        let grammar = language.grammar();

        // Validate the grammar loads before the first parse call
        let mut parser = Parser::new();
        parser
            .set_language(&grammar)
            .with_context(|| format!("failed to set {} language for parser", language.name()))?;

        let queries = Arc::new(EcmaQueries::compile(&grammar)?);
        Ok(EcmaScriptParser { language, queries })
    }
}

impl StructureParser for EcmaScriptParser {
    fn parse(&self, source: &str, filename: &str) -> Result<Box<dyn ParsedSource>> {
        // tree-sitter parsers are stateful, so each parse gets a fresh one
        let mut parser = Parser::new();
        parser
            .set_language(&self.language.grammar())
            .with_context(|| format!("failed to set {} language", self.language.name()))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse {}", filename))?;

        Ok(Box::new(EcmaScriptSource {
            tree,
            source: source.to_string(),
            queries: Arc::clone(&self.queries),
        }))
    }
}

/// Parsed ECMAScript source
struct EcmaScriptSource {
    tree: Tree,
    source: String,
    queries: Arc<EcmaQueries>,
}

/// Declaration and name nodes resolved from one query match
struct DeclMatch<'t> {
    decl: Node<'t>,
    name: Node<'t>,
}

fn capture_node<'t>(m: &QueryMatch<'_, 't>, index: u32) -> Option<Node<'t>> {
    m.captures.iter().find(|c| c.index == index).map(|c| c.node)
}

fn decl_match<'t>(query: &Query, m: &QueryMatch<'_, 't>, decl_capture: &str) -> Option<DeclMatch<'t>> {
    let decl_idx = query.capture_index_for_name(decl_capture)?;
    let name_idx = query.capture_index_for_name("name")?;
    Some(DeclMatch {
        decl: capture_node(m, decl_idx)?,
        name: capture_node(m, name_idx)?,
    })
}

impl EcmaScriptSource {
    fn node_text(&self, node: Node) -> String {
        self.source[node.start_byte()..node.end_byte()].to_string()
    }

    /// Build a RawFunction from a declaration node and its name node
    fn raw_function(&self, decl: Node, name: Node) -> RawFunction {
        let body = decl.child_by_field_name("body");
        let signature = match body {
            Some(body) => self.source[decl.start_byte()..body.start_byte()]
                .trim()
                .to_string(),
            None => self.node_text(decl).trim().to_string(),
        };
        let callees = match body {
            Some(body) => self.call_sites(body),
            None => Vec::new(),
        };
        RawFunction {
            name: self.node_text(name),
            signature,
            start: decl.start_byte(),
            callees,
        }
    }

    /// Class header up to the body, rendered with an elision marker when the
    /// header really is a class header. A declaration with no body keeps its
    /// full text.
    fn class_signature(&self, decl: Node, body: Option<Node>) -> String {
        match body {
            Some(body) => {
                let header = self.source[decl.start_byte()..body.start_byte()].trim();
                if header.contains("class") {
                    format!("{header} {{ ... }}")
                } else {
                    header.to_string()
                }
            }
            None => self.node_text(decl).trim().to_string(),
        }
    }

    /// Methods directly in the given class body. Methods of a class nested
    /// deeper inside a method body belong to that class, not this one.
    fn extract_methods(&self, class_body: Node) -> Vec<RawFunction> {
        let query = &self.queries.methods;
        let mut methods = Vec::new();
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(query, class_body, self.source.as_bytes());
        while let Some(m) = matches.next() {
            let Some(found) = decl_match(query, m, "method") else {
                continue;
            };
            if found.decl.parent().map(|p| p.id()) != Some(class_body.id()) {
                continue;
            }
            methods.push(self.raw_function(found.decl, found.name));
        }
        methods.sort_by_key(|m| m.start);
        methods
    }

    /// Bare-identifier callee names in the given subtree, in source order
    fn call_sites(&self, scope: Node) -> Vec<String> {
        let query = &self.queries.calls;
        let Some(callee_idx) = query.capture_index_for_name("callee") else {
            return Vec::new();
        };
        let mut calls = Vec::new();
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(query, scope, self.source.as_bytes());
        while let Some(m) = matches.next() {
            for capture in m.captures {
                if capture.index == callee_idx {
                    calls.push(self.node_text(capture.node));
                }
            }
        }
        calls
    }
}

impl ParsedSource for EcmaScriptSource {
    fn extract_functions(&self) -> Vec<RawFunction> {
        let query = &self.queries.functions;
        let mut seen = HashSet::new();
        let mut functions = Vec::new();
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(query, self.tree.root_node(), self.source.as_bytes());
        while let Some(m) = matches.next() {
            let Some(found) = decl_match(query, m, "function") else {
                continue;
            };
            if !seen.insert(found.decl.start_byte()) {
                continue;
            }
            functions.push(self.raw_function(found.decl, found.name));
        }
        functions.sort_by_key(|f| f.start);
        functions
    }

    fn extract_classes(&self) -> Vec<RawClass> {
        let query = &self.queries.classes;
        let mut seen = HashSet::new();
        let mut classes = Vec::new();
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(query, self.tree.root_node(), self.source.as_bytes());
        while let Some(m) = matches.next() {
            let Some(found) = decl_match(query, m, "class") else {
                continue;
            };
            if !seen.insert(found.decl.start_byte()) {
                continue;
            }
            let body = found.decl.child_by_field_name("body");
            classes.push(RawClass {
                name: self.node_text(found.name),
                signature: self.class_signature(found.decl, body),
                start: found.decl.start_byte(),
                methods: body.map(|b| self.extract_methods(b)).unwrap_or_default(),
                // the class's own dependencies come from its full text
                callees: self.call_sites(found.decl),
            });
        }
        classes.sort_by_key(|c| c.start);
        classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(language: Language, source: &str) -> Box<dyn ParsedSource> {
        let parser = EcmaScriptParser::new(language).unwrap();
        parser.parse(source, "test.ts").unwrap()
    }

    #[test]
    fn test_create_parser_all_variants() {
        assert!(EcmaScriptParser::new(Language::TypeScript).is_ok());
        assert!(EcmaScriptParser::new(Language::TypeScriptReact).is_ok());
        assert!(EcmaScriptParser::new(Language::JavaScript).is_ok());
        assert!(EcmaScriptParser::new(Language::JavaScriptReact).is_ok());
    }

    #[test]
    fn test_parse_simple_function() {
        let parsed = parse(
            Language::TypeScript,
            "function add(a: number, b: number): number { return a + b; }",
        );
        let functions = parsed.extract_functions();
        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].name, "add");
        assert_eq!(
            functions[0].signature,
            "function add(a: number, b: number): number"
        );
    }

    #[test]
    fn test_exported_function_counted_once() {
        let parsed = parse(Language::TypeScript, "export function foo() {}");
        let functions = parsed.extract_functions();
        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].name, "foo");
        // the signature comes from the inner declaration, not the wrapper
        assert_eq!(functions[0].signature, "function foo()");
    }

    #[test]
    fn test_anonymous_default_export_skipped() {
        let parsed = parse(Language::JavaScript, "export default function () { return 1; }");
        assert_eq!(parsed.extract_functions().len(), 0);
    }

    #[test]
    fn test_functions_in_declaration_order() {
        let source = "function first() {}\nfunction second() {}\nexport function third() {}\n";
        let parsed = parse(Language::TypeScript, source);
        let names: Vec<_> = parsed
            .extract_functions()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_class_with_methods() {
        let source = r#"
export class Greeter {
    greeting: string;
    constructor(message: string) {
        this.greeting = message;
    }
    greet(): string {
        return "Hello, " + this.greeting;
    }
}
"#;
        let parsed = parse(Language::TypeScript, source);
        let classes = parsed.extract_classes();
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].name, "Greeter");

        let method_names: Vec<_> = classes[0].methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(method_names, vec!["constructor", "greet"]);
        assert_eq!(classes[0].methods[1].signature, "greet(): string");
    }

    #[test]
    fn test_class_signature_elides_body() {
        let parsed = parse(
            Language::TypeScript,
            "class Foo extends Bar { constructor() { super(); } }",
        );
        let classes = parsed.extract_classes();
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].signature, "class Foo extends Bar { ... }");
        assert!(!classes[0].signature.contains("super"));
    }

    #[test]
    fn test_nested_class_methods_not_merged() {
        let source = r#"
class Outer {
    run() {
        const Inner = class {
            hidden() {}
        };
        return Inner;
    }
}
"#;
        let parsed = parse(Language::TypeScript, source);
        let classes = parsed.extract_classes();
        assert_eq!(classes.len(), 1);
        let method_names: Vec<_> = classes[0].methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(method_names, vec!["run"]);
    }

    #[test]
    fn test_call_sites_bare_identifiers_only() {
        let source = r#"
function driver() {
    helper();
    obj.method();
    helper();
    other(1, 2);
}
"#;
        let parsed = parse(Language::TypeScript, source);
        let functions = parsed.extract_functions();
        assert_eq!(functions.len(), 1);
        // source order, duplicates kept; member calls never matched
        assert_eq!(functions[0].callees, vec!["helper", "helper", "other"]);
    }

    #[test]
    fn test_class_callees_cover_full_declaration() {
        let source = r#"
class Widget {
    size = compute();
    draw() {
        render();
    }
}
"#;
        let parsed = parse(Language::TypeScript, source);
        let classes = parsed.extract_classes();
        assert_eq!(classes.len(), 1);
        // field initializer and method body both count for the class itself
        assert_eq!(classes[0].callees, vec!["compute", "render"]);
        assert_eq!(classes[0].methods[0].callees, vec!["render"]);
    }

    #[test]
    fn test_jsx_source() {
        let source = r#"
export function App() {
    return <div onClick={() => handle()}>hi</div>;
}
function handle() {}
"#;
        let parsed = parse(Language::TypeScriptReact, source);
        let functions = parsed.extract_functions();
        assert_eq!(functions.len(), 2);
        assert_eq!(functions[0].name, "App");
        assert_eq!(functions[0].callees, vec!["handle"]);
    }

    #[test]
    fn test_syntax_error_tolerant() {
        // tree-sitter recovers from broken input instead of failing the parse
        let parser = EcmaScriptParser::new(Language::TypeScript).unwrap();
        let parsed = parser.parse("function broken(", "broken.ts");
        assert!(parsed.is_ok());
    }

    #[test]
    fn test_garbage_input_yields_nothing() {
        let parsed = parse(Language::TypeScript, "%%% not a program @@@");
        assert_eq!(parsed.extract_functions().len(), 0);
        assert_eq!(parsed.extract_classes().len(), 0);
    }
}
