//! Recursive-descent grammar engine for KDL 2.0 documents (§4.5).
//!
//! This is the only crate that owns control flow and diagnostic-emission
//! policy: it drives a `lexer::Cursor` through the node/entry/value/
//! children-block productions, using speculative snapshot/restore where
//! the grammar requires backtracking (entry property-vs-value, optional
//! type annotations).

use lexer::{identifier, keyword, number, string, trivia, Cursor};
use syntax::{classifier, Diagnostic, DiagnosticKind, Document, Entry, Identifier, Node, Span, Value};

/// The result of a parse: a document (possibly partial on failure) plus
/// every diagnostic recorded. The parse succeeded iff `diagnostics` is
/// empty (§4.7, §7).
pub struct ParseOutput {
    pub document: Document,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn parse(source: &str) -> ParseOutput {
    let source = source.strip_prefix('\u{FEFF}').unwrap_or(source);
    let mut cursor = Cursor::new(source);
    let nodes = parse_node_list(&mut cursor, true);
    ParseOutput { document: Document::new(nodes), diagnostics: cursor.into_diagnostics() }
}

/// Parses a run of (possibly slashdashed) nodes. At the top level this
/// consumes until EOF; inside a children-block it stops before `}`.
fn parse_node_list(cursor: &mut Cursor, top_level: bool) -> Vec<Node> {
    let mut nodes = Vec::new();
    loop {
        trivia::eat_line_space_run(cursor);
        if cursor.is_eof() || (!top_level && cursor.peek() == Some('}')) {
            break;
        }

        if trivia::eat_slashdash_marker(cursor) {
            trivia::eat_line_space_run(cursor);
            parse_node(cursor);
            continue;
        }

        let before = cursor.offset();
        match parse_node(cursor) {
            Some(node) => nodes.push(node),
            None if cursor.offset() > before => {}
            None => {
                // Nothing recognizable here; report and skip one scalar so
                // progress is guaranteed even on thoroughly malformed input.
                cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::UnexpectedCharacter, Span::new(cursor.offset(), 1)));
                cursor.advance();
            }
        }
    }
    nodes
}

/// `(identifier)` — committed once `(` is seen (no other production
/// starts with it), so failures here are hard errors, not speculative.
fn parse_type_annotation(cursor: &mut Cursor) -> Option<String> {
    if cursor.peek() != Some('(') {
        return None;
    }
    let start = cursor.offset();
    cursor.advance();
    let ident = identifier::scan_identifier(cursor);
    let ident = match ident {
        Some(ident) => ident,
        None => {
            cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::ExpectedIdentifierAfterOpenParen, cursor.span_from(start)));
            return None;
        }
    };
    if cursor.peek() == Some(')') {
        cursor.advance();
    } else {
        cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::ExpectedCloseParenForType, Span::new(cursor.offset(), 1)));
    }
    Some(ident.value)
}

fn parse_value(cursor: &mut Cursor) -> Option<Value> {
    if let Some(value) = keyword::scan_keyword(cursor) {
        return Some(value);
    }
    if cursor.peek() == Some('#') && let Some(value) = string::scan_raw_string(cursor) {
        return Some(value);
    }
    if cursor.peek() == Some('"') && let Some(value) = string::scan_quoted_string(cursor) {
        return Some(value);
    }
    if number::looks_like_number(cursor) && let Some(value) = number::scan_number(cursor) {
        return Some(value);
    }
    if let Some(ident) = identifier::scan_bare_identifier(cursor) {
        return Some(Value::string(ident.value, ident.span).with_raw(ident.raw));
    }
    if let Some(word) = identifier::peek_reserved_word(cursor) {
        let start = cursor.offset();
        cursor.advance_by(word.len());
        cursor.push_diagnostic(
            Diagnostic::error(DiagnosticKind::ReservedKeywordAsIdentifier, cursor.span_from(start))
                .with_help("write it as a quoted string, or as a `#`-prefixed keyword if that's what you meant"),
        );
    }
    None
}

/// Property (`identifier = value`) or bare value, each with an optional
/// type annotation on the value. Speculates on the property form: if no
/// `=` follows the identifier, it backtracks and re-parses the same text
/// as a bare (identifier-as-string) value.
fn parse_entry(cursor: &mut Cursor) -> Option<Entry> {
    let start = cursor.offset();

    let snapshot = cursor.snapshot();
    if let Some(name) = identifier::scan_identifier(cursor) {
        if cursor.peek() == Some('=') {
            cursor.advance();
            let ty = parse_type_annotation(cursor);
            return match parse_value(cursor) {
                Some(mut value) => {
                    if let Some(ty) = ty {
                        value = value.with_type(ty);
                    }
                    Some(Entry::property(name, value, cursor.span_from(start)))
                }
                None => {
                    cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::ExpectedValueAfterType, cursor.span_from(start)));
                    None
                }
            };
        }
        cursor.restore(snapshot);
    } else if let Some(reserved_span) = lenient_reserved_property_key(cursor) {
        cursor.push_diagnostic(
            Diagnostic::error(DiagnosticKind::ReservedKeywordAsPropertyKey, reserved_span).with_help("write the key as a quoted string"),
        );
        return None;
    }

    let ty = parse_type_annotation(cursor);
    match parse_value(cursor) {
        Some(mut value) => {
            if let Some(ty) = ty {
                value = value.with_type(ty);
            }
            Some(Entry::argument(value, cursor.span_from(start)))
        }
        None => {
            if ty.is_some() {
                cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::ExpectedValueAfterType, cursor.span_from(start)));
            }
            None
        }
    }
}

/// Looks ahead, without committing, for `<reserved-word>=`: the case
/// `scan_identifier` legitimately refuses because bare reserved words
/// aren't identifiers, but which still needs its own diagnostic rather
/// than falling through to a generic failure.
fn lenient_reserved_property_key(cursor: &mut Cursor) -> Option<Span> {
    let start = cursor.offset();
    let snapshot = cursor.snapshot();
    let n = cursor.eat_while(classifier::is_identifier_continue);
    let is_equals = cursor.peek() == Some('=');
    let span = cursor.span_from(start);
    cursor.restore(snapshot);
    if n > 0 && is_equals {
        Some(span)
    } else {
        None
    }
}

fn parse_children_block(cursor: &mut Cursor) -> Vec<Node> {
    let start = cursor.offset();
    cursor.advance(); // '{'
    let nodes = parse_node_list(cursor, false);
    if cursor.peek() == Some('}') {
        cursor.advance();
    } else {
        cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::ExpectedCloseBraceForChildren, cursor.span_from(start)));
        return nodes;
    }
    match cursor.peek() {
        None => {}
        Some(c) if classifier::is_unicode_whitespace(c) || classifier::is_newline_start(c) => {}
        Some(';') | Some('}') => {}
        Some('/') if cursor.starts_with("/-") => {}
        Some(_) => {
            cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::UnexpectedCharacterAfterChildren, Span::new(cursor.offset(), 1)));
        }
    }
    nodes
}

fn parse_node(cursor: &mut Cursor) -> Option<Node> {
    let start = cursor.offset();
    let ty = parse_type_annotation(cursor);

    let name: Identifier = match identifier::scan_identifier(cursor) {
        Some(name) => name,
        None => {
            if ty.is_some() {
                cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::ExpectedNodeNameAfterType, cursor.span_from(start)));
            }
            return None;
        }
    };

    let mut entries = Vec::new();
    let mut children: Option<Vec<Node>> = None;

    loop {
        let had_space = trivia::eat_node_space(cursor);

        if trivia::eat_slashdash_marker(cursor) {
            trivia::eat_line_space_run(cursor);
            if cursor.peek() == Some('{') {
                parse_children_block(cursor);
            } else {
                parse_entry(cursor);
            }
            continue;
        }

        if cursor.peek() == Some('{') {
            let block = parse_children_block(cursor);
            children = Some(match children.take() {
                Some(mut existing) => {
                    existing.extend(block);
                    existing
                }
                None => block,
            });
            continue;
        }

        if is_node_terminator_start(cursor) {
            break;
        }

        if !had_space {
            cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::UnexpectedCharacterAbuttingNodeName, Span::new(cursor.offset(), 1)));
            break;
        }

        match parse_entry(cursor) {
            Some(entry) => entries.push(entry),
            None => break,
        }
    }

    consume_node_terminator(cursor);

    Some(Node { name, ty, entries, children, span: cursor.span_from(start) })
}

fn is_node_terminator_start(cursor: &Cursor) -> bool {
    match cursor.peek() {
        None => true,
        Some(';') | Some('}') => true,
        Some(c) if classifier::is_newline_start(c) => true,
        Some('\\') => true,
        _ => false,
    }
}

fn consume_node_terminator(cursor: &mut Cursor) {
    match cursor.peek() {
        None => {}
        Some(';') => {
            cursor.advance();
        }
        Some('}') => {}
        Some(c) if classifier::is_newline_start(c) => {
            trivia::eat_newline(cursor);
        }
        Some('\\') if !trivia::eat_escline(cursor) => {
            cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::BadEscline, Span::new(cursor.offset(), 1)));
            cursor.advance();
        }
        Some('\\') => {}
        Some(_) => {
            cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::UnexpectedCharacter, Span::new(cursor.offset(), 1)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use syntax::ValueData;

    fn ok(source: &str) -> Document {
        let output = parse(source);
        assert!(output.diagnostics.is_empty(), "unexpected diagnostics: {:?}", output.diagnostics);
        output.document
    }

    #[test]
    fn scenario_1_node_with_arguments_and_child() {
        let doc = ok(r#"node 1 3.25 {child "abc" #true}"#);
        assert_eq!(doc.nodes.len(), 1);
        let node = &doc.nodes[0];
        assert_eq!(node.name.as_str(), "node");
        let args: Vec<_> = node.arguments().map(|v| v.data.clone()).collect();
        assert_eq!(args, vec![ValueData::Int(1), ValueData::Float(3.25)]);
        let children = node.children.as_ref().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name.as_str(), "child");
    }

    #[test]
    fn scenario_2_bare_true_is_a_parse_error() {
        let output = parse(r#"(tag)node 1 null key="val" {child "abc" true}"#);
        assert!(!output.diagnostics.is_empty());
    }

    #[test]
    fn scenario_3_typed_node_with_property_and_child() {
        let doc = ok(r#"(tag)node 1 #null key="val" {child "abc" #true}"#);
        let node = &doc.nodes[0];
        assert_eq!(node.ty.as_deref(), Some("tag"));
        assert_eq!(node.property("key").and_then(Value::as_string), Some("val"));
        let args: Vec<_> = node.arguments().map(|v| v.data.clone()).collect();
        assert_eq!(args, vec![ValueData::Int(1), ValueData::Null]);
    }

    #[test]
    fn scenario_4_typed_numeric_entries() {
        let doc = ok("numbers (i32)10 (u8)255 myfloat=(f32)1.5");
        let node = &doc.nodes[0];
        let args: Vec<_> = node.arguments().collect();
        assert_eq!(args[0].ty.as_deref(), Some("i32"));
        assert_eq!(args[1].ty.as_deref(), Some("u8"));
        assert_eq!(node.property("myfloat").unwrap().ty.as_deref(), Some("f32"));
    }

    #[test]
    fn scenario_5_multiline_string_argument() {
        let doc = ok("node \"\"\"\n  hello\n    world\n  \"\"\"");
        let node = &doc.nodes[0];
        let args: Vec<_> = node.arguments().collect();
        assert_eq!(args[0].as_string(), Some("hello\n  world"));
    }

    #[test]
    fn scenario_6_slashdash_node_is_discarded() {
        let doc = ok("/-node1; node2");
        assert_eq!(doc.nodes.len(), 1);
        assert_eq!(doc.nodes[0].name.as_str(), "node2");
    }

    #[test]
    fn scenario_7_slashdash_entries_are_discarded() {
        let doc = ok(r#"node 1 /-2 3 /-key="x" other="y""#);
        let node = &doc.nodes[0];
        let args: Vec<_> = node.arguments().map(|v| v.data.clone()).collect();
        assert_eq!(args, vec![ValueData::Int(1), ValueData::Int(3)]);
        assert_eq!(node.property("other").and_then(Value::as_string), Some("y"));
        assert!(node.property("key").is_none());
    }

    #[test]
    fn scenario_8_multiple_children_blocks_concatenate_kept_ones() {
        let doc = ok("node { a; b } /-{ c } { d }");
        let node = &doc.nodes[0];
        let children = node.children.as_ref().unwrap();
        let names: Vec<_> = children.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "d"]);
    }

    #[test]
    fn speculation_restores_cursor_on_failed_property_form() {
        let doc = ok("node hello");
        let node = &doc.nodes[0];
        assert_eq!(node.arguments().next().unwrap().as_string(), Some("hello"));
    }

    #[test]
    fn property_last_write_wins() {
        let doc = ok("node a=1 a=2 a=3");
        assert_eq!(doc.nodes[0].property("a").unwrap().as_int(), Some(3));
    }
}
