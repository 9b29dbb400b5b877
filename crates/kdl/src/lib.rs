//! Public facade for parsing and rendering KDL 2.0 documents.
//!
//! Re-exports the document model from [`syntax`] and wraps `parser`'s
//! core parse function in a result type that turns diagnostics into an
//! [`Error`] a caller can match on or print.

use thiserror::Error;

pub use syntax::{Diagnostic, DiagnosticKind, DiagnosticSeverity, Document, Entry, Identifier, Node, Span, Value, ValueData};

/// Parses a complete KDL document. A parse either produces a document
/// with zero diagnostics, or fails with every diagnostic collected while
/// scanning — there is no partial-success case.
#[derive(Debug, Error)]
#[error("{}", render_diagnostics(.0))]
pub struct Error(pub Vec<Diagnostic>);

impl Error {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.0
    }
}

fn render_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics.iter().map(|d| d.message()).collect::<Vec<_>>().join("; ")
}

/// Parses `source` into a [`Document`], or returns every diagnostic
/// recorded while doing so.
pub fn parse(source: &str) -> Result<Document, Error> {
    let output = parser::parse(source);
    if output.diagnostics.is_empty() {
        Ok(output.document)
    } else {
        Err(Error(output.diagnostics))
    }
}

/// Renders `document` back to its canonical textual form (§4.8).
pub fn to_compact_string(document: &Document) -> String {
    syntax::pretty::to_compact_string(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_a_well_formed_document() {
        let doc = parse(r#"node 1 2 key="val" {child}"#).unwrap();
        assert_eq!(doc.nodes.len(), 1);
    }

    #[test]
    fn collects_diagnostics_on_malformed_input() {
        let err = parse("node true").unwrap_err();
        assert!(!err.diagnostics().is_empty());
        assert!(err.to_string().contains("reserved keyword"));
    }

    #[test]
    fn round_trip_by_value_preserves_arguments() {
        let source = r#"node 1 2.5 "three" #true #null"#;
        let doc = parse(source).unwrap();
        let rendered = to_compact_string(&doc);
        let reparsed = parse(&rendered).unwrap();
        assert_eq!(doc, reparsed);
    }

    #[quickcheck_macros::quickcheck]
    fn canonical_form_is_idempotent(seed: u8) -> bool {
        let source = format!("node {seed} child=\"{seed}\" {{ nested {seed} }}");
        let Ok(doc) = parse(&source) else { return true };
        let once = to_compact_string(&doc);
        let Ok(reparsed) = parse(&once) else { return false };
        to_compact_string(&reparsed) == once
    }
}
