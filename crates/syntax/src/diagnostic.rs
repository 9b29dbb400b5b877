use std::fmt;

use crate::{DiagnosticKind, Span};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DiagnosticSeverity {
    Info,
    Warning,
    Error,
}

/// A single diagnostic: a primary span, message, optional label, and
/// optional help text (§4.7). The core only ever emits `Error`-severity
/// diagnostics — any diagnostic being present fails the parse — but the
/// severity field is kept so downstream tooling (e.g. a future linter
/// built on this core) has somewhere to put non-fatal findings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: DiagnosticSeverity,
    pub span: Span,
    pub label: Option<String>,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, span: Span) -> Self {
        Self { kind, severity: DiagnosticSeverity::Error, span, label: None, help: None }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn message(&self) -> &'static str {
        self.kind.as_str()
    }

    /// Renders the diagnostic against `source`: one-based line/column,
    /// the offending source line, and a caret indicator of width
    /// `min(span.len, remaining_line_width)` (§4.7).
    pub fn render(&self, source: &str) -> String {
        let (line, column, line_text) = locate(source, self.span.start);
        let mut out = format!("{self}\n  --> line {line}, column {column}\n");
        out.push_str(&format!("  | {line_text}\n"));
        let caret_start = column.saturating_sub(1);
        let remaining = line_text.len().saturating_sub(caret_start);
        let caret_len = self.span.len.max(1).min(remaining.max(1));
        out.push_str(&format!("  | {}{}\n", " ".repeat(caret_start), "^".repeat(caret_len)));
        if let Some(label) = &self.label {
            out.push_str(&format!("  = {label}\n"));
        }
        if let Some(help) = &self.help {
            out.push_str(&format!("  = help: {help}\n"));
        }
        out
    }
}

/// One-based `(line, column, line_text)` for a byte offset, found by
/// rescanning the source for LF bytes up to `offset` (§4.7).
fn locate(source: &str, offset: usize) -> (usize, usize, &str) {
    let offset = offset.min(source.len());
    let mut line = 1;
    let mut line_start = 0;
    for (i, b) in source.as_bytes()[..offset].iter().enumerate() {
        if *b == b'\n' {
            line += 1;
            line_start = i + 1;
        }
    }
    let line_end = source[line_start..].find('\n').map(|p| line_start + p).unwrap_or(source.len());
    let column = offset - line_start + 1;
    (line, column, &source[line_start..line_end])
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KDL{:04}: {}", u16::from(self.kind), self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_uses_kdl_code_prefix() {
        let d = Diagnostic::error(DiagnosticKind::UnclosedBlockComment, Span::new(0, 1));
        assert_eq!(d.to_string(), "KDL0008: unclosed block comment");
    }

    #[test]
    fn locate_finds_line_and_column_after_newlines() {
        let src = "node1\nnode2 bad\nnode3";
        let (line, col, text) = locate(src, 10);
        assert_eq!((line, col, text), (2, 5, "node2 bad"));
    }

    #[test]
    fn locate_handles_offset_at_start() {
        let src = "abc\ndef";
        assert_eq!(locate(src, 0), (1, 1, "abc"));
    }

    #[test]
    fn render_includes_label_and_help() {
        let d = Diagnostic::error(DiagnosticKind::UnexpectedCharacter, Span::new(1, 1))
            .with_label("expected value")
            .with_help("wrap the value in quotes");
        let rendered = d.render("a @ b");
        assert!(rendered.contains("expected value"));
        assert!(rendered.contains("wrap the value in quotes"));
        assert!(rendered.contains('^'));
    }
}
