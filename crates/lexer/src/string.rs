//! String literal decoding (§4.4): single-line quoted, multiline quoted,
//! and raw strings, with dedentation and escape resolution.

use syntax::{classifier, Diagnostic, DiagnosticKind, Span, Value};

use crate::cursor::Cursor;

/// Scans a single-line quoted string. The cursor must be at the opening `"`.
pub fn scan_quoted_string(cursor: &mut Cursor) -> Option<Value> {
    if cursor.peek() != Some('"') {
        return None;
    }
    let start = cursor.offset();
    if cursor.starts_with("\"\"\"") {
        return Some(scan_multiline_quoted_string(cursor, start));
    }
    cursor.advance();
    let mut out = String::new();
    loop {
        match cursor.peek() {
            None => {
                cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::UnclosedString, cursor.span_from(start)));
                break;
            }
            Some('"') => {
                cursor.advance();
                break;
            }
            Some(c) if classifier::is_newline_start(c) => {
                cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::UnescapedNewlineInString, Span::new(cursor.offset(), 1)));
                cursor.advance();
            }
            Some('\\') => scan_escape(cursor, &mut out),
            Some(c) => {
                out.push(c);
                cursor.advance();
            }
        }
    }
    let span = cursor.span_from(start);
    let raw = cursor.source()[start..cursor.offset()].to_string();
    Some(Value::string(out, span).with_raw(raw))
}

/// Resolves one escape sequence at the cursor (positioned at the `\`),
/// appending its decoded form to `out`.
fn scan_escape(cursor: &mut Cursor, out: &mut String) {
    let escape_start = cursor.offset();
    cursor.advance(); // consume '\'
    match cursor.peek() {
        Some('n') => {
            out.push('\n');
            cursor.advance();
        }
        Some('r') => {
            out.push('\r');
            cursor.advance();
        }
        Some('t') => {
            out.push('\t');
            cursor.advance();
        }
        Some('\\') => {
            out.push('\\');
            cursor.advance();
        }
        Some('"') => {
            out.push('"');
            cursor.advance();
        }
        Some('b') => {
            out.push('\u{0008}');
            cursor.advance();
        }
        Some('f') => {
            out.push('\u{000C}');
            cursor.advance();
        }
        Some('s') => {
            out.push(' ');
            cursor.advance();
        }
        Some('u') => scan_unicode_escape(cursor, escape_start, out),
        Some(c) if c == ' ' || c == '\t' || classifier::is_newline_start(c) => {
            // Whitespace-escape: consumes the run, produces nothing.
            cursor.eat_while(|c| c == ' ' || c == '\t' || classifier::is_newline_start(c));
        }
        _ => {
            cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::InvalidEscape, cursor.span_from(escape_start)));
            if cursor.peek().is_some() {
                cursor.advance();
            }
        }
    }
}

fn scan_unicode_escape(cursor: &mut Cursor, escape_start: usize, out: &mut String) {
    cursor.advance(); // consume 'u'
    if cursor.peek() != Some('{') {
        cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::InvalidUnicodeEscape, cursor.span_from(escape_start)));
        return;
    }
    cursor.advance();
    let mut hex = String::new();
    while let Some(c) = cursor.peek() {
        if c == '}' {
            break;
        }
        if classifier::is_hex_digit(c) && hex.len() < 6 {
            hex.push(c);
        }
        cursor.advance();
    }
    if cursor.peek() == Some('}') {
        cursor.advance();
    }
    let valid = (1..=6).contains(&hex.len());
    let codepoint = u32::from_str_radix(&hex, 16).ok();
    match codepoint.filter(|_| valid).and_then(|cp| {
        let is_surrogate = (0xD800..=0xDFFF).contains(&cp);
        let in_range = cp <= 0x10FFFF;
        if is_surrogate || !in_range {
            None
        } else {
            char::from_u32(cp)
        }
    }) {
        Some(c) if !classifier::is_disallowed(c) => out.push(c),
        _ => cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::InvalidUnicodeEscape, cursor.span_from(escape_start))),
    }
}

fn scan_multiline_quoted_string(cursor: &mut Cursor, start: usize) -> Value {
    cursor.advance_by(3);
    if !classifier::is_newline_start(cursor.peek().unwrap_or('\0')) {
        cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::UnclosedMultilineString, cursor.span_from(start)));
    } else {
        let len = classifier::newline_len(cursor.rest()).unwrap_or(1);
        cursor.advance_by(len);
    }

    let mut raw_lines: Vec<String> = vec![String::new()];
    loop {
        if cursor.rest().trim_start_matches(classifier::is_unicode_whitespace).starts_with("\"\"\"") {
            break;
        }
        match cursor.peek() {
            None => {
                cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::UnclosedMultilineString, cursor.span_from(start)));
                break;
            }
            Some(c) if classifier::is_newline_start(c) => {
                let len = classifier::newline_len(cursor.rest()).unwrap();
                cursor.advance_by(len);
                raw_lines.push(String::new());
            }
            Some('\\') if matches!(cursor.peek_by(1), Some(' ') | Some('\t') | None) || cursor.peek_by(1).is_some_and(classifier::is_newline_start) => {
                // Whitespace-escape resolved now, since it may cross lines.
                cursor.advance();
                while cursor.peek().is_some_and(|c| c == ' ' || c == '\t' || classifier::is_newline_start(c)) {
                    if classifier::is_newline_start(cursor.peek().unwrap()) {
                        let len = classifier::newline_len(cursor.rest()).unwrap();
                        cursor.advance_by(len);
                        raw_lines.push(String::new());
                    } else {
                        cursor.advance();
                    }
                }
            }
            Some(c) => {
                raw_lines.last_mut().unwrap().push(c);
                cursor.advance();
            }
        }
    }
    // The element pushed for the newline preceding the closing line is not
    // a content line: it is the (so far empty) closing line itself.
    raw_lines.pop();

    // Closing line's leading whitespace is the dedent prefix.
    let closing_indent_start = cursor.offset();
    let dedent_len = cursor.eat_while(classifier::is_unicode_whitespace);
    let dedent_prefix = &cursor.source()[closing_indent_start..closing_indent_start + dedent_len];
    if cursor.starts_with("\"\"\"") {
        cursor.advance_by(3);
    }

    let dedented: Vec<String> = raw_lines
        .iter()
        .map(|line| {
            if line.chars().all(classifier::is_unicode_whitespace) {
                String::new()
            } else if let Some(stripped) = line.strip_prefix(dedent_prefix) {
                stripped.to_string()
            } else {
                cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::MultilineStringDedentMismatch, cursor.span_from(start)));
                line.clone()
            }
        })
        .collect();

    let joined = dedented.join("\n");
    let mut out = String::new();
    let mut inner = Cursor::new(&joined);
    while let Some(c) = inner.peek() {
        if c == '\\' {
            scan_escape(&mut inner, &mut out);
        } else {
            out.push(c);
            inner.advance();
        }
    }
    for mut diagnostic in inner.into_diagnostics() {
        // `inner` scanned the dedented, newline-joined buffer, not the
        // source text, so its span can't be mapped back to a precise
        // source offset; point it at the whole literal instead.
        diagnostic.span = cursor.span_from(start);
        cursor.push_diagnostic(diagnostic);
    }

    let span = cursor.span_from(start);
    let raw = cursor.source()[start..cursor.offset()].to_string();
    Value::string(out, span).with_raw(raw)
}

/// Scans a raw string: one-or-more `#`, then `"`/`"""`, content with no
/// escape processing, closed by the matching quote(s) + hash count.
pub fn scan_raw_string(cursor: &mut Cursor) -> Option<Value> {
    if cursor.peek() != Some('#') {
        return None;
    }
    let start = cursor.offset();
    let hashes = cursor.eat_while(|c| c == '#');
    if cursor.peek() != Some('"') {
        cursor.restore_to(start);
        return None;
    }

    let closing_hashes: String = "#".repeat(hashes);
    if cursor.starts_with("\"\"\"") {
        return Some(scan_raw_multiline(cursor, start, &closing_hashes));
    }

    cursor.advance();
    let close = format!("\"{closing_hashes}");
    let mut out = String::new();
    loop {
        if cursor.starts_with(&close) {
            cursor.advance_by(close.len());
            break;
        }
        match cursor.peek() {
            None => {
                cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::UnclosedRawString, cursor.span_from(start)));
                break;
            }
            Some(c) => {
                out.push(c);
                cursor.advance();
            }
        }
    }
    let span = cursor.span_from(start);
    let raw = cursor.source()[start..cursor.offset()].to_string();
    Some(Value::string(out, span).with_raw(raw))
}

fn scan_raw_multiline(cursor: &mut Cursor, start: usize, closing_hashes: &str) -> Value {
    cursor.advance_by(3);
    if classifier::is_newline_start(cursor.peek().unwrap_or('\0')) {
        let len = classifier::newline_len(cursor.rest()).unwrap_or(1);
        cursor.advance_by(len);
    } else {
        cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::UnclosedMultilineString, cursor.span_from(start)));
    }

    let close = format!("\"\"\"{closing_hashes}");
    let mut raw_lines: Vec<String> = vec![String::new()];
    loop {
        if cursor.rest().trim_start_matches(classifier::is_unicode_whitespace).starts_with(&close) {
            break;
        }
        match cursor.peek() {
            None => {
                cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::UnclosedRawString, cursor.span_from(start)));
                break;
            }
            Some(c) if classifier::is_newline_start(c) => {
                let len = classifier::newline_len(cursor.rest()).unwrap();
                cursor.advance_by(len);
                raw_lines.push(String::new());
            }
            Some(c) => {
                raw_lines.last_mut().unwrap().push(c);
                cursor.advance();
            }
        }
    }
    raw_lines.pop();

    let closing_indent_start = cursor.offset();
    let dedent_len = cursor.eat_while(classifier::is_unicode_whitespace);
    let dedent_prefix = &cursor.source()[closing_indent_start..closing_indent_start + dedent_len];
    if cursor.starts_with(&close) {
        cursor.advance_by(close.len());
    }

    let dedented: Vec<String> = raw_lines
        .iter()
        .map(|line| {
            if line.chars().all(classifier::is_unicode_whitespace) {
                String::new()
            } else if let Some(stripped) = line.strip_prefix(dedent_prefix) {
                stripped.to_string()
            } else {
                cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::MultilineStringDedentMismatch, cursor.span_from(start)));
                line.clone()
            }
        })
        .collect();

    let span = cursor.span_from(start);
    let raw = cursor.source()[start..cursor.offset()].to_string();
    Value::string(dedented.join("\n"), span).with_raw(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scan(src: &str) -> (Value, Vec<syntax::Diagnostic>) {
        let mut cursor = Cursor::new(src);
        let value = scan_quoted_string(&mut cursor).unwrap();
        (value, cursor.into_diagnostics())
    }

    #[test]
    fn simple_quoted_string() {
        let (value, diags) = scan(r#""hello world""#);
        assert_eq!(value.as_string(), Some("hello world"));
        assert!(diags.is_empty());
    }

    #[test]
    fn escapes_resolve() {
        let (value, _) = scan(r#""a\nb\tc\u{41}""#);
        assert_eq!(value.as_string(), Some("a\nb\tcA"));
    }

    #[test]
    fn whitespace_escape_consumes_run() {
        let (value, _) = scan("\"a\\   b\"");
        assert_eq!(value.as_string(), Some("ab"));
    }

    #[test]
    fn unescaped_newline_is_an_error() {
        let (_, diags) = scan("\"a\nb\"");
        assert!(diags.iter().any(|d| d.kind == DiagnosticKind::UnescapedNewlineInString));
    }

    #[test]
    fn multiline_dedent_applies_to_each_line() {
        let mut cursor = Cursor::new("\"\"\"\n  hello\n    world\n  \"\"\"");
        let value = scan_quoted_string(&mut cursor).unwrap();
        assert_eq!(value.as_string(), Some("hello\n  world"));
        assert!(cursor.diagnostics().is_empty());
    }

    #[test]
    fn raw_string_with_internal_single_hash_sequences_does_not_terminate() {
        // A single `"#` inside the content must not be mistaken for the
        // two-hash closing delimiter; only the trailing `"##` closes it.
        let src = ["##", "\"", "contains \"# and \"# more", "\"", "##"].concat();
        let mut cursor = Cursor::new(&src);
        let value = scan_raw_string(&mut cursor).unwrap();
        assert_eq!(value.as_string(), Some("contains \"# and \"# more"));
        assert!(cursor.is_eof());
    }
}
