//! Whitespace, comments, and line-continuation recognizers (§4.3).

use syntax::{classifier, Diagnostic, DiagnosticKind};

use crate::cursor::Cursor;

/// Consumes one block comment `/* ... */`, honoring nesting. The cursor
/// must be positioned at the leading `/`. Returns `false` (and does not
/// advance) if the input does not start with `/*`.
pub fn eat_block_comment(cursor: &mut Cursor) -> bool {
    if !cursor.starts_with("/*") {
        return false;
    }
    let start = cursor.offset();
    cursor.advance_by(2);
    let mut depth = 1usize;
    while depth > 0 {
        if cursor.starts_with("/*") {
            cursor.advance_by(2);
            depth += 1;
        } else if cursor.starts_with("*/") {
            cursor.advance_by(2);
            depth -= 1;
        } else if cursor.advance().is_none() {
            cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::UnclosedBlockComment, cursor.span_from(start)));
            return true;
        }
    }
    true
}

/// Consumes one line comment `// ...`, stopping before the next newline.
pub fn eat_line_comment(cursor: &mut Cursor) -> bool {
    if !cursor.starts_with("//") {
        return false;
    }
    cursor.advance_by(2);
    while let Some(c) = cursor.peek() {
        if classifier::is_newline_start(c) {
            break;
        }
        cursor.advance();
    }
    true
}

/// Consumes one newline sequence (tried longest-first), returning whether
/// one was found.
pub fn eat_newline(cursor: &mut Cursor) -> bool {
    match classifier::newline_len(cursor.rest()) {
        Some(len) => {
            cursor.advance_by(len);
            true
        }
        None => false,
    }
}

/// Consumes inline whitespace: a run of Unicode whitespace scalars and/or
/// block comments. Does not consume newlines or line comments.
pub fn eat_inline_whitespace(cursor: &mut Cursor) -> bool {
    let mut any = false;
    loop {
        if let Some(c) = cursor.peek()
            && classifier::is_unicode_whitespace(c)
        {
            cursor.advance();
            any = true;
            continue;
        }
        if eat_block_comment(cursor) {
            any = true;
            continue;
        }
        break;
    }
    any
}

/// Consumes one `line-space` unit: a newline, inline whitespace, or a line
/// comment (§4.3). Used to glue together "zero or more" line-space runs.
pub fn eat_line_space_run(cursor: &mut Cursor) -> bool {
    let mut any = false;
    loop {
        if eat_newline(cursor) || eat_inline_whitespace(cursor) || eat_line_comment(cursor) {
            any = true;
            continue;
        }
        break;
    }
    any
}

/// Consumes a line continuation: `\`, inline whitespace, an optional line
/// comment, a newline or EOF, then any trailing inline whitespace. Returns
/// `true` only on a well-formed escline; on a bare `\` not followed by one
/// of these forms, the cursor is restored and `false` is returned (the
/// caller decides whether that is itself an error).
pub fn eat_escline(cursor: &mut Cursor) -> bool {
    if cursor.peek() != Some('\\') {
        return false;
    }
    let snapshot = cursor.snapshot();
    cursor.advance();
    eat_inline_whitespace(cursor);
    eat_line_comment(cursor);
    if eat_newline(cursor) || cursor.is_eof() {
        eat_inline_whitespace(cursor);
        true
    } else {
        cursor.restore(snapshot);
        false
    }
}

/// Consumes `node-space`: the separator between a node name/entry and the
/// next entry. Either an escline (optionally surrounded by inline
/// whitespace) or one-or-more inline whitespace scalars.
pub fn eat_node_space(cursor: &mut Cursor) -> bool {
    let mut any = eat_inline_whitespace(cursor);
    if eat_escline(cursor) {
        any = true;
        eat_inline_whitespace(cursor);
    }
    any
}

/// Consumes the `/-` slashdash marker. Does not consume the whitespace
/// that may follow it; callers should follow with `eat_line_space_run`.
pub fn eat_slashdash_marker(cursor: &mut Cursor) -> bool {
    if cursor.starts_with("/-") {
        cursor.advance_by(2);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn block_comment_nests() {
        let mut cursor = Cursor::new("/* a /* b */ c */rest");
        assert!(eat_block_comment(&mut cursor));
        assert_eq!(cursor.rest(), "rest");
        assert!(cursor.diagnostics().is_empty());
    }

    #[test]
    fn unterminated_block_comment_errors() {
        let mut cursor = Cursor::new("/* never closed");
        assert!(eat_block_comment(&mut cursor));
        assert_eq!(cursor.diagnostics().len(), 1);
        assert_eq!(cursor.diagnostics()[0].kind, DiagnosticKind::UnclosedBlockComment);
    }

    #[test]
    fn line_comment_stops_before_newline() {
        let mut cursor = Cursor::new("// hi\nnext");
        assert!(eat_line_comment(&mut cursor));
        assert_eq!(cursor.rest(), "\nnext");
    }

    #[test]
    fn escline_consumes_comment_and_trailing_whitespace() {
        let mut cursor = Cursor::new("\\ // note\n   next");
        assert!(eat_escline(&mut cursor));
        assert_eq!(cursor.rest(), "next");
    }

    #[test]
    fn bare_backslash_is_not_an_escline() {
        let mut cursor = Cursor::new("\\x");
        assert!(!eat_escline(&mut cursor));
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn node_space_accepts_escline_form() {
        let mut cursor = Cursor::new("  \\\n  rest");
        assert!(eat_node_space(&mut cursor));
        assert_eq!(cursor.rest(), "rest");
    }
}
