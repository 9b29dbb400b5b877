//! Bare and quoted identifier decoding (§4.3, §4.4).

use syntax::{classifier, Identifier};

use crate::{cursor::Cursor, string};

/// Bare words that must be written as `#`-prefixed keywords; a bare
/// identifier may never decode to one of these (§4.4).
const RESERVED: &[&str] = &["true", "false", "null", "inf", "-inf", "nan"];

/// Scans a bare identifier: an identifier-continue run that does not
/// start with a digit or `.`-before-digit, and is not one of the
/// reserved bare words. Returns `None` (without advancing) if the input
/// cannot form a bare identifier at all, so the caller can try other
/// productions instead.
pub fn scan_bare_identifier(cursor: &mut Cursor) -> Option<Identifier> {
    let start = cursor.offset();
    match cursor.peek() {
        Some(c) if c.is_ascii_digit() => return None,
        Some('.') if cursor.peek_by(1).is_some_and(|c| c.is_ascii_digit()) => return None,
        Some(c) if classifier::is_identifier_continue(c) => {}
        _ => return None,
    }
    cursor.eat_while(classifier::is_identifier_continue);
    let text = &cursor.source()[start..cursor.offset()];
    if RESERVED.contains(&text) {
        cursor.restore_to(start);
        return None;
    }
    let span = cursor.span_from(start);
    Some(Identifier::bare(text.to_string(), span))
}

/// Reports whether the cursor sits at one of the reserved bare words,
/// without consuming it. Lets a caller distinguish "nothing here" from
/// "a reserved word that can't be used bare" and emit a targeted
/// diagnostic instead of a generic one.
pub fn peek_reserved_word(cursor: &Cursor) -> Option<&'static str> {
    let rest = cursor.rest();
    RESERVED.iter().find(|word| {
        rest.strip_prefix(**word).is_some_and(|after| after.chars().next().is_none_or(classifier::is_value_terminator))
    }).copied()
}

/// Scans either a quoted-string identifier or a bare identifier,
/// preferring the quoted form when the cursor is at `"`.
pub fn scan_identifier(cursor: &mut Cursor) -> Option<Identifier> {
    if cursor.peek() == Some('"') {
        let start = cursor.offset();
        let value = string::scan_quoted_string(cursor)?;
        let text = value.as_string().unwrap_or_default().to_string();
        let raw = value.raw.clone().unwrap_or_default();
        let span = cursor.span_from(start);
        return Some(Identifier::quoted(text, raw, span));
    }
    scan_bare_identifier(cursor)
}
