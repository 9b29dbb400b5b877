//! Numeric literal decoding (§4.4): the four radixes, decimal integers,
//! and floats, with digit-grouping underscores and BigInt promotion.

use std::str::FromStr;

use syntax::{classifier, BigInt, Diagnostic, DiagnosticKind, Span, Value};

use crate::cursor::Cursor;

/// True if the cursor is positioned at something that can only be the
/// start of a numeric literal (an optional sign followed by a digit, or a
/// radix prefix). Used by the grammar engine to decide whether to commit
/// to number-scanning before any digit has been consumed.
pub fn looks_like_number(cursor: &Cursor) -> bool {
    let mut offset = 0;
    if matches!(cursor.peek_by(offset), Some('+') | Some('-')) {
        offset += 1;
    }
    match cursor.peek_by(offset) {
        Some(c) => c.is_ascii_digit(),
        None => false,
    }
}

/// Scans one numeric literal. The cursor must already satisfy
/// [`looks_like_number`]. Returns `None` only when the literal is so
/// malformed no digits at all could be recovered; otherwise a
/// best-effort `Value` is returned alongside any diagnostics pushed to
/// the cursor (a committed numeric literal is never un-parsed once the
/// sign/first-digit has been consumed).
pub fn scan_number(cursor: &mut Cursor) -> Option<Value> {
    let start = cursor.offset();
    let negative = match cursor.peek() {
        Some('+') => {
            cursor.advance();
            false
        }
        Some('-') => {
            cursor.advance();
            true
        }
        _ => false,
    };

    if cursor.peek() == Some('0') {
        match cursor.peek_by(1) {
            Some('x') => return Some(scan_radix(cursor, start, negative, 16, classifier::is_hex_digit)),
            Some('o') => return Some(scan_radix(cursor, start, negative, 8, classifier::is_oct_digit)),
            Some('b') => return Some(scan_radix(cursor, start, negative, 2, classifier::is_bin_digit)),
            _ => {}
        }
    }

    scan_decimal_or_float(cursor, start, negative)
}

fn scan_radix(cursor: &mut Cursor, start: usize, negative: bool, radix: u32, is_digit: fn(char) -> bool) -> Value {
    cursor.advance_by(2); // the "0x"/"0o"/"0b" prefix
    let mut digits = String::new();
    let mut prev_was_underscore_or_start = true;
    while let Some(c) = cursor.peek() {
        if c == '_' {
            if prev_was_underscore_or_start {
                cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::InvalidUnderscorePlacement, Span::new(cursor.offset(), 1)));
            }
            cursor.advance();
            prev_was_underscore_or_start = true;
            continue;
        }
        if is_digit(c) {
            digits.push(c);
            cursor.advance();
            prev_was_underscore_or_start = false;
            continue;
        }
        if c.is_ascii_alphanumeric() {
            cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::InvalidRadixDigit, Span::new(cursor.offset(), 1)));
            cursor.advance();
            continue;
        }
        break;
    }
    if digits.is_empty() {
        cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::MissingDigits, cursor.span_from(start)));
    }
    check_value_terminator(cursor, start);

    let magnitude = BigInt::parse_bytes(digits.as_bytes(), radix).unwrap_or_default();
    let magnitude = if negative { -magnitude } else { magnitude };
    let span = cursor.span_from(start);
    let raw = cursor.source()[start..cursor.offset()].to_string();
    // Radix literals always decode as BigInt regardless of magnitude (§3, §8).
    Value::big_int(magnitude, span).with_raw(raw)
}

fn scan_decimal_or_float(cursor: &mut Cursor, start: usize, negative: bool) -> Option<Value> {
    let mut int_part = String::new();
    scan_digit_run(cursor, &mut int_part);
    if int_part.is_empty() {
        // Not actually a number (e.g. a lone sign); nothing was committed yet.
        cursor.restore_to(start);
        return None;
    }

    let mut frac_part = String::new();
    let mut is_float = false;
    if cursor.peek() == Some('.') {
        is_float = true;
        cursor.advance();
        if cursor.peek() == Some('_') {
            cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::InvalidUnderscorePlacement, Span::new(cursor.offset(), 1)));
        }
        let before = frac_part_len(&frac_part);
        scan_digit_run(cursor, &mut frac_part);
        if frac_part_len(&frac_part) == before {
            cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::MissingDigits, cursor.span_from(start)));
        }
        if cursor.peek() == Some('.') {
            cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::MultipleDecimalPointsOrExponents, Span::new(cursor.offset(), 1)));
            while cursor.peek() == Some('.') || cursor.peek().is_some_and(|c| c.is_ascii_digit() || c == '_') {
                cursor.advance();
            }
        }
    }

    let mut exp_part = String::new();
    let mut exp_negative = false;
    if matches!(cursor.peek(), Some('e') | Some('E')) {
        is_float = true;
        cursor.advance();
        if matches!(cursor.peek(), Some('+') | Some('-')) {
            exp_negative = cursor.peek() == Some('-');
            cursor.advance();
        }
        if cursor.peek() == Some('_') {
            cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::InvalidUnderscorePlacement, Span::new(cursor.offset(), 1)));
        }
        scan_digit_run(cursor, &mut exp_part);
        if exp_part.is_empty() {
            cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::MissingDigits, cursor.span_from(start)));
        }
        if matches!(cursor.peek(), Some('e') | Some('E')) {
            cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::MultipleDecimalPointsOrExponents, Span::new(cursor.offset(), 1)));
            while cursor.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '+' || c == '-') {
                cursor.advance();
            }
        }
    }

    check_value_terminator(cursor, start);
    let span = cursor.span_from(start);
    let raw = cursor.source()[start..cursor.offset()].to_string();

    if is_float {
        let mut literal = String::new();
        if negative {
            literal.push('-');
        }
        literal.push_str(&int_part);
        literal.push('.');
        literal.push_str(if frac_part.is_empty() { "0" } else { &frac_part });
        if !exp_part.is_empty() {
            literal.push('e');
            if exp_negative {
                literal.push('-');
            }
            literal.push_str(&exp_part);
        }
        let f: f64 = literal.parse().unwrap_or(f64::NAN);
        Some(Value::float(f, span).with_raw(raw))
    } else {
        let magnitude = BigInt::from_str(&int_part).unwrap_or_default();
        let magnitude = if negative { -magnitude } else { magnitude };
        Some(int_value(magnitude, span, raw))
    }
}

fn frac_part_len(s: &str) -> usize {
    s.len()
}

fn scan_digit_run(cursor: &mut Cursor, out: &mut String) {
    let mut prev_was_underscore = false;
    loop {
        match cursor.peek() {
            Some(c) if c.is_ascii_digit() => {
                out.push(c);
                cursor.advance();
                prev_was_underscore = false;
            }
            Some('_') => {
                if prev_was_underscore || out.is_empty() {
                    cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::InvalidUnderscorePlacement, Span::new(cursor.offset(), 1)));
                }
                cursor.advance();
                prev_was_underscore = true;
            }
            _ => break,
        }
    }
}

fn check_value_terminator(cursor: &mut Cursor, start: usize) {
    match cursor.peek() {
        None => {}
        Some(c) if classifier::is_value_terminator(c) => {}
        Some(_) => {
            cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::NumberAbutsIdentifier, cursor.span_from(start)));
            while cursor.peek().is_some_and(classifier::is_identifier_continue) {
                cursor.advance();
            }
        }
    }
}

fn int_value(magnitude: BigInt, span: Span, raw: String) -> Value {
    match i64::try_from(&magnitude) {
        Ok(i) => Value::int(i, span).with_raw(raw),
        Err(_) => Value::big_int(magnitude, span).with_raw(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use syntax::ValueData;

    fn scan(src: &str) -> (Value, Vec<syntax::Diagnostic>) {
        let mut cursor = Cursor::new(src);
        let value = scan_number(&mut cursor).unwrap();
        (value, cursor.into_diagnostics())
    }

    #[test]
    fn max_i64_stays_signed_64() {
        let (value, diags) = scan("9223372036854775807");
        assert_eq!(value.data, ValueData::Int(i64::MAX));
        assert!(diags.is_empty());
    }

    #[test]
    fn one_past_max_i64_promotes_to_bigint() {
        let (value, diags) = scan("9223372036854775808");
        assert_eq!(value.data, ValueData::BigInt(BigInt::from(i64::MAX) + BigInt::from(1)));
        assert!(diags.is_empty());
    }

    #[test]
    fn hex_octal_binary_literals_are_always_bigint() {
        let (hex, _) = scan("0xFF_FF");
        assert_eq!(hex.data, ValueData::BigInt(BigInt::from(0xFFFFu32)));
        let (oct, _) = scan("0o77");
        assert_eq!(oct.data, ValueData::BigInt(BigInt::from(0o77u32)));
        let (bin, _) = scan("0b1010");
        assert_eq!(bin.data, ValueData::BigInt(BigInt::from(0b1010u32)));
    }

    #[test]
    fn float_with_fraction_and_exponent() {
        let (value, diags) = scan("3.25");
        assert_eq!(value.data, ValueData::Float(3.25));
        assert!(diags.is_empty());
        let (value, diags) = scan("1e10");
        assert_eq!(value.data, ValueData::Float(1e10));
        assert!(diags.is_empty());
    }

    #[test]
    fn trailing_dot_with_no_fraction_digit_is_an_error() {
        let (_, diags) = scan("1.");
        assert!(diags.iter().any(|d| d.kind == DiagnosticKind::MissingDigits));
    }

    #[test]
    fn underscore_immediately_after_radix_prefix_is_an_error() {
        let (_, diags) = scan("0x_FF");
        assert!(diags.iter().any(|d| d.kind == DiagnosticKind::InvalidUnderscorePlacement));
    }

    #[test]
    fn number_abutting_identifier_is_an_error() {
        let (_, diags) = scan("10abc");
        assert!(diags.iter().any(|d| d.kind == DiagnosticKind::NumberAbutsIdentifier));
    }
}
