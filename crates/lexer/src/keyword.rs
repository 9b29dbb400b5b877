//! Keyword literal decoding (§4.4): `#true`, `#false`, `#null`, `#inf`,
//! `#-inf`, `#nan`.

use syntax::{classifier, Value};

use crate::cursor::Cursor;

const KEYWORDS: &[(&str, fn(syntax::Span) -> Value)] = &[
    ("true", |span| Value::bool(true, span)),
    ("false", |span| Value::bool(false, span)),
    ("null", |span| Value::null(span)),
    ("-inf", |span| Value::float(f64::NEG_INFINITY, span)),
    ("inf", |span| Value::float(f64::INFINITY, span)),
    ("nan", |span| Value::float(f64::NAN, span)),
];

/// Scans a `#`-prefixed keyword. The leading `#` is committed only if the
/// following characters form a recognized keyword at a value boundary;
/// otherwise the cursor is left untouched so the caller can try raw-string
/// recognition instead (`#"`.../`##`... are not keywords).
pub fn scan_keyword(cursor: &mut Cursor) -> Option<Value> {
    if cursor.peek() != Some('#') {
        return None;
    }
    let start = cursor.offset();
    let rest = &cursor.rest()[1..];
    for (word, build) in KEYWORDS {
        if let Some(after) = rest.strip_prefix(word) {
            let terminates = after.chars().next().is_none_or(classifier::is_value_terminator);
            if terminates {
                cursor.advance_by(1 + word.len());
                let span = cursor.span_from(start);
                let raw = cursor.source()[start..cursor.offset()].to_string();
                return Some(build(span).with_raw(raw));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use syntax::ValueData;

    fn scan(src: &str) -> Option<ValueData> {
        let mut cursor = Cursor::new(src);
        scan_keyword(&mut cursor).map(|v| v.data)
    }

    #[test]
    fn recognizes_all_keywords() {
        assert_eq!(scan("#true"), Some(ValueData::Bool(true)));
        assert_eq!(scan("#false"), Some(ValueData::Bool(false)));
        assert_eq!(scan("#null"), Some(ValueData::Null));
        assert_eq!(scan("#inf"), Some(ValueData::Float(f64::INFINITY)));
        assert_eq!(scan("#-inf"), Some(ValueData::Float(f64::NEG_INFINITY)));
        assert!(matches!(scan("#nan"), Some(ValueData::Float(f)) if f.is_nan()));
    }

    #[test]
    fn releases_hash_for_raw_string_start() {
        let single_hash: String = ['#', '"', 'h', 'i', '"', '#'].into_iter().collect();
        assert_eq!(scan(&single_hash), None);
        let double_hash: String = ['#', '#', '"', 'h', 'i', '"', '#', '#'].into_iter().collect();
        assert_eq!(scan(&double_hash), None);
    }

    #[test]
    fn partial_match_does_not_consume() {
        let mut cursor = Cursor::new("#truest");
        assert_eq!(scan_keyword(&mut cursor), None);
        assert_eq!(cursor.offset(), 0);
    }
}
