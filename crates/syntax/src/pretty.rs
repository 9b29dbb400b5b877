//! Canonical and compact textual rendering of a [`Document`] (§4.8).

use std::fmt;

use crate::{classifier, Document, Node, Value, ValueData};

const RESERVED_WORDS: &[&str] = &["true", "false", "null", "inf", "-inf", "nan"];

fn needs_quoting(s: &str) -> bool {
    if s.is_empty() || RESERVED_WORDS.contains(&s) {
        return true;
    }
    let mut chars = s.chars();
    let first = chars.next().unwrap();
    if first.is_ascii_digit() || (first == '.' && s.chars().nth(1).is_some_and(|c| c.is_ascii_digit())) {
        return true;
    }
    s.chars().any(|c| classifier::is_structural(c) || classifier::is_unicode_whitespace(c) || classifier::is_newline_start(c) || classifier::is_disallowed(c))
}

pub(crate) fn write_identifier(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    if needs_quoting(s) {
        write_quoted_string(f, s)
    } else {
        f.write_str(s)
    }
}

fn write_quoted_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '"' => f.write_str("\\\"")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if classifier::is_disallowed(c) || c.is_control() => write!(f, "\\u{{{:x}}}", c as u32)?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

pub(crate) fn write_value(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    if let Some(ty) = &value.ty {
        write!(f, "(")?;
        write_identifier(f, ty)?;
        write!(f, ")")?;
    }
    match &value.data {
        ValueData::String(s) => write_quoted_string(f, s),
        ValueData::Bool(true) => f.write_str("#true"),
        ValueData::Bool(false) => f.write_str("#false"),
        ValueData::Null => f.write_str("#null"),
        ValueData::Int(i) => write!(f, "{i}"),
        ValueData::BigInt(b) => write!(f, "{b}"),
        ValueData::Float(x) => f.write_str(&format_float(*x)),
    }
}

/// Canonical float rendering (§4.8): scientific notation for magnitude
/// `>= 1e10` or (nonzero and `< 1e-5`), uppercase `E`, explicit exponent
/// sign, a mantissa that always has a decimal point, trailing mantissa
/// zeros trimmed but keeping at least `.0`. `inf`/`-inf`/`nan` render as
/// the keyword forms.
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "#nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "#inf".to_string() } else { "#-inf".to_string() };
    }
    if f == 0.0 {
        return if f.is_sign_negative() { "-0.0".to_string() } else { "0.0".to_string() };
    }
    let mag = f.abs();
    if !(1e-5..1e10).contains(&mag) {
        format_scientific(f)
    } else {
        format_decimal(f)
    }
}

fn format_decimal(f: f64) -> String {
    let s = format!("{f}");
    if s.contains('.') { s } else { format!("{s}.0") }
}

fn format_scientific(f: f64) -> String {
    let neg = f.is_sign_negative();
    let s = format!("{:e}", f.abs());
    let (mantissa, exp) = s.split_once('e').expect("Rust {:e} always contains 'e'");
    let exp: i32 = exp.parse().expect("Rust {:e} exponent is always a valid integer");
    let mantissa = if mantissa.contains('.') { mantissa.to_string() } else { format!("{mantissa}.0") };
    let mantissa = trim_trailing_mantissa_zeros(&mantissa);
    let sign = if neg { "-" } else { "" };
    let exp_sign = if exp >= 0 { "+" } else { "-" };
    format!("{sign}{mantissa}E{exp_sign}{}", exp.abs())
}

fn trim_trailing_mantissa_zeros(s: &str) -> String {
    let (int_part, frac) = s.split_once('.').expect("mantissa always carries a decimal point here");
    let trimmed = frac.trim_end_matches('0');
    let trimmed = if trimmed.is_empty() { "0" } else { trimmed };
    format!("{int_part}.{trimmed}")
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node, indent: usize) -> fmt::Result {
    f.write_str(&" ".repeat(indent))?;
    if let Some(ty) = &node.ty {
        write!(f, "(")?;
        write_identifier(f, ty)?;
        write!(f, ")")?;
    }
    write_identifier(f, node.name.as_str())?;

    for arg in node.arguments() {
        write!(f, " ")?;
        write_value(f, arg)?;
    }

    let mut prop_names: Vec<&str> = node.properties().keys().copied().collect();
    prop_names.sort_unstable();
    for key in prop_names {
        let value = node.property(key).unwrap();
        write!(f, " ")?;
        write_identifier(f, key)?;
        write!(f, "=")?;
        write_value(f, value)?;
    }

    match &node.children {
        Some(children) if !children.is_empty() => {
            writeln!(f, " {{")?;
            for child in children {
                write_node(f, child, indent + 4)?;
                writeln!(f)?;
            }
            write!(f, "{}}}", " ".repeat(indent))
        }
        Some(_) => write!(f, " {{}}"),
        None => Ok(()),
    }
}

pub(crate) fn write_document(f: &mut fmt::Formatter<'_>, document: &Document, indent: usize) -> fmt::Result {
    let mut nodes = document.nodes.iter().peekable();
    while let Some(node) = nodes.next() {
        write_node(f, node, indent)?;
        if nodes.peek().is_some() {
            writeln!(f)?;
        }
    }
    Ok(())
}

/// Compact single-line rendering: entries separated by spaces, nodes by
/// `;` (§6 Serialization API).
pub fn to_compact_string(document: &Document) -> String {
    let mut out = String::new();
    let mut nodes = document.nodes.iter().peekable();
    while let Some(node) = nodes.next() {
        write_compact_node(&mut out, node);
        if nodes.peek().is_some() {
            out.push_str("; ");
        }
    }
    out
}

fn write_compact_node(out: &mut String, node: &Node) {
    use std::fmt::Write;
    if let Some(ty) = &node.ty {
        let _ = write!(out, "({ty})");
    }
    out.push_str(node.name.as_str());
    for arg in node.arguments() {
        out.push(' ');
        let _ = write!(out, "{arg}");
    }
    let mut prop_names: Vec<&str> = node.properties().keys().copied().collect();
    prop_names.sort_unstable();
    for key in prop_names {
        let value = node.property(key).unwrap();
        let _ = write!(out, " {key}={value}");
    }
    if let Some(children) = &node.children {
        out.push_str(" {");
        let mut it = children.iter().peekable();
        while let Some(child) = it.next() {
            write_compact_node(out, child);
            if it.peek().is_some() {
                out.push_str("; ");
            }
        }
        out.push('}');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scientific_threshold_matches_spec_example() {
        assert_eq!(format_float(1e10), "1.0E+10");
    }

    #[test]
    fn small_magnitude_uses_scientific() {
        assert_eq!(format_float(0.000001), "1.0E-6");
    }

    #[test]
    fn mid_range_uses_plain_decimal_with_point() {
        assert_eq!(format_float(3.0), "3.0");
        assert_eq!(format_float(3.25), "3.25");
    }

    #[test]
    fn trims_trailing_zeros_but_keeps_one() {
        assert_eq!(trim_trailing_mantissa_zeros("1.500"), "1.5");
        assert_eq!(trim_trailing_mantissa_zeros("1.000"), "1.0");
    }

    #[test]
    fn specials_render_as_keywords() {
        assert_eq!(format_float(f64::NAN), "#nan");
        assert_eq!(format_float(f64::INFINITY), "#inf");
        assert_eq!(format_float(f64::NEG_INFINITY), "#-inf");
    }

    #[test]
    fn identifier_quoting_triggers_on_digit_start_and_structural_chars() {
        assert!(needs_quoting("1abc"));
        assert!(needs_quoting("a(b"));
        assert!(needs_quoting("true"));
        assert!(!needs_quoting("hello-world"));
    }
}
