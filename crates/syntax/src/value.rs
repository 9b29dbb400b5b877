use std::fmt;

use num_bigint::BigInt;

use crate::Span;

/// The payload of a [`Value`], without its type tag or source lexeme.
///
/// Per the width-explosion design note, the eight fixed-width integer
/// variants and the plain `SignedInt64`/`UnsignedInt64` variants collapse
/// into `Int`/`BigInt`: a narrower width is represented as a *type tag*
/// on the value (see [`Value::narrow_to`]), not as a separate variant.
/// Hexadecimal, octal, and binary literals always decode as `BigInt`
/// regardless of magnitude, matching §3's invariant.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueData {
    String(String),
    Bool(bool),
    Null,
    Int(i64),
    BigInt(BigInt),
    Float(f64),
}

impl ValueData {
    pub fn is_null(&self) -> bool {
        matches!(self, ValueData::Null)
    }
}

/// A decoded literal: its payload, an optional type annotation, and (for
/// format-preserving use) the exact source lexeme it was decoded from.
///
/// The four "date-ish" KDL types (`date`, `time`, `date-time`,
/// `duration`) are represented as `ValueData::String` carrying that type
/// tag rather than as separate variants — §9 explicitly permits this,
/// since the core never parses them into temporal structures.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    pub data: ValueData,
    pub ty: Option<String>,
    pub raw: Option<String>,
    pub span: Span,
}

impl Value {
    pub fn new(data: ValueData, span: Span) -> Self {
        Self { data, ty: None, raw: None, span }
    }

    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }

    pub fn string(s: impl Into<String>, span: Span) -> Self {
        Self::new(ValueData::String(s.into()), span)
    }

    pub fn bool(b: bool, span: Span) -> Self {
        Self::new(ValueData::Bool(b), span)
    }

    pub fn null(span: Span) -> Self {
        Self::new(ValueData::Null, span)
    }

    pub fn int(i: i64, span: Span) -> Self {
        Self::new(ValueData::Int(i), span)
    }

    pub fn big_int(i: BigInt, span: Span) -> Self {
        Self::new(ValueData::BigInt(i), span)
    }

    pub fn float(f: f64, span: Span) -> Self {
        Self::new(ValueData::Float(f), span)
    }

    pub fn as_string(&self) -> Option<&str> {
        match &self.data {
            ValueData::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match &self.data {
            ValueData::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        self.data.is_null()
    }

    pub fn as_float(&self) -> Option<f64> {
        match &self.data {
            ValueData::Float(f) => Some(*f),
            ValueData::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_big_integer(&self) -> Option<BigInt> {
        match &self.data {
            ValueData::BigInt(b) => Some(b.clone()),
            ValueData::Int(i) => Some(BigInt::from(*i)),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match &self.data {
            ValueData::Int(i) => Some(*i),
            ValueData::BigInt(b) => i64::try_from(b).ok(),
            _ => None,
        }
    }

    /// Narrows an integer value to a specific signed/unsigned bit width,
    /// returning `None` if the value does not fit. Mirrors the type-tag
    /// resolution described for fixed-width integers in §9.
    pub fn narrow_to(&self, width: IntWidth) -> Option<NarrowInt> {
        let big = self.as_big_integer()?;
        width.fits(&big)
    }
}

/// A fixed integer width a type tag may request (`i8`..`i64`, `u8`..`u64`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
}

impl IntWidth {
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "i8" => IntWidth::I8,
            "i16" => IntWidth::I16,
            "i32" => IntWidth::I32,
            "i64" => IntWidth::I64,
            "u8" => IntWidth::U8,
            "u16" => IntWidth::U16,
            "u32" => IntWidth::U32,
            "u64" => IntWidth::U64,
            _ => return None,
        })
    }

    fn fits(self, value: &BigInt) -> Option<NarrowInt> {
        macro_rules! try_signed {
            ($ty:ty, $variant:expr) => {
                <$ty>::try_from(value).ok().map($variant)
            };
        }
        macro_rules! try_unsigned {
            ($ty:ty, $variant:expr) => {
                <$ty>::try_from(value).ok().map($variant)
            };
        }
        match self {
            IntWidth::I8 => try_signed!(i8, NarrowInt::I8),
            IntWidth::I16 => try_signed!(i16, NarrowInt::I16),
            IntWidth::I32 => try_signed!(i32, NarrowInt::I32),
            IntWidth::I64 => try_signed!(i64, NarrowInt::I64),
            IntWidth::U8 => try_unsigned!(u8, NarrowInt::U8),
            IntWidth::U16 => try_unsigned!(u16, NarrowInt::U16),
            IntWidth::U32 => try_unsigned!(u32, NarrowInt::U32),
            IntWidth::U64 => try_unsigned!(u64, NarrowInt::U64),
        }
    }
}

/// The result of [`Value::narrow_to`]: a value known to fit in the
/// requested width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrowInt {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::pretty::write_value(f, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn as_int_widens_from_big_int_when_it_fits() {
        let v = Value::big_int(BigInt::from(42), Span::default());
        assert_eq!(v.as_int(), Some(42));
    }

    #[test]
    fn as_int_none_when_big_int_overflows_i64() {
        let huge = BigInt::from(i64::MAX) + BigInt::from(1);
        let v = Value::big_int(huge, Span::default());
        assert_eq!(v.as_int(), None);
    }

    #[test]
    fn narrow_to_rejects_out_of_range() {
        let v = Value::int(300, Span::default());
        assert_eq!(v.narrow_to(IntWidth::U8), None);
        assert_eq!(v.narrow_to(IntWidth::I16), Some(NarrowInt::I16(300)));
    }

    #[test]
    fn narrow_to_accepts_boundary_values() {
        let v = Value::int(255, Span::default());
        assert_eq!(v.narrow_to(IntWidth::U8), Some(NarrowInt::U8(255)));
        let v = Value::int(-1, Span::default());
        assert_eq!(v.narrow_to(IntWidth::U8), None);
    }

    #[test]
    fn as_float_widens_int() {
        let v = Value::int(3, Span::default());
        assert_eq!(v.as_float(), Some(3.0));
    }
}
