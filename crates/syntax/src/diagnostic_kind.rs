#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
/// Enumerates diagnostic categories emitted by the lexer/parser (§7).
pub enum DiagnosticKind {
    // --- Lexical ---
    DisallowedCodepoint = 1,
    UnescapedNewlineInString = 2,
    InvalidEscape = 3,
    InvalidUnicodeEscape = 4,
    UnclosedString = 5,
    UnclosedMultilineString = 6,
    UnclosedRawString = 7,
    UnclosedBlockComment = 8,
    InvalidRadixDigit = 9,
    InvalidUnderscorePlacement = 10,
    MissingDigits = 11,
    MultipleDecimalPointsOrExponents = 12,
    MultilineStringDedentMismatch = 13,
    NumberAbutsIdentifier = 14,
    BadEscline = 15,

    // --- Grammatical ---
    ExpectedIdentifierAfterOpenParen = 30,
    ExpectedCloseParenForType = 31,
    ExpectedValueAfterType = 32,
    ExpectedNodeNameAfterType = 33,
    ExpectedCloseBraceForChildren = 34,
    UnexpectedCharacterAfterChildren = 35,
    UnexpectedCharacterAbuttingNodeName = 36,
    UnexpectedCharacter = 37,
    UnexpectedEndOfInput = 38,

    // --- Semantic ---
    ReservedKeywordAsIdentifier = 50,
    ReservedKeywordAsPropertyKey = 51,
    TrailingInputAfterDocument = 52,
}

impl DiagnosticKind {
    /// Human-readable label for this diagnostic kind, used in emitted messages.
    pub fn as_str(&self) -> &'static str {
        use DiagnosticKind::*;
        match self {
            DisallowedCodepoint => "disallowed codepoint",
            UnescapedNewlineInString => "unescaped newline in string",
            InvalidEscape => "invalid escape sequence",
            InvalidUnicodeEscape => "invalid unicode escape",
            UnclosedString => "unclosed string",
            UnclosedMultilineString => "unclosed multiline string",
            UnclosedRawString => "unclosed raw string",
            UnclosedBlockComment => "unclosed block comment",
            InvalidRadixDigit => "invalid digit for radix",
            InvalidUnderscorePlacement => "misplaced digit-grouping underscore",
            MissingDigits => "missing digits",
            MultipleDecimalPointsOrExponents => "multiple decimal points or exponents",
            MultilineStringDedentMismatch => "line does not start with the multiline string's dedent prefix",
            NumberAbutsIdentifier => "number abuts an identifier character",
            BadEscline => "malformed line continuation",
            ExpectedIdentifierAfterOpenParen => "expected identifier after `(`",
            ExpectedCloseParenForType => "expected `)` closing type annotation",
            ExpectedValueAfterType => "expected value after type annotation",
            ExpectedNodeNameAfterType => "expected node name after type annotation",
            ExpectedCloseBraceForChildren => "expected `}` closing children block",
            UnexpectedCharacterAfterChildren => "unexpected character after children block",
            UnexpectedCharacterAbuttingNodeName => "unexpected character abutting node name",
            UnexpectedCharacter => "unexpected character",
            UnexpectedEndOfInput => "unexpected end of input",
            ReservedKeywordAsIdentifier => "reserved keyword cannot be used as a bare identifier",
            ReservedKeywordAsPropertyKey => "reserved keywords cannot be used as bare property keys",
            TrailingInputAfterDocument => "trailing input after document end",
        }
    }
}

impl From<u16> for DiagnosticKind {
    #[inline]
    /// Converts a serialized discriminant into a diagnostic kind; panics on unknown values.
    fn from(d: u16) -> DiagnosticKind {
        use DiagnosticKind::*;
        match d {
            1 => DisallowedCodepoint,
            2 => UnescapedNewlineInString,
            3 => InvalidEscape,
            4 => InvalidUnicodeEscape,
            5 => UnclosedString,
            6 => UnclosedMultilineString,
            7 => UnclosedRawString,
            8 => UnclosedBlockComment,
            9 => InvalidRadixDigit,
            10 => InvalidUnderscorePlacement,
            11 => MissingDigits,
            12 => MultipleDecimalPointsOrExponents,
            13 => MultilineStringDedentMismatch,
            14 => NumberAbutsIdentifier,
            15 => BadEscline,
            30 => ExpectedIdentifierAfterOpenParen,
            31 => ExpectedCloseParenForType,
            32 => ExpectedValueAfterType,
            33 => ExpectedNodeNameAfterType,
            34 => ExpectedCloseBraceForChildren,
            35 => UnexpectedCharacterAfterChildren,
            36 => UnexpectedCharacterAbuttingNodeName,
            37 => UnexpectedCharacter,
            38 => UnexpectedEndOfInput,
            50 => ReservedKeywordAsIdentifier,
            51 => ReservedKeywordAsPropertyKey,
            52 => TrailingInputAfterDocument,
            _ => panic!("invalid DiagnosticKind discriminant: {}", d),
        }
    }
}

impl From<DiagnosticKind> for u16 {
    #[inline]
    /// Serializes a diagnostic kind to its numeric discriminant for storage or transport.
    fn from(k: DiagnosticKind) -> u16 {
        k as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn round_trips_through_u16() {
        let kind = DiagnosticKind::UnclosedBlockComment;
        let code: u16 = kind.into();
        assert_eq!(DiagnosticKind::from(code), kind);
    }

    #[test]
    #[should_panic(expected = "invalid DiagnosticKind discriminant")]
    fn unknown_discriminant_panics() {
        let _ = DiagnosticKind::from(9999);
    }
}
