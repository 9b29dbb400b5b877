use syntax::{Diagnostic, Span};

/// A position in the input together with the diagnostic buffer length at
/// that position. Restoring a snapshot rolls back both, which is what
/// makes speculative parsing "pure" (§4.2, §9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    offset: usize,
    diagnostic_len: usize,
}

/// Scans a `&str` one Unicode scalar at a time, tracking a byte offset and
/// accumulating diagnostics. Modeled on the byte-cursor idiom (`peek`,
/// `peek_by`, `advance`, `advance_by`, `is_eof`), generalized to decode
/// UTF-8 scalars instead of raw bytes.
pub struct Cursor<'source> {
    source: &'source str,
    offset: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'source> Cursor<'source> {
    pub fn new(source: &'source str) -> Self {
        Self { source, offset: 0, diagnostics: Vec::new() }
    }

    pub fn source(&self) -> &'source str {
        self.source
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// The scalar at the cursor, without advancing.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The scalar `n` positions ahead of the cursor, without advancing.
    pub fn peek_by(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    /// The unconsumed remainder of the source.
    pub fn rest(&self) -> &'source str {
        &self.source[self.offset..]
    }

    /// True if the unconsumed remainder starts with `s`.
    pub fn starts_with(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    /// Consumes and returns the scalar at the cursor, or `None` at EOF.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        Some(c)
    }

    /// Consumes `n` bytes unconditionally (used once a prefix match, e.g.
    /// `"""`, is already known to be ASCII and present).
    pub fn advance_by(&mut self, n: usize) {
        self.offset += n;
    }

    /// Consumes the scalar at the cursor if it equals `c`.
    pub fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the scalars matched by `pred` for as long as it holds.
    pub fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) -> usize {
        let mut n = 0;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.advance();
            n += 1;
        }
        n
    }

    pub fn span_from(&self, start: usize) -> Span {
        Span::from_bounds(start, self.offset)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot { offset: self.offset, diagnostic_len: self.diagnostics.len() }
    }

    pub fn restore(&mut self, snapshot: Snapshot) {
        self.offset = snapshot.offset;
        self.diagnostics.truncate(snapshot.diagnostic_len);
    }

    /// Rewinds the offset only, leaving any recorded diagnostics in
    /// place. Used when a committed scan bails out before consuming
    /// anything but after diagnostics (if any) were already pushed for an
    /// earlier sibling construct.
    pub fn restore_to(&mut self, offset: usize) {
        self.offset = offset;
    }

    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use syntax::DiagnosticKind;

    #[test]
    fn advance_tracks_multi_byte_scalars() {
        let mut cursor = Cursor::new("a\u{00e9}b");
        assert_eq!(cursor.advance(), Some('a'));
        assert_eq!(cursor.offset(), 1);
        assert_eq!(cursor.advance(), Some('\u{00e9}'));
        assert_eq!(cursor.offset(), 3);
        assert_eq!(cursor.advance(), Some('b'));
        assert_eq!(cursor.offset(), 4);
        assert_eq!(cursor.advance(), None);
    }

    #[test]
    fn snapshot_restore_rolls_back_position_and_diagnostics() {
        let mut cursor = Cursor::new("abc");
        let snap = cursor.snapshot();
        cursor.advance();
        cursor.push_diagnostic(Diagnostic::error(DiagnosticKind::UnexpectedCharacter, Span::new(0, 1)));
        assert_eq!(cursor.diagnostics().len(), 1);
        cursor.restore(snap);
        assert_eq!(cursor.offset(), 0);
        assert!(cursor.diagnostics().is_empty());
    }

    #[test]
    fn eat_while_stops_at_first_non_match() {
        let mut cursor = Cursor::new("aaab");
        let n = cursor.eat_while(|c| c == 'a');
        assert_eq!(n, 3);
        assert_eq!(cursor.peek(), Some('b'));
    }
}
