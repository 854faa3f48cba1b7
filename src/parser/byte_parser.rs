//! Low-level byte-by-byte parser for ASCII-delimited text.
//!
//! This module provides [ByteParser] with support for peeking, consuming,
//! comment skipping and quote-aware label parsing. It is the foundation of
//! the [Newick parser](crate::newick::NewickParser).

use crate::parser::byte_source::{ByteSource, InMemoryByteSource};
use crate::parser::parsing_error::ParsingError;
use std::path::Path;

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser with support for peeking, consuming and skipping.
///
/// Delimiters are matched as ASCII bytes, while labels are collected as raw
/// bytes and decoded as UTF-8, so non-ASCII taxon names survive parsing.
///
/// # Example
/// ```
/// use lineage_finder::parser::byte_parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("  [comment] 'A|B.1':0.5");
/// parser.skip_comment_and_whitespace().unwrap();
/// let label = parser.parse_label(b",):;").unwrap();
/// assert_eq!(label, "A|B.1");
/// assert!(parser.consume_if(b':'));
/// ```
pub struct ByteParser<S: ByteSource> {
    source: S,
}

impl ByteParser<InMemoryByteSource> {
    /// Creates a new [ByteParser] from a string by copying it.
    pub fn for_str(input: &str) -> Self {
        Self::new(InMemoryByteSource::from_vec(input.as_bytes().to_vec()))
    }

    /// Creates a new [ByteParser] from a byte slice by copying it.
    pub fn for_bytes(input: &[u8]) -> Self {
        Self::new(InMemoryByteSource::from_vec(input.to_vec()))
    }

    /// Creates a new [ByteParser] reading the whole file into memory.
    ///
    /// # Errors
    /// Returns a [ParsingError] of kind `IoError` if the file cannot be read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParsingError> {
        let bytes = std::fs::read(path)?;
        Ok(Self::new(InMemoryByteSource::from_vec(bytes)))
    }
}

impl<S: ByteSource> ByteParser<S> {
    /// Creates a new [ByteParser] from a byte source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Peeks at the current byte without consuming it.
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.source.peek()
    }

    /// Gets the current byte and advances the position.
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        self.source.next_byte()
    }

    /// Skips all consecutive whitespace (space, tab, newline, carriage return).
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b == b' ' || b == b'\t' || b == b'\n' || b == b'\r' {
                self.next_byte();
            } else {
                break;
            }
        }
    }

    /// Skips a `[...]` comment if present.
    ///
    /// # Returns
    /// * `Ok(true)` - A comment was found and consumed
    /// * `Ok(false)` - No comment at current position
    /// * `Err(ParsingError)` - Comment was opened but never closed
    pub fn skip_comment(&mut self) -> Result<bool, ParsingError> {
        if self.consume_if(b'[') {
            if !self.consume_through(b']') {
                return Err(ParsingError::unclosed_comment(self));
            }
            return Ok(true);
        }

        Ok(false)
    }

    /// Skips all consecutive whitespace and `[...]` comments.
    pub fn skip_comment_and_whitespace(&mut self) -> Result<(), ParsingError> {
        self.skip_whitespace();

        while self.skip_comment()? {
            self.skip_whitespace();
        }

        Ok(())
    }

    /// Returns `true` if the current byte equals `ch`.
    #[inline]
    pub fn peek_is(&self, ch: u8) -> bool {
        self.peek() == Some(ch)
    }

    /// Returns `true` if the following bytes equal `sequence`, without consuming them.
    pub fn peek_is_sequence(&self, sequence: &[u8]) -> bool {
        self.source.peek_slice(sequence.len()) == sequence
    }

    /// Consumes the current byte if it equals `ch`.
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek_is(ch) {
            self.next_byte();
            true
        } else {
            false
        }
    }

    /// Consumes bytes up to and including `target`.
    ///
    /// # Returns
    /// `true` if the target was found, `false` if EOF was reached first
    pub fn consume_through(&mut self, target: u8) -> bool {
        while let Some(b) = self.next_byte() {
            if b == target {
                return true;
            }
        }
        false
    }

    /// Returns whether the end of data has been reached.
    pub fn is_eof(&self) -> bool {
        self.source.is_eof()
    }

    /// Returns the current byte offset in the input.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Returns up to `k` bytes from the current position as (lossy) string,
    /// used as context in error messages.
    pub fn get_context_as_string(&self, k: usize) -> String {
        String::from_utf8_lossy(self.source.peek_slice(k)).into_owned()
    }

    /// Parses a label (quoted or unquoted) ending at any of the given delimiters.
    ///
    /// Leading whitespace and comments are skipped. An unquoted label may be
    /// empty if a delimiter follows immediately.
    ///
    /// # Errors
    /// Returns an error if a quoted label is never closed or a comment is
    /// unclosed.
    pub fn parse_label(&mut self, delimiters: &[u8]) -> Result<String, ParsingError> {
        self.skip_comment_and_whitespace()?;

        if self.peek_is(b'\'') {
            self.parse_quoted_label()
        } else {
            Ok(self.parse_unquoted_label(delimiters))
        }
    }

    /// Parses a label enclosed in single quotes, the opening quote not yet consumed.
    ///
    /// Doubled single quotes inside the label stand for one quote
    /// (`'Wilson''s'` becomes `Wilson's`).
    pub fn parse_quoted_label(&mut self) -> Result<String, ParsingError> {
        self.next_byte(); // opening '

        let mut bytes = Vec::new();
        loop {
            match self.next_byte() {
                Some(b'\'') => {
                    if self.consume_if(b'\'') {
                        bytes.push(b'\'');
                    } else {
                        break;
                    }
                }
                Some(b) => bytes.push(b),
                None => return Err(ParsingError::unclosed_quote(self)),
            }
        }

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Parses an unquoted label until any of the given delimiters (or EOF).
    pub fn parse_unquoted_label(&mut self, delimiters: &[u8]) -> String {
        let mut bytes = Vec::new();

        while let Some(b) = self.peek() {
            if delimiters.contains(&b) {
                break;
            }
            bytes.push(b);
            self.next_byte();
        }

        String::from_utf8_lossy(&bytes).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parsing_error::ParsingErrorKind;

    #[test]
    fn test_skip_comment_and_whitespace() {
        let mut parser = ByteParser::for_str(" \n[a comment] \t[another]X");
        parser.skip_comment_and_whitespace().unwrap();
        assert_eq!(parser.peek(), Some(b'X'));
    }

    #[test]
    fn test_unclosed_comment() {
        let mut parser = ByteParser::for_str("[never closed");
        let err = parser.skip_comment_and_whitespace().unwrap_err();
        assert_eq!(err.kind(), &ParsingErrorKind::UnclosedComment);
    }

    #[test]
    fn test_quoted_label_with_escaped_quote() {
        let mut parser = ByteParser::for_str("'Wilson''s Storm-petrel|B.1',");
        let label = parser.parse_label(b",").unwrap();
        assert_eq!(label, "Wilson's Storm-petrel|B.1");
        assert_eq!(parser.peek(), Some(b','));
    }

    #[test]
    fn test_unclosed_quote() {
        let mut parser = ByteParser::for_str("'no end");
        let err = parser.parse_label(b",").unwrap_err();
        assert_eq!(err.kind(), &ParsingErrorKind::UnclosedQuote);
    }

    #[test]
    fn test_unquoted_label_stops_at_delimiter() {
        let mut parser = ByteParser::for_str("hCoV-19/x|B.1.1.7:0.1");
        let label = parser.parse_label(b":,);").unwrap();
        assert_eq!(label, "hCoV-19/x|B.1.1.7");
        assert!(parser.peek_is_sequence(b":0.1"));
    }

    #[test]
    fn test_non_ascii_label() {
        let mut parser = ByteParser::for_str("Kākāpō|A)");
        assert_eq!(parser.parse_label(b")").unwrap(), "Kākāpō|A");
    }
}
