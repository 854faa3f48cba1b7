//! Error types for the Newick parser.
//!
//! This module provides [ParsingError] and [ParsingErrorKind] for representing
//! and reporting errors that occur while reading a tree.

use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use thiserror::Error;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSING ERROR KIND
// =#========================================================================#=
/// Kinds of errors that can occur while parsing a Newick string.
#[derive(Error, PartialEq, Debug, Clone)]
pub enum ParsingErrorKind {
    #[error("IO error - {0}")]
    IoError(String),
    #[error("Unexpected end of input")]
    UnexpectedEof,
    #[error("Unclosed comment")]
    UnclosedComment,
    #[error("Unclosed quoted label")]
    UnclosedQuote,
    #[error("Invalid Newick string: {0}")]
    InvalidNewickString(String),
    #[error("Builder not initialized")]
    BuilderNotInitialized,
    #[error("Invalid tree structure")]
    InvalidTreeStructure,
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================#=
/// Parsing error with contextual information (position and surrounding bytes).
#[derive(Error, Debug, Clone)]
#[error("{kind} at position {position}{}", render_context(.context))]
pub struct ParsingError {
    kind: ParsingErrorKind,
    position: usize,
    context: String,
}

fn render_context(context: &str) -> String {
    if context.is_empty() {
        String::new()
    } else {
        format!("\n  Context (next {} bytes): {}", context.len(), context)
    }
}

impl ParsingError {
    /// Creates a [ParsingError] from an error kind and the parser state.
    pub fn from_parser<S: ByteSource>(kind: ParsingErrorKind, parser: &ByteParser<S>) -> Self {
        Self {
            kind,
            position: parser.position(),
            context: parser.get_context_as_string(DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Convenience constructor for [ParsingErrorKind::UnexpectedEof]
    pub fn unexpected_eof<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorKind::UnexpectedEof, parser)
    }

    /// Convenience constructor for [ParsingErrorKind::UnclosedComment]
    pub fn unclosed_comment<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorKind::UnclosedComment, parser)
    }

    /// Convenience constructor for [ParsingErrorKind::UnclosedQuote]
    pub fn unclosed_quote<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorKind::UnclosedQuote, parser)
    }

    /// Convenience constructor for [ParsingErrorKind::InvalidNewickString]
    pub fn invalid_newick_string<S: ByteSource>(parser: &ByteParser<S>, msg: String) -> Self {
        Self::from_parser(ParsingErrorKind::InvalidNewickString(msg), parser)
    }

    /// Creates a [ParsingError] without parser context (e.g. for builder errors).
    pub fn without_context(kind: ParsingErrorKind) -> Self {
        Self {
            kind,
            position: 0,
            context: String::new(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &ParsingErrorKind {
        &self.kind
    }

    /// Returns the byte offset at which the error occurred.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl From<std::io::Error> for ParsingError {
    fn from(err: std::io::Error) -> Self {
        ParsingError::without_context(ParsingErrorKind::IoError(err.to_string()))
    }
}
