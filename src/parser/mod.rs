//! Low-level parsing infrastructure.
//!
//! Provides the byte-level [ByteParser](byte_parser::ByteParser) the
//! [Newick parser](crate::newick::NewickParser) is built on, the
//! [ParsingError] reported by it and label quoting helpers.

pub mod byte_parser;
pub mod byte_source;
pub mod parsing_error;
pub mod utils;

pub use parsing_error::{ParsingError, ParsingErrorKind};
