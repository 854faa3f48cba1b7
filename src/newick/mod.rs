//! Newick format parser and writer for rooted phylogenetic trees.
//!
//! This module provides [NewickParser] to parse Newick strings into
//! [PhyloTree]s via a [TreeBuilder](crate::model::TreeBuilder), and
//! [to_newick] / [write_newick_file] to write them back.
//!
//! # Quick API
//! * [`parse_file`] - parses all trees in a file
//! * [`parse_str`] - parses a single string
//!
//! # Format
//! * `tree ::= internal_vertex ';'`
//! * `vertex ::= leaf | internal_vertex`
//! * `internal_vertex ::= '(' vertex (',' vertex)* ')' [label] [branch_length]`
//! * `leaf ::= label [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Labels may be single quoted, with `''` standing for a quote inside
//! * Whitespace and newlines can occur between elements,
//!   just not within an unquoted label or a branch length
//! * Comments are square brackets and can occur wherever whitespace can;
//!   annotation blocks like `[&rate=0.5]` are skipped as comments
//! * The label of an internal vertex is its support annotation,
//!   e.g. `77` in `((A,B)77,C);`

mod defs;
pub mod parser;
pub mod writer;

pub use parser::{NewickIterator, NewickParser};
pub use writer::{to_newick, write_newick_file};

use crate::model::PhyloTree;
use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a file containing one or more semicolon-terminated Newick strings.
///
/// # Errors
/// Returns a [ParsingError] if the file cannot be read or any tree is invalid.
///
/// # Example
/// ```no_run
/// use lineage_finder::newick::parse_file;
///
/// let trees = parse_file("reference.nwk")?;
/// println!("Parsed {} trees", trees.len());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<PhyloTree>, ParsingError> {
    let byte_parser = ByteParser::from_file(path)?;
    NewickParser::new_defaults().parse_all(byte_parser)
}

/// Parses a single Newick string into a [PhyloTree].
///
/// # Example
/// ```
/// use lineage_finder::newick::parse_str;
///
/// let tree = parse_str("(A|A,(B|B,((C|B.1,test),D|B.1)77));")?;
/// assert_eq!(tree.num_leaves(), 5);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<PhyloTree, ParsingError> {
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    NewickParser::new_defaults().parse_str(&mut byte_parser)
}
