//! Lineage-finder assigns hierarchical lineage labels, like `B.1.617.2`,
//! to query tips of a phylogenetic tree.
//!
//! The tips of a reference tree carry their lineage as one field of their
//! label (e.g. `C|B.1`), a query tip carries none. The lineage of a query is
//! decided at its closest ancestor whose subtree is decisive.
//! Core functionality provided:
//! - Newick: Parse (and write) rooted trees with polytomies and internal
//!   support annotations, see [crate::newick].
//! - Tree model: [PhyloTree] in arena style, with read-only traversal
//!   primitives and collapsing of unsupported internal vertices,
//!   see [crate::model].
//! - Lineage algebra: equality, common ancestor and basal lineage of sets of
//!   dot-separated lineages, see [crate::lineage::algebra].
//! - Resolver: [LineageFinder] walks from the query towards the root and
//!   stops at the first decisive ancestor.
//! - Batch: [report::assign_all] assigns many queries in parallel and
//!   [report::write_report] writes a CSV report.
//! - Configurability: label separator, lineage field position and whether
//!   to collapse, see [FinderConfig].
//!
//! # Example
//! ```
//! use lineage_finder::{FinderConfig, find_lineage, parse_newick_str};
//!
//! let tree = parse_newick_str("(A|A,(B|B,((C|B.1,c1|B.1),(D|B.1,d1|B.1),test)77));")?;
//! let resolution = find_lineage(&tree, "test", &FinderConfig::default())?;
//!
//! assert_eq!(resolution.lineage, "B.1");
//! assert_eq!(resolution.support, "77");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Example Configuration
//! ```
//! use lineage_finder::{FinderConfig, LineageField, find_lineage, parse_newick_str};
//!
//! // Lineage is the third field of '/'-separated labels
//! let config = FinderConfig::default()
//!     .with_separator('/')
//!     .with_lineage_field(LineageField::OneIndexed(3))
//!     .without_collapse();
//!
//! let tree = parse_newick_str("(x/UK/A,(y/UK/B.1,z/US/B.1,query)90);")?;
//! let (lineage, support) = find_lineage(&tree, "query", &config)?.into();
//! assert_eq!((lineage.as_str(), support.as_str()), ("B.1", "90"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod lineage;
pub mod model;
pub mod newick;
pub mod parser;
pub mod report;

pub use crate::lineage::{FinderConfig, LineageError, LineageField, LineageFinder, Resolution};
pub use crate::model::PhyloTree;

use crate::parser::ParsingError;
use std::path::Path;

// ============================================================================
// Quick Newick API
// ============================================================================
/// Parse a Newick string using default settings, returning a [PhyloTree].
///
/// See [`newick::parse_str`] for full documentation.
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<PhyloTree, ParsingError> {
    newick::parse_str(newick)
}

/// Parse a file of semicolon-terminated Newick strings using default
/// settings, returning all trees.
///
/// See [`newick::parse_file`] for full documentation.
pub fn parse_newick_file<P: AsRef<Path>>(path: P) -> Result<Vec<PhyloTree>, ParsingError> {
    newick::parse_file(path)
}

// ============================================================================
// Quick Lineage API
// ============================================================================
/// Assigns a lineage to the tip labelled `query`.
///
/// Shorthand for [LineageFinder::new] followed by [LineageFinder::get_lineage].
pub fn find_lineage(
    tree: &PhyloTree,
    query: &str,
    config: &FinderConfig,
) -> Result<Resolution, LineageError> {
    LineageFinder::new(tree, query, config).get_lineage()
}
