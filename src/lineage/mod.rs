//! Lineage assignment of query tips in a reference tree.
//!
//! Tips of the reference tree carry their lineage inside their label
//! (see [FinderConfig]); a query tip carries none. [LineageFinder] assigns
//! the query the lineage of the closest decisive ancestor, built on the
//! label operations of [algebra].

pub mod algebra;
pub mod config;
pub mod error;
pub mod finder;

pub use algebra::{all_equal, get_basal_lineage, trim_to_common_ancestor};
pub use config::{FinderConfig, LineageField};
pub use error::LineageError;
pub use finder::{LineageFinder, Resolution};
