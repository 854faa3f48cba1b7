//! Data model for rooted phylogenetic trees.
//!
//! # Tree representation
//! Trees are represented by [PhyloTree], which uses the arena pattern to store
//! [Vertex] nodes. Each vertex is either a `Root`, `Internal`, or `Leaf`,
//! referenced by [VertexIndex], and may have any number of children.
//! Leaves own their full tip label; root and internal vertices may carry a
//! support annotation.
//!
//! # Building trees
//! Trees are typically constructed during parsing via the [TreeBuilder]
//! trait, which decouples the Newick parser from concrete tree types;
//! [PhyloTreeBuilder] builds a [PhyloTree].
//!
//! # Normalisation
//! [PhyloTree::collapse_unsupported] (see [collapse]) derives a new tree
//! without internal vertices that lack support.

pub mod collapse;
pub mod phylo_tree_builder;
pub mod tree;
pub mod tree_builder;
pub mod vertex;

pub use phylo_tree_builder::PhyloTreeBuilder;
pub use tree::PhyloTree;
pub use tree::VertexIndex;
pub use tree_builder::TreeBuilder;
pub use vertex::{BranchLength, Vertex};
