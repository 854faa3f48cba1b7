//! Trait for constructing phylogenetic trees during parsing.
//!
//! The [`TreeBuilder`] trait decouples the Newick parser from the concrete
//! tree representation. The parser calls builder methods as it reads the
//! Newick syntax, and the builder assembles whatever structure it wants.
//! [`PhyloTreeBuilder`](crate::model::PhyloTreeBuilder) builds the arena
//! [`PhyloTree`](crate::model::PhyloTree) the lineage finder walks.
//!
//! # Builder lifecycle
//! A builder can construct multiple trees sequentially:
//!
//! ```text
//! Empty ──→ init_next() ──→ Building ──→ add_*/set_name ──→ finish_tree() ──→ Empty
//!   ↑                                                                           │
//!   └───────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::parser::ParsingErrorKind;

// =#========================================================================#=
// TREE BUILDER (trait)
// =#========================================================================#=
/// Abstraction for constructing trees during parsing.
///
/// All `add_*` methods fail with [ParsingErrorKind::BuilderNotInitialized]
/// if called outside of the building state.
pub trait TreeBuilder {
    /// The type used to identify vertices during construction.
    ///
    /// Returned by the `add_*` methods, then passed to subsequent calls to
    /// connect parent-child relationships.
    type VertexIdx: Copy;

    /// The tree type produced by this builder.
    type Tree;

    /// Prepares the builder for constructing a new tree.
    ///
    /// # Arguments
    /// * `num_leaves` - Expected number of leaves (hint for allocation)
    fn init_next(&mut self, num_leaves: usize);

    /// Adds a leaf with its full tip label.
    fn add_leaf(
        &mut self,
        label: String,
        branch_len: Option<f64>,
    ) -> Result<Self::VertexIdx, ParsingErrorKind>;

    /// Adds an internal (non-root) vertex over previously added children.
    ///
    /// # Arguments
    /// * `children` - Indices returned by previous `add_*` calls, in input order
    /// * `support` - Internal label following the closing parenthesis, if any
    /// * `branch_len` - Branch length to parent, if specified
    fn add_internal(
        &mut self,
        children: Vec<Self::VertexIdx>,
        support: Option<String>,
        branch_len: Option<f64>,
    ) -> Result<Self::VertexIdx, ParsingErrorKind>;

    /// Adds the root vertex, completing the tree structure.
    fn add_root(
        &mut self,
        children: Vec<Self::VertexIdx>,
        support: Option<String>,
        branch_len: Option<f64>,
    ) -> Result<Self::VertexIdx, ParsingErrorKind>;

    /// Sets the name of the currently constructed tree.
    fn set_name(&mut self, tree_name: String);

    /// Finalizes the building process and returns the resulting tree,
    /// or `None` if no tree was under construction.
    fn finish_tree(&mut self) -> Option<Self::Tree>;
}
