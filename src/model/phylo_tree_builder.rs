//! Provides the [TreeBuilder] implementation for [PhyloTree].

use crate::model::tree_builder::TreeBuilder;
use crate::model::vertex::BranchLength;
use crate::model::{PhyloTree, VertexIndex};
use crate::parser::ParsingErrorKind;

/// Builder that constructs [PhyloTree] instances during parsing.
///
/// Branch lengths handed to this builder must already be validated as
/// non-negative and finite (the [Newick parser](crate::newick::NewickParser)
/// does so); invalid ones are reported as
/// [ParsingErrorKind::InvalidTreeStructure].
#[derive(Debug, Default)]
pub struct PhyloTreeBuilder {
    current_tree: Option<PhyloTree>,
}

impl PhyloTreeBuilder {
    /// Creates a new builder in the empty state.
    pub fn new() -> Self {
        Self { current_tree: None }
    }

    fn tree_mut(&mut self) -> Result<&mut PhyloTree, ParsingErrorKind> {
        self.current_tree
            .as_mut()
            .ok_or(ParsingErrorKind::BuilderNotInitialized)
    }
}

fn to_branch_length(branch_len: Option<f64>) -> Result<Option<BranchLength>, ParsingErrorKind> {
    match branch_len {
        None => Ok(None),
        Some(length) => BranchLength::try_new(length)
            .map(Some)
            .ok_or(ParsingErrorKind::InvalidTreeStructure),
    }
}

impl TreeBuilder for PhyloTreeBuilder {
    type VertexIdx = VertexIndex;
    type Tree = PhyloTree;

    fn init_next(&mut self, num_leaves: usize) {
        // A tree with n leaves has at most 2n - 1 vertices
        self.current_tree = Some(PhyloTree::with_capacity(2 * num_leaves.max(1) - 1));
    }

    fn add_leaf(
        &mut self,
        label: String,
        branch_len: Option<f64>,
    ) -> Result<VertexIndex, ParsingErrorKind> {
        let branch_length = to_branch_length(branch_len)?;
        Ok(self.tree_mut()?.add_leaf(label, branch_length))
    }

    fn add_internal(
        &mut self,
        children: Vec<VertexIndex>,
        support: Option<String>,
        branch_len: Option<f64>,
    ) -> Result<VertexIndex, ParsingErrorKind> {
        let branch_length = to_branch_length(branch_len)?;
        Ok(self
            .tree_mut()?
            .add_internal_vertex(children, support, branch_length))
    }

    fn add_root(
        &mut self,
        children: Vec<VertexIndex>,
        support: Option<String>,
        branch_len: Option<f64>,
    ) -> Result<VertexIndex, ParsingErrorKind> {
        let branch_length = to_branch_length(branch_len)?;
        Ok(self.tree_mut()?.add_root(children, support, branch_length))
    }

    fn set_name(&mut self, tree_name: String) {
        if let Some(tree) = &mut self.current_tree {
            tree.set_name(tree_name);
        }
    }

    fn finish_tree(&mut self) -> Option<PhyloTree> {
        self.current_tree.take()
    }
}
