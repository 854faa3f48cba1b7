//! Vertex module for phylogenetic tree representation.

use crate::model::tree::VertexIndex;
use std::ops::Deref;

/// During construction, Internal and Leaf vertices might not have parent set yet.
const NO_PARENT_SET: VertexIndex = usize::MAX;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (node) in a rooted phylogenetic tree of arbitrary arity.
///
/// A vertex can be either:
/// - **Root**: Has children, no parent, optional support label
/// - **Internal**: Has parent and children, optional support label
/// - **Leaf**: Has parent and a label, no children
///
/// # Invariants
/// - `index` is the position of the vertex in the arena
/// - `branch_length` is non-negative (enforced by [BranchLength]); might not be set
/// - Non-root vertices have `parent` set once construction is done;
///   `NO_PARENT_SET` only occurs during construction
/// - `support` is kept verbatim as found in the tree (e.g. `"77"`, `"0.98"`)
#[derive(PartialEq, Debug, Clone)]
pub enum Vertex {
    /// Root vertex of the tree
    Root {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Indices of the child vertices, in input order
        children: Vec<VertexIndex>,
        /// Support annotation (internal label), if any
        support: Option<String>,
        /// Rarely given, but allowed in Newick
        branch_length: Option<BranchLength>,
    },
    /// Internal vertex
    Internal {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Index of the parent vertex
        parent: VertexIndex,
        /// Indices of the child vertices, in input order
        children: Vec<VertexIndex>,
        /// Support annotation (internal label), if any
        support: Option<String>,
        /// Distance to parent
        branch_length: Option<BranchLength>,
    },
    /// Leaf vertex (tip)
    Leaf {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Index of the parent vertex
        parent: VertexIndex,
        /// Full tip label, e.g. `"England/MILK-9E05B3/2020|B.1.1.7"`
        label: String,
        /// Distance to parent
        branch_length: Option<BranchLength>,
    },
}

impl Vertex {
    /// Creates a new root vertex.
    pub fn new_root(
        index: VertexIndex,
        children: Vec<VertexIndex>,
        support: Option<String>,
        branch_length: Option<BranchLength>,
    ) -> Self {
        Vertex::Root {
            index,
            children,
            support,
            branch_length,
        }
    }

    /// Creates a new internal (non-leaf, non-root) vertex.
    pub fn new_internal(
        index: VertexIndex,
        children: Vec<VertexIndex>,
        support: Option<String>,
        branch_length: Option<BranchLength>,
    ) -> Self {
        Vertex::Internal {
            index,
            parent: NO_PARENT_SET,
            children,
            support,
            branch_length,
        }
    }

    /// Creates a new leaf vertex.
    pub fn new_leaf(index: VertexIndex, label: String, branch_length: Option<BranchLength>) -> Self {
        Vertex::Leaf {
            index,
            parent: NO_PARENT_SET,
            label,
            branch_length,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        match self {
            Vertex::Root { index, .. }
            | Vertex::Internal { index, .. }
            | Vertex::Leaf { index, .. } => *index,
        }
    }

    /// Returns `true` if this vertex is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Vertex::Leaf { .. })
    }

    /// Returns `true` if this vertex is an internal (non-root) vertex.
    pub fn is_internal(&self) -> bool {
        matches!(self, Vertex::Internal { .. })
    }

    /// Returns `true` if this vertex is the root.
    pub fn is_root(&self) -> bool {
        matches!(self, Vertex::Root { .. })
    }

    /// Returns the child indices; empty for a leaf.
    pub fn children(&self) -> &[VertexIndex] {
        match self {
            Vertex::Root { children, .. } | Vertex::Internal { children, .. } => children.as_slice(),
            Vertex::Leaf { .. } => &[],
        }
    }

    /// Returns the tip label if this is a leaf, else `None`.
    pub fn label(&self) -> Option<&str> {
        match self {
            Vertex::Leaf { label, .. } => Some(label),
            _ => None,
        }
    }

    /// Returns the support annotation of a root or internal vertex, if set.
    pub fn support(&self) -> Option<&str> {
        match self {
            Vertex::Root { support, .. } | Vertex::Internal { support, .. } => support.as_deref(),
            Vertex::Leaf { .. } => None,
        }
    }

    /// Returns the branch length, if set.
    pub fn branch_length(&self) -> Option<BranchLength> {
        match self {
            Vertex::Root { branch_length, .. }
            | Vertex::Internal { branch_length, .. }
            | Vertex::Leaf { branch_length, .. } => *branch_length,
        }
    }

    /// Returns whether this vertex has a [BranchLength].
    pub fn has_branch_length(&self) -> bool {
        self.branch_length().is_some()
    }

    /// Replaces the branch length.
    pub fn set_branch_length(&mut self, length: Option<BranchLength>) {
        match self {
            Vertex::Root { branch_length, .. }
            | Vertex::Internal { branch_length, .. }
            | Vertex::Leaf { branch_length, .. } => *branch_length = length,
        }
    }

    /// Sets the parent of a non-root vertex; ignored on the root.
    pub fn set_parent(&mut self, parent: VertexIndex) {
        match self {
            Vertex::Root { .. } => {}
            Vertex::Internal { parent: p, .. } | Vertex::Leaf { parent: p, .. } => *p = parent,
        }
    }

    /// Returns the index of the parent if this is a non-root vertex
    /// with its parent already set, else `None`.
    pub fn parent(&self) -> Option<VertexIndex> {
        match self {
            Vertex::Internal { parent, .. } | Vertex::Leaf { parent, .. } => {
                if *parent == NO_PARENT_SET {
                    None
                } else {
                    Some(*parent)
                }
            }
            Vertex::Root { .. } => None,
        }
    }

    /// Returns `true` if this vertex has a parent set.
    pub fn has_parent(&self) -> bool {
        self.parent().is_some()
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree, enforced non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length.
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite. Use
    /// [`try_new`](Self::try_new) for unchecked input.
    pub fn new(length: f64) -> Self {
        assert!(length >= 0.0, "Branch length must be non-negative, got {}", length);
        assert!(length.is_finite(), "Branch length must be finite, got {}", length);
        BranchLength(length)
    }

    /// Creates a new branch length, or `None` if `length` is negative or not finite.
    pub fn try_new(length: f64) -> Option<Self> {
        (length >= 0.0 && length.is_finite()).then_some(BranchLength(length))
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_accessors() {
        let mut leaf = Vertex::new_leaf(3, "C|B.1".to_string(), Some(BranchLength::new(0.5)));
        assert!(leaf.is_leaf());
        assert_eq!(leaf.label(), Some("C|B.1"));
        assert_eq!(leaf.support(), None);
        assert!(leaf.children().is_empty());
        assert!(!leaf.has_parent());

        leaf.set_parent(7);
        assert_eq!(leaf.parent(), Some(7));
    }

    #[test]
    fn test_root_has_no_parent() {
        let mut root = Vertex::new_root(4, vec![0, 1, 2], Some("77".to_string()), None);
        root.set_parent(9);
        assert!(root.is_root());
        assert_eq!(root.parent(), None);
        assert_eq!(root.children(), &[0, 1, 2]);
        assert_eq!(root.support(), Some("77"));
    }

    #[test]
    fn test_branch_length_checks() {
        assert!(BranchLength::try_new(-0.1).is_none());
        assert!(BranchLength::try_new(f64::INFINITY).is_none());
        assert_eq!(*BranchLength::try_new(1.5).unwrap(), 1.5);
    }

    #[test]
    #[should_panic]
    fn test_negative_branch_length_panics() {
        BranchLength::new(-1.0);
    }
}
