//! Provides the arena tree representation.
//!
//! * [PhyloTree] - rooted tree of arbitrary arity using the arena pattern
//! * [VertexIndex] - type used to index vertices in the arena
//! * [PreOrderIter], [PostOrderIter] - stack based traversals

use crate::model::vertex::{BranchLength, Vertex};
use crate::newick;

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: VertexIndex = usize::MAX;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A rooted phylogenetic tree represented using the arena pattern on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by
/// [VertexIndex], each holding the index of its parent and the list of
/// indices of its children. No vertex holds a reference to another, so
/// there are no reference cycles and the tree can be shared freely between
/// threads for reading.
///
/// # Structure
/// - All vertices (root, internal, and leaves) are stored in the arena.
/// - Index of root is maintained.
/// - No assumption on order of indices (leaves need not come first).
/// - Vertices may have any number of children (polytomies allowed).
/// - Internal vertices may carry a support annotation, leaves a label.
///
/// # Construction
/// Add vertices bottom-up: leaves first, then internal vertices referencing
/// their children, finally the root. Test validity with
/// [`PhyloTree::is_valid()`].
///
/// # Example
/// ```
/// use lineage_finder::model::PhyloTree;
///
/// let mut tree = PhyloTree::new();
/// let c = tree.add_leaf("C|B.1".to_string(), None);
/// let q = tree.add_leaf("test".to_string(), None);
/// let clade = tree.add_internal_vertex(vec![c, q], Some("77".to_string()), None);
/// let a = tree.add_leaf("A|A".to_string(), None);
/// let root = tree.add_root(vec![a, clade], None, None);
///
/// assert!(tree.is_valid());
/// assert_eq!(tree.parent_of(q), Some(clade));
/// assert_eq!(tree.support_of(clade), Some("77"));
/// assert_eq!(tree.find_leaf("test"), Some(q));
/// assert_eq!(tree.root_index(), root);
/// ```
#[derive(Debug, Clone)]
pub struct PhyloTree {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,

    /// Index of the root of this tree
    root_index: VertexIndex,

    /// Name of tree; optional
    name: Option<String>,
}

impl Default for PhyloTree {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl PhyloTree {
    /// Creates a new, empty tree.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new, empty tree with room for `num_vertices` vertices.
    pub fn with_capacity(num_vertices: usize) -> Self {
        PhyloTree {
            vertices: Vec::with_capacity(num_vertices),
            root_index: NO_ROOT_SET_INDEX,
            name: None,
        }
    }

    /// Attaches a name to this tree.
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Adds the root, making it the parent of `children`.
    ///
    /// # Returns
    /// The index of the newly created root vertex.
    pub fn add_root(
        &mut self,
        children: Vec<VertexIndex>,
        support: Option<String>,
        branch_length: Option<BranchLength>,
    ) -> VertexIndex {
        let index = self.vertices.len();
        self.adopt(index, &children);
        self.vertices
            .push(Vertex::new_root(index, children, support, branch_length));
        self.root_index = index;
        index
    }

    /// Adds an internal vertex, making it the parent of `children`.
    ///
    /// # Returns
    /// The index of the newly created internal vertex.
    pub fn add_internal_vertex(
        &mut self,
        children: Vec<VertexIndex>,
        support: Option<String>,
        branch_length: Option<BranchLength>,
    ) -> VertexIndex {
        let index = self.vertices.len();
        self.adopt(index, &children);
        self.vertices
            .push(Vertex::new_internal(index, children, support, branch_length));
        index
    }

    /// Adds a leaf with the given tip label.
    ///
    /// # Returns
    /// The index of the newly created leaf vertex.
    pub fn add_leaf(&mut self, label: String, branch_length: Option<BranchLength>) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices
            .push(Vertex::new_leaf(index, label, branch_length));
        index
    }

    fn adopt(&mut self, parent: VertexIndex, children: &[VertexIndex]) {
        for &child in children {
            self.vertices[child].set_parent(parent);
        }
    }

    /// Returns reference to name of this tree, or `None` if not set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sets a name for this tree.
    pub fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// Returns whether the root of the tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET_INDEX
    }

    /// Returns a reference to the root vertex.
    ///
    /// # Panics
    /// Panics if the root hasn't been set yet.
    pub fn root(&self) -> &Vertex {
        &self[self.root_index]
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> VertexIndex {
        self.root_index
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self[index]
    }

    /// Returns a mutable reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex_mut(&mut self, index: VertexIndex) -> &mut Vertex {
        &mut self.vertices[index]
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_leaf()).count()
    }

    /// Returns the number of internal (non-root, non-leaf) vertices in this tree.
    pub fn num_internal(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_internal()).count()
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Converts this tree to a Newick string, see [newick::to_newick].
    pub fn to_newick(&self) -> String {
        newick::to_newick(self)
    }
}

// ============================================================================
// Read-only traversal primitives (pub)
// ============================================================================
impl PhyloTree {
    /// Returns the parent of the vertex at `index`, `None` for the root.
    pub fn parent_of(&self, index: VertexIndex) -> Option<VertexIndex> {
        self[index].parent()
    }

    /// Returns the children of the vertex at `index`; empty for leaves.
    pub fn children_of(&self, index: VertexIndex) -> &[VertexIndex] {
        self[index].children()
    }

    /// Returns `true` if the vertex at `index` is a leaf.
    pub fn is_leaf(&self, index: VertexIndex) -> bool {
        self[index].is_leaf()
    }

    /// Returns the tip label of the vertex at `index`, `None` if not a leaf.
    pub fn label_of(&self, index: VertexIndex) -> Option<&str> {
        self[index].label()
    }

    /// Returns the support annotation of the vertex at `index`, if any.
    pub fn support_of(&self, index: VertexIndex) -> Option<&str> {
        self[index].support()
    }

    /// Returns the index of the first leaf (in arena order) whose full label
    /// equals `label` exactly.
    pub fn find_leaf(&self, label: &str) -> Option<VertexIndex> {
        self.vertices
            .iter()
            .find(|v| v.label() == Some(label))
            .map(Vertex::index)
    }

    /// Returns the indices of all leaves in the subtree rooted at `index`,
    /// in left-to-right order. A leaf's subtree is the leaf itself.
    pub fn leaves_under(&self, index: VertexIndex) -> Vec<VertexIndex> {
        let mut leaves = Vec::new();
        let mut stack = vec![index];

        while let Some(current) = stack.pop() {
            let vertex = &self[current];
            if vertex.is_leaf() {
                leaves.push(current);
            } else {
                // Reverse, so the leftmost child is processed first
                stack.extend(vertex.children().iter().rev());
            }
        }

        leaves
    }

    /// Returns an iterator over the labels of all leaves, in arena order.
    pub fn leaf_labels(&self) -> impl Iterator<Item = &str> {
        self.vertices.iter().filter_map(Vertex::label)
    }

    /// Returns the ancestors of the vertex at `index`, from its parent up to the root.
    pub fn ancestors_of(&self, index: VertexIndex) -> AncestorIter<'_> {
        AncestorIter {
            tree: self,
            current: self.parent_of(index),
        }
    }
}

// ============================================================================
// Validation (pub)
// ============================================================================
impl PhyloTree {
    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root index is set, in bounds and points to the only Root vertex
    /// - All vertex indices match their position in the arena
    /// - All child indices are in bounds and point back to their parent
    /// - All non-root vertices have a parent that lists them as child
    /// - Root and internal vertices have at least one child
    /// - All vertices are reachable from the root
    /// - Leaves have non-empty labels
    pub fn is_valid(&self) -> bool {
        if self.root_index >= self.vertices.len() || !self.vertices[self.root_index].is_root() {
            return false;
        }

        for (index, vertex) in self.vertices.iter().enumerate() {
            if vertex.index() != index {
                return false;
            }

            if vertex.is_root() && index != self.root_index {
                return false;
            }

            if !vertex.is_leaf() && vertex.children().is_empty() {
                return false;
            }

            for &child in vertex.children() {
                if child >= self.vertices.len() || self.vertices[child].parent() != Some(index) {
                    return false;
                }
            }

            if !vertex.is_root() {
                match vertex.parent() {
                    None => return false,
                    Some(parent) => {
                        if parent >= self.vertices.len()
                            || !self.vertices[parent].children().contains(&index)
                        {
                            return false;
                        }
                    }
                }
            }

            if vertex.label().is_some_and(str::is_empty) {
                return false;
            }
        }

        self.pre_order_iter().count() == self.vertices.len()
    }
}

impl std::ops::Index<VertexIndex> for PhyloTree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

impl std::ops::IndexMut<VertexIndex> for PhyloTree {
    fn index_mut(&mut self, index: VertexIndex) -> &mut Self::Output {
        &mut self.vertices[index]
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl PhyloTree {
    /// Returns an iterator over the tree in post-order (children before parents).
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self)
    }

    /// Returns an iterator over the tree in pre-order (parents before children).
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }
}

/// Iterator for post-order traversal (children before parents).
///
/// Uses an explicit stack, so deep (e.g. caterpillar) trees do not
/// overflow the call stack.
pub struct PostOrderIter<'a> {
    tree: &'a PhyloTree,
    stack: Vec<(VertexIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a PhyloTree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push((tree.root_index, false));
        }
        PostOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let vertex = &self.tree[index];

            if children_visited || vertex.is_leaf() {
                return Some(vertex);
            }

            self.stack.push((index, true));
            // Reverse, so the leftmost child is processed first
            for &child in vertex.children().iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
pub struct PreOrderIter<'a> {
    tree: &'a PhyloTree,
    stack: Vec<VertexIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a PhyloTree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push(tree.root_index);
        }
        PreOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];
        self.stack.extend(vertex.children().iter().rev());
        Some(vertex)
    }
}

/// Iterator over the ancestors of a vertex, nearest first.
///
/// Created by [PhyloTree::ancestors_of()].
pub struct AncestorIter<'a> {
    tree: &'a PhyloTree,
    current: Option<VertexIndex>,
}

impl<'a> Iterator for AncestorIter<'a> {
    type Item = VertexIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.current?;
        self.current = self.tree.parent_of(index);
        Some(index)
    }
}
