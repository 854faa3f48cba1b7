//! Collapsing of unsupported internal vertices.
//!
//! A lineage reference tree usually carries bootstrap-like support values on
//! its internal vertices. Vertices without support (or with support zero) do
//! not describe a trustworthy clade, so before resolving lineages they are
//! removed and their children attached to the nearest kept ancestor. This
//! turns e.g. `(A,((B,C),D)77)` into `(A,(B,C,D)77)`.
//!
//! Collapsing never modifies a tree in place: it builds a new [PhyloTree].

use crate::model::tree::{PhyloTree, VertexIndex};
use crate::model::vertex::{BranchLength, Vertex};
use tracing::debug;

/// Returns `true` if a support annotation counts as "no support":
/// missing, or a number equal to zero (`"0"`, `"0.0"`, `"0e0"`).
///
/// Non-numeric annotations are treated as supported.
///
/// # Examples
/// ```
/// use lineage_finder::model::collapse::is_unsupported;
///
/// assert!(is_unsupported(None));
/// assert!(is_unsupported(Some("0")));
/// assert!(is_unsupported(Some("0.000")));
/// assert!(!is_unsupported(Some("77")));
/// assert!(!is_unsupported(Some("clade_x")));
/// ```
pub fn is_unsupported(support: Option<&str>) -> bool {
    match support {
        None => true,
        Some(s) => s.trim().parse::<f64>().is_ok_and(|v| v == 0.0),
    }
}

impl PhyloTree {
    /// Returns a copy of this tree in which every non-root internal vertex
    /// without support (see [is_unsupported]) is collapsed into its parent.
    ///
    /// # Example
    /// ```
    /// use lineage_finder::newick::parse_str;
    ///
    /// let tree = parse_str("(A|A,(B|B,((C|B.1,test),D|B.1)77));").unwrap();
    /// let collapsed = tree.collapse_unsupported();
    /// assert_eq!(collapsed.to_newick(), "(A|A,B|B,(C|B.1,test,D|B.1)77);");
    /// ```
    pub fn collapse_unsupported(&self) -> PhyloTree {
        self.collapse_where(|vertex| is_unsupported(vertex.support()))
    }

    /// Returns a copy of this tree in which every non-root internal vertex
    /// matching `should_collapse` is removed, its children attached to its
    /// nearest kept ancestor in place of it.
    ///
    /// Child order is preserved. The branch length of a removed vertex is
    /// added onto each re-attached child's branch length when both are set.
    pub fn collapse_where<F>(&self, should_collapse: F) -> PhyloTree
    where
        F: Fn(&Vertex) -> bool,
    {
        let mut collapsed = PhyloTree::with_capacity(self.num_vertices());
        if let Some(name) = self.name() {
            collapsed.set_name(name.to_string());
        }
        if !self.is_root_set() {
            return collapsed;
        }

        // For each old vertex, the new vertices that take its place in its parent
        let mut replacements: Vec<Vec<VertexIndex>> = vec![Vec::new(); self.num_vertices()];
        let mut num_removed = 0;

        for vertex in self.post_order_iter() {
            let old_index = vertex.index();

            let new_children: Vec<VertexIndex> = vertex
                .children()
                .iter()
                .flat_map(|&child| std::mem::take(&mut replacements[child]))
                .collect();

            replacements[old_index] = match vertex {
                Vertex::Leaf { label, branch_length, .. } => {
                    vec![collapsed.add_leaf(label.clone(), *branch_length)]
                }
                Vertex::Root { support, branch_length, .. } => {
                    vec![collapsed.add_root(new_children, support.clone(), *branch_length)]
                }
                Vertex::Internal { .. } if should_collapse(vertex) => {
                    num_removed += 1;
                    if let Some(removed_length) = vertex.branch_length() {
                        for &child in &new_children {
                            let child_vertex = collapsed.vertex_mut(child);
                            if let Some(length) = child_vertex.branch_length() {
                                child_vertex.set_branch_length(Some(BranchLength::new(
                                    *length + *removed_length,
                                )));
                            }
                        }
                    }
                    new_children
                }
                Vertex::Internal { support, branch_length, .. } => {
                    vec![collapsed.add_internal_vertex(new_children, support.clone(), *branch_length)]
                }
            };
        }

        debug!(
            removed = num_removed,
            remaining = collapsed.num_vertices(),
            "collapsed unsupported internal vertices"
        );

        collapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::newick::parse_str;

    #[test]
    fn test_is_unsupported() {
        assert!(is_unsupported(None));
        assert!(is_unsupported(Some("0")));
        assert!(is_unsupported(Some(" 0.0 ")));
        assert!(!is_unsupported(Some("1")));
        assert!(!is_unsupported(Some("0.5")));
        assert!(!is_unsupported(Some("high")));
    }

    #[test]
    fn test_collapse_keeps_supported_clades() {
        let tree = parse_str("(A|A,((B|B,b1|B)90,test,(C|B.1,D|B.1)0)77,a1|A);").unwrap();
        let collapsed = tree.collapse_unsupported();

        assert!(collapsed.is_valid());
        assert_eq!(
            collapsed.to_newick(),
            "(A|A,((B|B,b1|B)90,test,C|B.1,D|B.1)77,a1|A);"
        );
        assert_eq!(collapsed.num_leaves(), tree.num_leaves());
    }

    #[test]
    fn test_collapse_never_removes_root() {
        let tree = parse_str("((A|A,B|B),C|C);").unwrap();
        let collapsed = tree.collapse_unsupported();
        assert!(collapsed.root().is_root());
        assert_eq!(collapsed.children_of(collapsed.root_index()).len(), 3);
        assert_eq!(collapsed.root().support(), None);
    }

    #[test]
    fn test_collapse_adds_branch_lengths() {
        let tree = parse_str("(A:1,(B:0.5,C:0.25):2);").unwrap();
        let collapsed = tree.collapse_unsupported();
        assert_eq!(collapsed.to_newick(), "(A:1,B:2.5,C:2.25);");
    }

    #[test]
    fn test_collapse_does_not_touch_input() {
        let tree = parse_str("((A,B),C);").unwrap();
        let before = tree.to_newick();
        let _ = tree.collapse_unsupported();
        assert_eq!(tree.to_newick(), before);
        assert_eq!(tree.num_internal(), 1);
    }

    #[test]
    fn test_collapse_where_custom_predicate() {
        let tree = parse_str("((A,B)low,(C,D)high);").unwrap();
        let collapsed = tree.collapse_where(|v| v.support() == Some("low"));
        assert_eq!(collapsed.to_newick(), "(A,B,(C,D)high);");
    }
}
