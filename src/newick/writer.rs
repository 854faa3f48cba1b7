//! Newick format writing for [PhyloTree].

use crate::model::tree::{PhyloTree, VertexIndex};
use crate::model::vertex::BranchLength;
use crate::parser::utils::escape_label;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Characters per vertex used to estimate the Newick string length
const CHARS_PER_VERTEX: usize = 12;

/// Returns the Newick representation of the tree with closing semicolon.
///
/// Leaf labels and support annotations are quoted where necessary, branch
/// lengths are written when set. Returns `";"` for a tree without root.
///
/// # Example
/// ```
/// use lineage_finder::model::{BranchLength, PhyloTree};
/// use lineage_finder::newick::to_newick;
///
/// let mut tree = PhyloTree::new();
/// let a = tree.add_leaf("A|A".to_string(), Some(BranchLength::new(1.0)));
/// let b = tree.add_leaf("B|B.1".to_string(), Some(BranchLength::new(0.5)));
/// tree.add_root(vec![a, b], Some("77".to_string()), None);
///
/// assert_eq!(to_newick(&tree), "(A|A:1,B|B.1:0.5)77;");
/// ```
pub fn to_newick(tree: &PhyloTree) -> String {
    let mut newick = String::with_capacity(tree.num_vertices() * CHARS_PER_VERTEX);
    if tree.is_root_set() {
        build_newick(tree, &mut newick, tree.root_index());
    }
    newick.push(';');
    newick
}

/// Writes the given trees to a file in Newick format, one tree per line.
///
/// # Errors
/// Returns an I/O error if the file cannot be created or written.
pub fn write_newick_file<P: AsRef<Path>>(path: P, trees: &[PhyloTree]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for tree in trees {
        writer.write_all(to_newick(tree).as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

fn push_branch_length(newick: &mut String, branch_length: Option<BranchLength>) {
    if let Some(branch_length) = branch_length {
        newick.push(':');
        newick.push_str(&(*branch_length).to_string());
    }
}

// Recursive helper for building the Newick string
fn build_newick(tree: &PhyloTree, newick: &mut String, index: VertexIndex) {
    let vertex = &tree[index];

    if let Some(label) = vertex.label() {
        newick.push_str(&escape_label(label));
    } else {
        newick.push('(');
        for (i, &child) in vertex.children().iter().enumerate() {
            if i > 0 {
                newick.push(',');
            }
            build_newick(tree, newick, child);
        }
        newick.push(')');

        if let Some(support) = vertex.support() {
            newick.push_str(&escape_label(support));
        }
    }

    push_branch_length(newick, vertex.branch_length());
}
