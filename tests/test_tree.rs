use lineage_finder::model::collapse::is_unsupported;
use lineage_finder::model::{BranchLength, PhyloTree};
use lineage_finder::newick::parse_str;

fn labels(tree: &PhyloTree, indices: &[usize]) -> Vec<String> {
    indices
        .iter()
        .map(|&i| tree.label_of(i).unwrap().to_string())
        .collect()
}

// --- TESTS BUILDING ---
#[test]
fn test_building_tree() {
    let mut tree = PhyloTree::new();
    let index_l1 = tree.add_leaf("A|A".to_string(), Some(BranchLength::new(1.0)));
    let index_l2 = tree.add_leaf("B|B".to_string(), Some(BranchLength::new(1.0)));
    let index_l3 = tree.add_leaf("C|B.1".to_string(), Some(BranchLength::new(0.5)));
    let index_i1 = tree.add_internal_vertex(
        vec![index_l1, index_l2, index_l3],
        Some("88".to_string()),
        Some(BranchLength::new(1.5)),
    );
    let index_l4 = tree.add_leaf("test".to_string(), None);
    let index_root = tree.add_root(vec![index_i1, index_l4], None, None);

    // Counts
    assert_eq!(tree.num_leaves(), 4);
    assert_eq!(tree.num_internal(), 1);
    assert_eq!(tree.num_vertices(), 6);
    assert!(tree.is_valid());

    // Root
    assert_eq!(tree.root_index(), index_root);
    assert!(tree.root().is_root());
    assert_eq!(tree.parent_of(index_root), None);

    // Leaf
    let l2 = &tree[index_l2];
    assert!(l2.is_leaf());
    assert_eq!(l2.index(), index_l2);
    assert_eq!(l2.label(), Some("B|B"));
    assert_eq!(tree.parent_of(index_l2), Some(index_i1));

    // Internal
    let internal = &tree[index_i1];
    assert!(internal.is_internal());
    assert_eq!(internal.children(), &[index_l1, index_l2, index_l3]);
    assert_eq!(internal.support(), Some("88"));
    assert_eq!(internal.branch_length().unwrap(), BranchLength::new(1.5));
}

#[test]
#[should_panic]
fn test_get_root_panics_on_empty_tree() {
    let tree = PhyloTree::new();
    tree.root();
}

#[test]
fn test_empty_tree_is_invalid() {
    assert!(!PhyloTree::new().is_valid());
}

// --- TESTS TRAVERSAL ---
#[test]
fn test_leaves_under_left_to_right() {
    let tree = parse_str("(A|A,(B|B,((C|B.1,test),D|B.1)77));").unwrap();

    let all = tree.leaves_under(tree.root_index());
    assert_eq!(labels(&tree, &all), ["A|A", "B|B", "C|B.1", "test", "D|B.1"]);

    let test = tree.find_leaf("test").unwrap();
    assert_eq!(tree.leaves_under(test), vec![test]);

    let parent = tree.parent_of(test).unwrap();
    assert_eq!(labels(&tree, &tree.leaves_under(parent)), ["C|B.1", "test"]);
}

#[test]
fn test_ancestors_of() {
    let tree = parse_str("(A|A,(B|B,((C|B.1,test),D|B.1)77));").unwrap();
    let test = tree.find_leaf("test").unwrap();

    let ancestors: Vec<_> = tree.ancestors_of(test).collect();
    assert_eq!(ancestors.len(), 4);
    assert_eq!(tree.support_of(ancestors[1]), Some("77"));
    assert_eq!(*ancestors.last().unwrap(), tree.root_index());

    assert_eq!(tree.ancestors_of(tree.root_index()).count(), 0);
}

#[test]
fn test_find_leaf_is_exact() {
    let tree = parse_str("(test1|B,(test|A,testing|A));").unwrap();
    let test = tree.find_leaf("test|A").unwrap();
    assert_eq!(tree.label_of(test), Some("test|A"));
    assert!(tree.find_leaf("test").is_none());
    assert!(tree.find_leaf("TEST|A").is_none());
}

#[test]
fn test_post_and_pre_order() {
    let tree = parse_str("((A,B)1,C)2;").unwrap();

    let post: Vec<_> = tree
        .post_order_iter()
        .map(|v| v.label().or(v.support()).unwrap().to_string())
        .collect();
    assert_eq!(post, ["A", "B", "1", "C", "2"]);

    let pre: Vec<_> = tree
        .pre_order_iter()
        .map(|v| v.label().or(v.support()).unwrap().to_string())
        .collect();
    assert_eq!(pre, ["2", "1", "A", "B", "C"]);
}

#[test]
fn test_leaf_labels() {
    let tree = parse_str("((A,B)1,C);").unwrap();
    let mut labels: Vec<_> = tree.leaf_labels().collect();
    labels.sort();
    assert_eq!(labels, ["A", "B", "C"]);
}

// --- TESTS COLLAPSE ---
#[test]
fn test_is_unsupported() {
    assert!(is_unsupported(None));
    assert!(is_unsupported(Some("0")));
    assert!(is_unsupported(Some("0.0")));
    assert!(is_unsupported(Some("0.00")));
    assert!(!is_unsupported(Some("77")));
    assert!(!is_unsupported(Some("0.5")));
    assert!(!is_unsupported(Some("high")));
}

#[test]
fn test_collapse_removes_unsupported_vertices() {
    let tree = parse_str("(A|A,(B|B,((C|B.1,test),D|B.1)77));").unwrap();
    let collapsed = tree.collapse_unsupported();

    assert!(collapsed.is_valid());
    assert_eq!(collapsed.num_leaves(), 5);
    assert_eq!(collapsed.num_internal(), 1);
    assert_eq!(collapsed.to_newick(), "(A|A,B|B,(C|B.1,test,D|B.1)77);");
}

#[test]
fn test_collapse_removes_zero_support() {
    let tree = parse_str("(A,(B,(C,D)0)0.0,(E,F)1);").unwrap();
    let collapsed = tree.collapse_unsupported();
    assert_eq!(collapsed.to_newick(), "(A,B,C,D,(E,F)1);");
}

#[test]
fn test_collapse_keeps_root_and_input() {
    let input = "((A,B),(C,D))77;";
    let tree = parse_str(input).unwrap();
    let collapsed = tree.collapse_unsupported();

    assert_eq!(collapsed.to_newick(), "(A,B,C,D)77;");
    assert_eq!(tree.to_newick(), input);
}

#[test]
fn test_collapse_sums_branch_lengths() {
    let tree = parse_str("(A:1,(B:0.5,C:0.25):2,(D,E)50:1);").unwrap();
    let collapsed = tree.collapse_unsupported();
    assert_eq!(collapsed.to_newick(), "(A:1,B:2.5,C:2.25,(D,E)50:1);");
}

#[test]
fn test_collapse_fully_supported_tree_is_unchanged() {
    let input = "(A|A,(B|B,(C|B.1,D|B.1)90)80)70;";
    let tree = parse_str(input).unwrap();
    assert_eq!(tree.collapse_unsupported().to_newick(), input);
}
