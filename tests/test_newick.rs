use lineage_finder::model::PhyloTreeBuilder;
use lineage_finder::newick::{NewickParser, parse_file, parse_str, to_newick};
use lineage_finder::parser::ParsingErrorKind;
use lineage_finder::parser::byte_parser::ByteParser;
use std::io::Write;

// --- TESTS NEWICK STRING PARSING ---
#[test]
fn test_basic_tree() {
    let newick = "((A|A:1.0,B|B.1:2.0)90:3.0,C|B.1:4.0):0.5;";
    let mut parser = ByteParser::for_str(newick);
    let mut newick_parser = NewickParser::new(PhyloTreeBuilder::new()).with_num_leaves(3);
    let tree = newick_parser.parse_str(&mut parser).unwrap();

    // Test counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 1);
    assert_eq!(tree.num_vertices(), 5);
    assert!(tree.is_valid());

    // Test relationships
    // - Root has children (internal, C)
    let root = tree.root();
    let root_children = root.children();
    assert_eq!(root_children.len(), 2);

    // - Internal vertex has children (A, B) and support 90
    let internal = tree.vertex(root_children[0]);
    assert!(internal.is_internal());
    assert_eq!(internal.support(), Some("90"));
    assert_eq!(*internal.branch_length().unwrap(), 3.0);
    let internal_children = internal.children();

    // - Three leaves with full labels
    assert_eq!(tree.label_of(internal_children[0]), Some("A|A"));
    assert_eq!(tree.label_of(internal_children[1]), Some("B|B.1"));
    assert_eq!(tree.label_of(root_children[1]), Some("C|B.1"));

    // - Parent relationships
    assert_eq!(internal.parent(), Some(root.index()));
    assert_eq!(tree.parent_of(internal_children[0]), Some(root_children[0]));
    assert_eq!(tree.parent_of(root_children[1]), Some(root.index()));
    assert_eq!(*root.branch_length().unwrap(), 0.5);
}

#[test]
fn test_polytomy() {
    let tree = parse_str("(A|A,(C|B.1,c1|B.1,D|B.1,d1|B.1,test)77,E|B);").unwrap();

    assert_eq!(tree.num_leaves(), 7);
    assert_eq!(tree.children_of(tree.root_index()).len(), 3);

    let test = tree.find_leaf("test").unwrap();
    let parent = tree.parent_of(test).unwrap();
    assert_eq!(tree.children_of(parent).len(), 5);
    assert_eq!(tree.support_of(parent), Some("77"));
}

#[test]
fn test_root_support() {
    let tree = parse_str("(A|A,((B|B,(C|B.1,D|B.1)),test))77;").unwrap();
    assert_eq!(tree.support_of(tree.root_index()), Some("77"));
    assert_eq!(tree.num_internal(), 3);
}

#[test]
fn test_quoted_labels_and_comments() {
    let newick = "[tree one] ('A a|A':0.1, [&rate=1.0] 'it''s|B.1' , (C|B.2,D|B.2)'0.95');";
    let tree = parse_str(newick).unwrap();

    assert!(tree.find_leaf("A a|A").is_some());
    assert!(tree.find_leaf("it's|B.1").is_some());
    let c = tree.find_leaf("C|B.2").unwrap();
    assert_eq!(tree.support_of(tree.parent_of(c).unwrap()), Some("0.95"));
}

#[test]
fn test_whitespace_between_tokens() {
    let tree = parse_str("(\n  A|A : 0.1 ,\n  (B|B , C|B.1) 80\n) ;").unwrap();
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(*tree.vertex(tree.find_leaf("A|A").unwrap()).branch_length().unwrap(), 0.1);
}

#[test]
fn test_scientific_branch_lengths() {
    let tree = parse_str("(A:1e-3,B:2.5E+2);").unwrap();
    let a = tree.find_leaf("A").unwrap();
    let b = tree.find_leaf("B").unwrap();
    assert_eq!(*tree.vertex(a).branch_length().unwrap(), 0.001);
    assert_eq!(*tree.vertex(b).branch_length().unwrap(), 250.0);
}

// --- TESTS ERRORS ---
#[test]
fn test_missing_semicolon() {
    let err = parse_str("(A,B)").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorKind::InvalidNewickString(_)));
}

#[test]
fn test_empty_leaf_label() {
    let err = parse_str("(A,,B);").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorKind::InvalidNewickString(_)));
}

#[test]
fn test_negative_branch_length() {
    let err = parse_str("(A:-1.0,B);").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorKind::InvalidNewickString(_)));
}

#[test]
fn test_unclosed_quote() {
    let err = parse_str("('A,B);").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorKind::UnclosedQuote);
}

#[test]
fn test_unclosed_comment() {
    let err = parse_str("(A,B)[unclosed;").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorKind::UnclosedComment);
}

#[test]
fn test_truncated_input() {
    let err = parse_str("((A,B),").unwrap_err();
    assert!(matches!(
        err.kind(),
        ParsingErrorKind::UnexpectedEof | ParsingErrorKind::InvalidNewickString(_)
    ));
}

#[test]
fn test_error_message_has_position() {
    let err = parse_str("(A,B)x").unwrap_err();
    assert!(err.to_string().contains("position"));
}

// --- TESTS MULTIPLE TREES ---
#[test]
fn test_lazy_iterator() {
    let input = "(A,B);\n((A,B)1,C);\n[comment]\n(A,(B,C)0);";
    let parser = NewickParser::new_defaults();
    let trees: Vec<_> = parser
        .into_iter(ByteParser::for_str(input))
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(trees.len(), 3);
    assert_eq!(trees[0].num_leaves(), 2);
    assert_eq!(trees[2].num_leaves(), 3);
}

#[test]
fn test_lazy_iterator_stops_after_error() {
    let input = "(A,B);\n(A,B\n(C,D);";
    let mut iter = NewickParser::new_defaults().into_iter(ByteParser::for_str(input));

    assert!(iter.next().unwrap().is_ok());
    assert!(iter.next().unwrap().is_err());
    assert!(iter.next().is_none());
}

#[test]
fn test_parse_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "(A|A,(B|B,((C|B.1,test),D|B.1)77));").unwrap();
    writeln!(file, "(A|A,((B|B,(C|B.1,D|B.1)),test))77;").unwrap();

    let trees = parse_file(file.path()).unwrap();
    assert_eq!(trees.len(), 2);
    assert_eq!(trees[0].num_leaves(), 5);
    assert_eq!(trees[1].num_leaves(), 5);
}

#[test]
fn test_parse_missing_file() {
    let err = parse_file("does/not/exist.nwk").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorKind::IoError(_)));
}

// --- TESTS WRITING ---
#[test]
fn test_write_keeps_support_and_polytomies() {
    let input = "(A|A,(C|B.1,c1|B.1,test)77,'E e|B':0.5)90;";
    let tree = parse_str(input).unwrap();
    assert_eq!(to_newick(&tree), input);
}
