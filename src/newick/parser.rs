//! Structs and logic to parse Newick strings.
//!
//! This module provides the [NewickParser] struct, which offers methods
//! to parse files or single strings, as well as lazy parsing via a
//! [NewickIterator].

use crate::model::{PhyloTreeBuilder, TreeBuilder};
use crate::newick::defs::{DEFAULT_NUM_LEAVES_GUESS, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::{ParsingError, ParsingErrorKind};

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================#=
/// Parser (configuration) for single/multiple Newick trees.
///
/// Generic over [TreeBuilder] (construction). Supports polytomies, internal
/// vertex labels (kept as support annotations), quoted labels, branch
/// lengths and `[...]` comments.
///
/// # Construction
/// * [`new(tree_builder)`](Self::new) - generic constructor
/// * [`new_defaults()`](Self::new_defaults) - uses [PhyloTreeBuilder]
///
/// # Configuration
/// * [`with_num_leaves(num_leaves)`](Self::with_num_leaves)
///     - Expected number of leaves, used to pre-allocate. Otherwise it is
///       inferred from the first parsed tree.
///
/// # Parsing
/// * [`parse_str`](Self::parse_str) - Parse single tree
/// * [`parse_all`](Self::parse_all) - Parse all trees eagerly
/// * [`into_iter`](Self::into_iter) - Parse trees lazily
///
/// # Example
/// ```
/// use lineage_finder::newick::NewickParser;
/// use lineage_finder::parser::byte_parser::ByteParser;
///
/// let mut byte_parser = ByteParser::for_str("(A|A,(B|B,C|B.1)95,test);");
/// let mut newick_parser = NewickParser::new_defaults();
/// let tree = newick_parser.parse_str(&mut byte_parser).unwrap();
///
/// assert_eq!(tree.num_leaves(), 4);
/// assert_eq!(tree.children_of(tree.root_index()).len(), 3);
/// ```
pub struct NewickParser<T: TreeBuilder> {
    know_num_leaves: bool,
    num_leaves: usize,
    tree_builder: T,
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl<T: TreeBuilder> NewickParser<T> {
    /// Creates a new [NewickParser] with the given tree builder.
    pub fn new(tree_builder: T) -> Self {
        Self {
            know_num_leaves: false,
            num_leaves: DEFAULT_NUM_LEAVES_GUESS,
            tree_builder,
        }
    }

    /// Sets the expected number of leaves in each parsed tree.
    pub fn with_num_leaves(mut self, num_leaves: usize) -> Self {
        self.num_leaves = num_leaves;
        self.know_num_leaves = true;
        self
    }

    /// Consumes the parser and returns the tree builder.
    pub fn into_builder(self) -> T {
        self.tree_builder
    }
}

impl NewickParser<PhyloTreeBuilder> {
    /// Creates a new [NewickParser] for [PhyloTree](crate::model::PhyloTree)
    /// with the number of leaves unknown.
    pub fn new_defaults() -> Self {
        Self::new(PhyloTreeBuilder::new())
    }
}

impl Default for NewickParser<PhyloTreeBuilder> {
    fn default() -> Self {
        Self::new_defaults()
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl<T: TreeBuilder> NewickParser<T> {
    /// Consumes the parser and returns an iterator over trees from the byte source.
    ///
    /// The parser can be retrieved again via [NewickIterator::into_parser].
    pub fn into_iter<B: ByteSource>(self, byte_parser: ByteParser<B>) -> NewickIterator<B, T> {
        NewickIterator {
            byte_parser,
            parser: self,
            done: false,
        }
    }

    /// Parses all Newick trees from the byte source until EOF.
    ///
    /// # Arguments
    /// * `byte_parser` - A byte parser over a source containing only
    ///   Newick strings, except for whitespace and `[...]` comments.
    pub fn parse_all<B: ByteSource>(
        &mut self,
        mut byte_parser: ByteParser<B>,
    ) -> Result<Vec<T::Tree>, ParsingError> {
        let mut trees = Vec::new();
        loop {
            byte_parser.skip_comment_and_whitespace()?;
            if byte_parser.is_eof() {
                break;
            }
            trees.push(self.parse_str(&mut byte_parser)?);
        }
        Ok(trees)
    }

    /// Parses a single Newick tree from the given [ByteParser].
    ///
    /// # Arguments
    /// * `parser` - The byte parser positioned at the start of a Newick tree string
    ///
    /// # Returns
    /// * `Ok(T::Tree)` - The parsed phylogenetic tree
    /// * `Err(ParsingError)` - If the Newick string is invalid
    pub fn parse_str<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<T::Tree, ParsingError> {
        self.tree_builder.init_next(self.num_leaves);

        // If number of leaves not known yet, count them in this tree
        if !self.know_num_leaves {
            self.num_leaves = 0;
        }

        self.parse_root(parser)?;
        self.know_num_leaves = true;

        self.tree_builder
            .finish_tree()
            .ok_or_else(|| ParsingError::without_context(ParsingErrorKind::BuilderNotInitialized))
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl<T: TreeBuilder> NewickParser<T> {
    /// Parses root of tree and adds it to tree:
    /// - `(children)[support][:branch_length];`
    fn parse_root<B: ByteSource>(&mut self, parser: &mut ByteParser<B>) -> Result<(), ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.peek_is(b'(') {
            return Err(match parser.peek() {
                None => ParsingError::unexpected_eof(parser),
                Some(b) => ParsingError::invalid_newick_string(
                    parser,
                    format!("Expected '(' at start of tree but found {:?}", char::from(b)),
                ),
            });
        }

        let children = self.parse_children(parser)?;
        let support = self.parse_support(parser)?;
        let branch_length = self.parse_branch_length(parser)?;

        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b';') {
            let next_char = parser.peek().map(char::from);
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected ';' at end of tree but found {:?}", next_char),
            ));
        }

        self.tree_builder
            .add_root(children, support, branch_length)
            .map_err(|kind| ParsingError::from_parser(kind, parser))?;

        Ok(())
    }

    /// Parses a vertex (either internal vertex or leaf) and returns its index.
    fn parse_vertex<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<T::VertexIdx, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if parser.peek_is(b'(') {
            self.parse_internal_vertex(parser)
        } else {
            self.parse_leaf(parser)
        }
    }

    /// Parses internal vertex `(children)[support][:branch_length]`,
    /// adds it to tree, and returns its index.
    fn parse_internal_vertex<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<T::VertexIdx, ParsingError> {
        let children = self.parse_children(parser)?;
        let support = self.parse_support(parser)?;
        let branch_length = self.parse_branch_length(parser)?;

        self.tree_builder
            .add_internal(children, support, branch_length)
            .map_err(|kind| ParsingError::from_parser(kind, parser))
    }

    /// Parses the comma separated children `(v1,v2,...)` and returns their indices.
    /// Expects parser at opening `(`.
    fn parse_children<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<Vec<T::VertexIdx>, ParsingError> {
        if !parser.consume_if(b'(') {
            let next_char = parser.peek().map(char::from);
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected '(' before children but found {:?}", next_char),
            ));
        }

        let mut children = Vec::with_capacity(2);
        loop {
            children.push(self.parse_vertex(parser)?);

            parser.skip_comment_and_whitespace()?;
            match parser.peek() {
                Some(b',') => {
                    parser.next_byte();
                }
                Some(b')') => {
                    parser.next_byte();
                    break;
                }
                None => return Err(ParsingError::unexpected_eof(parser)),
                Some(b) => {
                    return Err(ParsingError::invalid_newick_string(
                        parser,
                        format!("Expected ',' or ')' after child but found {:?}", char::from(b)),
                    ));
                }
            }
        }

        Ok(children)
    }

    /// Parses leaf `label[:branch_length]`, adds it to tree and returns its index.
    fn parse_leaf<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<T::VertexIdx, ParsingError> {
        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        if label.is_empty() {
            return Err(match parser.peek() {
                None => ParsingError::unexpected_eof(parser),
                Some(_) => {
                    ParsingError::invalid_newick_string(parser, "Leaf without label".to_string())
                }
            });
        }

        let branch_length = self.parse_branch_length(parser)?;
        if !self.know_num_leaves {
            self.num_leaves += 1;
        }

        self.tree_builder
            .add_leaf(label, branch_length)
            .map_err(|kind| ParsingError::from_parser(kind, parser))
    }

    /// Parses an optional internal vertex label following `)`, which is kept
    /// as the vertex' support annotation.
    fn parse_support<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<Option<String>, ParsingError> {
        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        Ok((!label.is_empty()).then_some(label))
    }

    /// Parses optional branch length `[:number]`:
    /// - Skips comments/whitespace before and after `:`
    /// - Supports scientific notation (e.g., `1.5e-10`)
    /// - Rejects negative or non-finite values
    fn parse_branch_length<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<Option<f64>, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b':') {
            return Ok(None);
        }
        parser.skip_comment_and_whitespace()?;

        let mut branch_length_str = String::new();
        while let Some(b) = parser.peek() {
            if b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E') {
                branch_length_str.push(char::from(b));
                parser.next_byte();
            } else {
                break;
            }
        }

        let value: f64 = branch_length_str.parse().map_err(|_| {
            ParsingError::invalid_newick_string(
                parser,
                format!("Invalid branch length: {:?}", branch_length_str),
            )
        })?;

        if value < 0.0 || !value.is_finite() {
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Branch length must be non-negative and finite: {}", value),
            ));
        }

        Ok(Some(value))
    }
}

// =#========================================================================#=
// NEWICK ITERATOR (lazy parser)
// =#========================================================================#=
/// Iterator to parse Newick trees lazily.
///
/// Created by [NewickParser::into_iter()].
/// Yields `Result<T::Tree, ParsingError>` for each tree and stops after the
/// first error.
pub struct NewickIterator<B, T>
where
    B: ByteSource,
    T: TreeBuilder,
{
    parser: NewickParser<T>,
    byte_parser: ByteParser<B>,
    done: bool,
}

impl<B, T> NewickIterator<B, T>
where
    B: ByteSource,
    T: TreeBuilder,
{
    /// Consumes the iterator and returns the underlying [NewickParser].
    pub fn into_parser(self) -> NewickParser<T> {
        self.parser
    }
}

impl<B, T> Iterator for NewickIterator<B, T>
where
    B: ByteSource,
    T: TreeBuilder,
{
    type Item = Result<T::Tree, ParsingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if let Err(e) = self.byte_parser.skip_comment_and_whitespace() {
            self.done = true;
            return Some(Err(e));
        }
        if self.byte_parser.is_eof() {
            self.done = true;
            return None;
        }

        let result = self.parser.parse_str(&mut self.byte_parser);
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}
