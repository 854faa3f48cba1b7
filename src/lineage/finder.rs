//! Lineage assignment of a query tip by walking its ancestors.
//!
//! Starting at the parent of the query tip, each ancestor is inspected in
//! turn. At every ancestor the lineages of all tips below it, except the
//! query, are the candidates, and the first of these rules that applies
//! decides:
//!
//! 1. No candidates: move on to the parent.
//! 2. All candidates share one lineage: that lineage.
//! 3. Exactly one child subtree besides the one holding the query is clean
//!    (all of its tips share one lineage): that lineage.
//! 4. The basal lineage of the candidates is narrower than the basal
//!    lineage of the whole tree: that basal lineage.
//! 5. Otherwise move on to the parent.
//!
//! The support annotation of the deciding ancestor is returned alongside,
//! `"0"` if it has none. If no ancestor decides, the basal lineage of the
//! whole tree is returned with the root's support.

use crate::lineage::algebra::{all_equal, get_basal_lineage};
use crate::lineage::config::FinderConfig;
use crate::lineage::error::LineageError;
use crate::model::{PhyloTree, VertexIndex};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Support reported for a deciding vertex without annotation
pub const DEFAULT_SUPPORT: &str = "0";

// =#========================================================================#=
// RESOLUTION
// =#========================================================================#=
/// Lineage assigned to a query, with the support of the deciding vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Assigned lineage, e.g. `B.1`
    pub lineage: String,
    /// Support annotation of the vertex the assignment was made at
    pub support: String,
}

impl Resolution {
    fn new(lineage: impl Into<String>, support: Option<&str>) -> Self {
        Self {
            lineage: lineage.into(),
            support: support.unwrap_or(DEFAULT_SUPPORT).to_string(),
        }
    }
}

impl From<Resolution> for (String, String) {
    fn from(resolution: Resolution) -> Self {
        (resolution.lineage, resolution.support)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.lineage, self.support)
    }
}

// =#========================================================================#=
// LINEAGE FINDER
// =#========================================================================#=
/// Assigns a lineage to one query tip of a tree.
///
/// If the configuration asks for it, unsupported internal vertices are
/// collapsed on construction; the caller's tree is never modified.
///
/// Tips labelled like the query are never candidates. Further tips, such as
/// the other queries of a batch, can be left out with [LineageFinder::excluding].
///
/// # Example
/// ```
/// use lineage_finder::lineage::{FinderConfig, LineageFinder};
/// use lineage_finder::newick::parse_str;
///
/// let tree = parse_str("(A|A,(B|B,((C|B.1,test),D|B.1)77));")?;
/// let finder = LineageFinder::new(&tree, "test", &FinderConfig::default());
///
/// let (lineage, support) = finder.get_lineage()?.into();
/// assert_eq!(lineage, "B.1");
/// assert_eq!(support, "77");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct LineageFinder<'t> {
    tree: Cow<'t, PhyloTree>,
    target: String,
    config: FinderConfig,
    excluded: Option<&'t HashSet<String>>,
}

impl<'t> LineageFinder<'t> {
    /// Creates a finder for the tip labelled exactly `target`.
    pub fn new(tree: &'t PhyloTree, target: impl Into<String>, config: &FinderConfig) -> Self {
        let tree = if config.collapse() {
            Cow::Owned(tree.collapse_unsupported())
        } else {
            Cow::Borrowed(tree)
        };
        Self {
            tree,
            target: target.into(),
            config: config.clone(),
            excluded: None,
        }
    }

    /// Leaves tips with any of the given labels out of the candidates.
    pub fn excluding(mut self, labels: &'t HashSet<String>) -> Self {
        self.excluded = Some(labels);
        self
    }

    /// Returns the query label.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the tree that is walked, collapsed if configured.
    pub fn tree(&self) -> &PhyloTree {
        &self.tree
    }

    /// Returns the configuration.
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Assigns a lineage to the query.
    ///
    /// # Errors
    /// * [LineageError::NotFound] if no tip is labelled exactly like the query
    /// * [LineageError::DataError] if a tip label consulted has no usable
    ///   lineage field
    /// * [LineageError::AmbiguousAlgebraInput] if the tree has no tips
    ///   besides the query
    pub fn get_lineage(&self) -> Result<Resolution, LineageError> {
        let tree = self.tree();
        let query = tree
            .find_leaf(&self.target)
            .ok_or_else(|| LineageError::NotFound(self.target.clone()))?;

        let mut global_basal: Option<String> = None;
        let mut from_child = query;

        for ancestor in tree.ancestors_of(query) {
            if let Some(lineage) = self.decide_at(ancestor, from_child, &mut global_basal)? {
                debug!(
                    "Query '{}' decided at vertex {} as {}",
                    self.target, ancestor, lineage
                );
                return Ok(Resolution::new(lineage, tree.support_of(ancestor)));
            }
            from_child = ancestor;
        }

        debug!(
            "Query '{}' undecided up to the root, using tree-wide basal lineage",
            self.target
        );
        let lineage = match global_basal {
            Some(lineage) => lineage,
            None => self.tree_basal_lineage()?,
        };
        Ok(Resolution::new(lineage, tree.support_of(tree.root_index())))
    }

    // Applies the decision rules at `ancestor`, reached from its child `from_child`.
    fn decide_at(
        &self,
        ancestor: VertexIndex,
        from_child: VertexIndex,
        global_basal: &mut Option<String>,
    ) -> Result<Option<String>, LineageError> {
        let tree = self.tree();

        // Candidate lineages grouped by child subtree
        let mut per_child: Vec<(VertexIndex, Vec<&str>)> = Vec::new();
        for &child in tree.children_of(ancestor) {
            per_child.push((child, self.lineages_under(child)?));
        }
        let candidates: Vec<&str> = per_child
            .iter()
            .flat_map(|(_, lineages)| lineages.iter().copied())
            .collect();

        if candidates.is_empty() {
            debug!("Vertex {}: no candidates besides the query", ancestor);
            return Ok(None);
        }

        if all_equal(&candidates)? {
            return Ok(Some(candidates[0].to_string()));
        }

        let clean_siblings: Vec<&str> = per_child
            .iter()
            .filter(|(child, lineages)| *child != from_child && !lineages.is_empty())
            .filter_map(|(_, lineages)| match all_equal(lineages) {
                Ok(true) => Some(lineages[0]),
                _ => None,
            })
            .collect();
        if let [lineage] = clean_siblings.as_slice() {
            return Ok(Some(lineage.to_string()));
        }
        debug!(
            "Vertex {}: {} clean sibling subtrees",
            ancestor,
            clean_siblings.len()
        );

        let basal = get_basal_lineage(&candidates)?;
        let global = match global_basal.take() {
            Some(global) => global,
            None => self.tree_basal_lineage()?,
        };
        let narrower = basal != global;
        *global_basal = Some(global);
        if narrower {
            return Ok(Some(basal));
        }

        debug!(
            "Vertex {}: basal lineage {} is not narrower than the tree's",
            ancestor, basal
        );
        Ok(None)
    }

    // Lineages of all candidate tips under `index`.
    fn lineages_under(&self, index: VertexIndex) -> Result<Vec<&str>, LineageError> {
        let tree = self.tree();
        let mut lineages = Vec::new();
        for leaf in tree.leaves_under(index) {
            let label = tree
                .label_of(leaf)
                .ok_or_else(|| LineageError::data_error("", "tip without label"))?;
            if self.is_candidate(label) {
                lineages.push(self.config.extract_lineage(label)?);
            }
        }
        Ok(lineages)
    }

    fn is_candidate(&self, label: &str) -> bool {
        label != self.target && !self.excluded.is_some_and(|excluded| excluded.contains(label))
    }

    // Basal lineage of all tips of the tree except the query.
    fn tree_basal_lineage(&self) -> Result<String, LineageError> {
        let lineages = self.lineages_under(self.tree().root_index())?;
        get_basal_lineage(&lineages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::newick::parse_str;

    fn resolve(newick: &str, query: &str, config: &FinderConfig) -> Result<Resolution, LineageError> {
        let tree = parse_str(newick).unwrap();
        LineageFinder::new(&tree, query, config).get_lineage()
    }

    #[test]
    fn test_pure_parent_clade() {
        let resolution = resolve(
            "(A|A,((C|B.1,D|B.1,test)90,E|B)80);",
            "test",
            &FinderConfig::default(),
        )
        .unwrap();
        assert_eq!(resolution, Resolution::new("B.1", Some("90")));
    }

    #[test]
    fn test_single_clean_sibling_decides() {
        let config = FinderConfig::default().without_collapse();
        let resolution = resolve(
            "(A|A,((X|B.1,Y|B.1)90,(Z|B.2,W|B.3)80,test)70);",
            "test",
            &config,
        )
        .unwrap();
        assert_eq!(resolution, Resolution::new("B.1", Some("70")));
    }

    #[test]
    fn test_missing_support_reports_zero() {
        let config = FinderConfig::default().without_collapse();
        let resolution = resolve("(A|A,(C|B.1,test));", "test", &config).unwrap();
        assert_eq!(resolution, Resolution::new("B.1", None));
        assert_eq!(resolution.support, "0");
    }

    #[test]
    fn test_not_found() {
        let err = resolve("(A|A,B|B);", "test", &FinderConfig::default()).unwrap_err();
        assert_eq!(err, LineageError::NotFound("test".to_string()));
    }

    #[test]
    fn test_malformed_candidate_is_data_error() {
        let err = resolve("(A|A,(C,test)77);", "test", &FinderConfig::default()).unwrap_err();
        assert!(matches!(err, LineageError::DataError { ref label, .. } if label == "C"));
    }

    #[test]
    fn test_lone_query_is_ambiguous() {
        let err = resolve("(test);", "test", &FinderConfig::default()).unwrap_err();
        assert!(matches!(err, LineageError::AmbiguousAlgebraInput(_)));
    }

    #[test]
    fn test_input_tree_is_left_untouched() {
        let tree = parse_str("(A|A,(B|B,((C|B.1,test),D|B.1)77));").unwrap();
        let before = tree.to_newick();
        let finder = LineageFinder::new(&tree, "test", &FinderConfig::default());
        finder.get_lineage().unwrap();
        assert_eq!(tree.to_newick(), before);
        assert!(finder.tree().num_vertices() < tree.num_vertices());
    }

    #[test]
    fn test_excluded_tips_are_not_candidates() {
        let tree = parse_str("(A|A,(C|B.1,other,test)90);").unwrap();
        let config = FinderConfig::default();
        let excluded: HashSet<String> = ["other".to_string()].into();

        let plain = LineageFinder::new(&tree, "test", &config).get_lineage();
        assert!(matches!(plain, Err(LineageError::DataError { .. })));

        let resolution = LineageFinder::new(&tree, "test", &config)
            .excluding(&excluded)
            .get_lineage()
            .unwrap();
        assert_eq!(resolution, Resolution::new("B.1", Some("90")));
    }

    #[test]
    fn test_resolution_into_tuple() {
        let pair: (String, String) = Resolution::new("B.1", Some("77")).into();
        assert_eq!(pair, ("B.1".to_string(), "77".to_string()));
    }
}
