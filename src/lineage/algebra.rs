//! Algebra over hierarchical, dot-separated lineage labels.
//!
//! A lineage like `B.1.617.2` is a path from a root component (`B`) down a
//! hierarchy; each additional component is one level deeper. All functions
//! here are pure and take any slice of string-like values.
//!
//! # Operations
//! * [all_equal] - whether a set of labels is homogeneous
//! * [trim_to_common_ancestor] - deepest shared hierarchical prefix
//! * [get_basal_lineage] - most specific lineage subsuming a label set

use crate::lineage::error::LineageError;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Separator between the components of a lineage
pub const LINEAGE_SEPARATOR: char = '.';

// =#========================================================================#=
// HELPERS (pub)
// =#========================================================================#=
/// Returns the number of components of a lineage, e.g. 3 for `B.1.2`.
pub fn depth(lineage: &str) -> usize {
    lineage.split(LINEAGE_SEPARATOR).count()
}

/// Returns the first `depth` components of `lineage` joined by `.`,
/// or `None` if `depth` is 0 or exceeds the lineage's depth.
///
/// # Example
/// ```
/// use lineage_finder::lineage::algebra::prefix;
///
/// assert_eq!(prefix("B.1.617.2", 2).as_deref(), Some("B.1"));
/// assert_eq!(prefix("B.1", 3), None);
/// ```
pub fn prefix(lineage: &str, depth: usize) -> Option<String> {
    let components: Vec<&str> = lineage.split(LINEAGE_SEPARATOR).collect();
    if depth == 0 || depth > components.len() {
        return None;
    }
    Some(components[..depth].join("."))
}

/// Returns `true` if `lineage` is non-empty and has no empty components.
pub fn is_well_formed(lineage: &str) -> bool {
    !lineage.is_empty() && lineage.split(LINEAGE_SEPARATOR).all(|c| !c.is_empty())
}

/// Orders lineages component by component, comparing numeric components
/// numerically (`B.2 < B.10`) and others lexically. A lineage sorts before
/// its own descendants.
pub fn compare_lineages(a: &str, b: &str) -> Ordering {
    let mut left = a.split(LINEAGE_SEPARATOR);
    let mut right = b.split(LINEAGE_SEPARATOR);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ordering = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(l), Ok(r)) => l.cmp(&r),
                    _ => l.cmp(r),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

// =#========================================================================#=
// OPERATIONS (pub)
// =#========================================================================#=
/// Returns `true` if all labels are character-for-character identical.
///
/// # Errors
/// [LineageError::AmbiguousAlgebraInput] for an empty slice.
///
/// # Example
/// ```
/// use lineage_finder::lineage::algebra::all_equal;
///
/// assert!(all_equal(&["B.1", "B.1"])?);
/// assert!(!all_equal(&["B.1", "B.1.1"])?);
/// # Ok::<(), lineage_finder::lineage::LineageError>(())
/// ```
pub fn all_equal<S: AsRef<str>>(labels: &[S]) -> Result<bool, LineageError> {
    let (first, rest) = labels
        .split_first()
        .ok_or_else(|| LineageError::AmbiguousAlgebraInput("all_equal of no labels".into()))?;
    Ok(rest.iter().all(|l| l.as_ref() == first.as_ref()))
}

/// Returns the deepest hierarchical prefix shared by all labels.
///
/// Comparison starts at the minimum depth across the labels and moves one
/// level up until all truncated labels agree, ending at the root component
/// in the worst case.
///
/// # Errors
/// [LineageError::AmbiguousAlgebraInput] if `labels` is empty or the labels
/// do not share a root component.
///
/// # Example
/// ```
/// use lineage_finder::lineage::algebra::trim_to_common_ancestor;
///
/// assert_eq!(trim_to_common_ancestor(&["B.1.2", "B.1.3", "B.1.4"])?, "B.1");
/// assert_eq!(trim_to_common_ancestor(&["B.2.6", "B.1.5", "B.3.4"])?, "B");
/// # Ok::<(), lineage_finder::lineage::LineageError>(())
/// ```
pub fn trim_to_common_ancestor<S: AsRef<str>>(labels: &[S]) -> Result<String, LineageError> {
    let split: Vec<Vec<&str>> = labels
        .iter()
        .map(|l| l.as_ref().split(LINEAGE_SEPARATOR).collect())
        .collect();

    let min_depth = split.iter().map(Vec::len).min().ok_or_else(|| {
        LineageError::AmbiguousAlgebraInput("common ancestor of no labels".into())
    })?;

    for depth in (1..=min_depth).rev() {
        let first = &split[0][..depth];
        if split.iter().all(|components| &components[..depth] == first) {
            return Ok(first.join("."));
        }
    }

    Err(LineageError::AmbiguousAlgebraInput(format!(
        "labels share no root component: {}",
        join_labels(labels)
    )))
}

/// Returns the basal lineage of a set of labels: the most specific lineage
/// that still subsumes all of them.
///
/// Duplicates are ignored. Identical labels return that label. Labels under
/// one root component return their common ancestor, so fully resolved
/// siblings `B.1.2`, `B.1.3` give `B.1`. Labels under different roots have
/// no common ancestor; the shallowest of them is returned, ties going to
/// the one ordered first by [compare_lineages].
///
/// # Errors
/// [LineageError::AmbiguousAlgebraInput] for an empty slice.
///
/// # Example
/// ```
/// use lineage_finder::lineage::algebra::get_basal_lineage;
///
/// assert_eq!(get_basal_lineage(&["B.1.2", "B.1.3", "B.1.4"])?, "B.1");
/// assert_eq!(get_basal_lineage(&["A", "B.2"])?, "A");
/// assert_eq!(get_basal_lineage(&["A.1", "A.1.2", "B.3", "C.3", "C.3"])?, "A.1");
/// # Ok::<(), lineage_finder::lineage::LineageError>(())
/// ```
pub fn get_basal_lineage<S: AsRef<str>>(labels: &[S]) -> Result<String, LineageError> {
    let distinct: BTreeSet<&str> = labels.iter().map(AsRef::as_ref).collect();
    let distinct: Vec<&str> = distinct.into_iter().collect();

    match distinct.as_slice() {
        [] => Err(LineageError::AmbiguousAlgebraInput(
            "basal lineage of no labels".into(),
        )),
        [single] => Ok(single.to_string()),
        [first, rest @ ..] => {
            let root = root_component(first);
            if rest.iter().all(|l| root_component(l) == root) {
                trim_to_common_ancestor(&distinct)
            } else {
                let basal = distinct
                    .iter()
                    .min_by(|a, b| depth(a).cmp(&depth(b)).then_with(|| compare_lineages(a, b)))
                    .copied()
                    .unwrap_or(*first);
                Ok(basal.to_string())
            }
        }
    }
}

fn root_component(lineage: &str) -> &str {
    lineage.split(LINEAGE_SEPARATOR).next().unwrap_or(lineage)
}

fn join_labels<S: AsRef<str>>(labels: &[S]) -> String {
    labels.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
}
