//! Error type of lineage resolution.

use thiserror::Error;

/// Errors raised by the label algebra and the [LineageFinder](crate::lineage::LineageFinder).
///
/// None of them are retryable: the same input fails the same way.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineageError {
    /// The query identifier matches no tip label exactly.
    #[error("Query '{0}' not found among the tip labels of the tree")]
    NotFound(String),

    /// A tip label has no usable lineage field.
    #[error("Malformed lineage in tip label '{label}': {reason}")]
    DataError {
        /// Full tip label
        label: String,
        /// What is wrong with it
        reason: String,
    },

    /// The label algebra was called with an empty sequence, or with labels
    /// that share no root component where one is required.
    #[error("Ambiguous lineage algebra input: {0}")]
    AmbiguousAlgebraInput(String),
}

impl LineageError {
    /// Creates a [LineageError::DataError].
    pub(crate) fn data_error(label: &str, reason: impl Into<String>) -> Self {
        LineageError::DataError {
            label: label.to_string(),
            reason: reason.into(),
        }
    }
}
