//! Configuration of lineage resolution.
//!
//! Tip labels embed the lineage as one field of a separated composite
//! string, conventionally `"<accession>|<lineage>"`. Which separator and
//! which field differ between data sets, so both are configured here,
//! together with whether the tree is collapsed before walking it.

use crate::lineage::algebra;
use crate::lineage::error::LineageError;

/// Default separator between the fields of a tip label
pub const DEFAULT_SEPARATOR: char = '|';

// =#========================================================================#=
// LINEAGE FIELD
// =#========================================================================#=
/// Position of the lineage field within a split tip label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineageField {
    /// 0-based position (`ZeroIndexed(1)` picks `B.1` in `C|B.1`)
    ZeroIndexed(usize),
    /// 1-based position (`OneIndexed(2)` picks `B.1` in `C|B.1`)
    OneIndexed(usize),
}

impl LineageField {
    /// Returns the 0-based position, or `None` for the invalid `OneIndexed(0)`.
    pub fn position(&self) -> Option<usize> {
        match *self {
            LineageField::ZeroIndexed(i) => Some(i),
            LineageField::OneIndexed(i) => i.checked_sub(1),
        }
    }
}

impl Default for LineageField {
    fn default() -> Self {
        LineageField::ZeroIndexed(1)
    }
}

// =#========================================================================#=
// FINDER CONFIG
// =#========================================================================#=
/// Configuration shared by all [LineageFinder](crate::lineage::LineageFinder)s
/// of one run.
///
/// # Defaults
/// * separator `'|'`
/// * lineage field `ZeroIndexed(1)`
/// * collapse unsupported internal vertices before walking: on
///
/// # Example
/// ```
/// use lineage_finder::lineage::{FinderConfig, LineageField};
///
/// let config = FinderConfig::default()
///     .with_separator('/')
///     .with_lineage_field(LineageField::OneIndexed(3));
///
/// assert_eq!(config.extract_lineage("hCoV-19/Wales/B.1.1.7").unwrap(), "B.1.1.7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinderConfig {
    separator: char,
    field: LineageField,
    collapse: bool,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            field: LineageField::default(),
            collapse: true,
        }
    }
}

impl FinderConfig {
    /// Creates a configuration with the given separator and lineage field,
    /// collapsing enabled.
    pub fn new(separator: char, field: LineageField) -> Self {
        Self {
            separator,
            field,
            collapse: true,
        }
    }

    /// Sets the separator between the fields of a tip label.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Sets the position of the lineage field.
    pub fn with_lineage_field(mut self, field: LineageField) -> Self {
        self.field = field;
        self
    }

    /// Sets whether unsupported internal vertices are collapsed before walking.
    pub fn with_collapse(mut self, collapse: bool) -> Self {
        self.collapse = collapse;
        self
    }

    /// Walks the tree exactly as given, without collapsing.
    pub fn without_collapse(self) -> Self {
        self.with_collapse(false)
    }

    /// Returns the separator.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Returns the lineage field position.
    pub fn lineage_field(&self) -> LineageField {
        self.field
    }

    /// Returns whether the tree is collapsed before walking.
    pub fn collapse(&self) -> bool {
        self.collapse
    }

    /// Extracts the lineage from a full tip label.
    ///
    /// # Errors
    /// [LineageError::DataError] if the field is missing or not a
    /// well-formed dot-separated lineage (empty, or with empty components).
    pub fn extract_lineage<'a>(&self, tip_label: &'a str) -> Result<&'a str, LineageError> {
        let position = self.field.position().ok_or_else(|| {
            LineageError::data_error(tip_label, "one-indexed lineage field must be at least 1")
        })?;

        let lineage = tip_label.split(self.separator).nth(position).ok_or_else(|| {
            LineageError::data_error(
                tip_label,
                format!(
                    "no field at position {} after splitting on '{}'",
                    position, self.separator
                ),
            )
        })?;

        if !algebra::is_well_formed(lineage) {
            return Err(LineageError::data_error(
                tip_label,
                format!("'{}' is not a dot-separated lineage", lineage),
            ));
        }

        Ok(lineage)
    }
}
