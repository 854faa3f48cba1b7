//! Label quoting helpers for writing Newick strings.
//!
//! Tip labels in lineage reference trees routinely contain `|`, `/` and `.`,
//! which are fine unquoted, but occasionally also spaces or Newick
//! punctuation, which are not.

/// Characters that force a label to be written in single quotes.
const SPECIAL_CHARS: &[char] = &[
    ' ', ',', ';', '\t', '\n', '\r', '(', ')', ':', '[', ']', '\'',
];

/// Checks if a label can be written without quoting.
///
/// # Examples
/// ```
/// # use lineage_finder::parser::utils::needs_quoting;
/// assert!(!needs_quoting("England/MILK-9E05B3/2020|B.1.1.7"));
/// assert!(needs_quoting("Pu[ke]ko"));
/// assert!(needs_quoting("Baillon's Crake"));
/// assert!(needs_quoting(""));
/// ```
pub fn needs_quoting(label: &str) -> bool {
    label.is_empty() || label.contains(SPECIAL_CHARS)
}

/// Escapes a label for use in a Newick string.
///
/// Labels containing special characters are wrapped in single quotes, with
/// internal single quotes doubled. Other labels are returned unchanged.
///
/// # Examples
/// ```
/// # use lineage_finder::parser::utils::escape_label;
/// assert_eq!(escape_label("C|B.1"), "C|B.1");
/// assert_eq!(escape_label("Australasian Swamphen"), "'Australasian Swamphen'");
/// assert_eq!(escape_label("Baillon's Crake"), "'Baillon''s Crake'");
/// ```
pub fn escape_label(label: &str) -> String {
    if needs_quoting(label) {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}
