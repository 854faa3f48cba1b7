//! Batch lineage assignment and the CSV lineage report.
//!
//! [assign_all] resolves many queries against one tree in parallel, turning
//! per-query failures into unassigned records instead of aborting the
//! batch. [write_report] writes the records as CSV with the header
//! `taxon,lineage,support,status,note`.

use crate::lineage::{FinderConfig, LineageFinder};
use crate::model::PhyloTree;
use rayon::prelude::*;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

/// Default file name of the lineage report
pub const DEFAULT_REPORT_FILE: &str = "lineage_report.csv";

const REPORT_HEADER: &str = "taxon,lineage,support,status,note";

// =#========================================================================#=
// RECORDS
// =#========================================================================#=
/// Outcome of the assignment of one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Assigned,
    /// Not assigned, with the reason
    Unassigned(String),
}

impl Status {
    fn as_str(&self) -> &'static str {
        match self {
            Status::Assigned => "assigned",
            Status::Unassigned(_) => "unassigned",
        }
    }
}

/// One row of the lineage report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentRecord {
    pub taxon: String,
    pub lineage: Option<String>,
    pub support: Option<String>,
    pub status: Status,
}

impl AssignmentRecord {
    /// Returns `true` if a lineage was assigned.
    pub fn is_assigned(&self) -> bool {
        self.status == Status::Assigned
    }

    fn to_csv_row(&self) -> String {
        let note = match &self.status {
            Status::Assigned => "",
            Status::Unassigned(reason) => reason.as_str(),
        };
        [
            self.taxon.as_str(),
            self.lineage.as_deref().unwrap_or(""),
            self.support.as_deref().unwrap_or(""),
            self.status.as_str(),
            note,
        ]
        .iter()
        .map(|field| csv_field(field))
        .collect::<Vec<_>>()
        .join(",")
    }
}

// =#========================================================================#=
// ASSIGNMENT
// =#========================================================================#=
/// Assigns lineages to all `queries`, in the order given.
///
/// The tree is collapsed at most once for the whole batch. Query tips are
/// never candidates for each other. Queries that cannot be assigned get
/// [Status::Unassigned] with the error message.
///
/// # Example
/// ```
/// use lineage_finder::lineage::FinderConfig;
/// use lineage_finder::newick::parse_str;
/// use lineage_finder::report::assign_all;
///
/// let tree = parse_str("(A|A,(B|B,((C|B.1,test),D|B.1)77));")?;
/// let records = assign_all(&tree, &["test", "missing"], &FinderConfig::default());
///
/// assert_eq!(records[0].lineage.as_deref(), Some("B.1"));
/// assert!(!records[1].is_assigned());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn assign_all<S>(tree: &PhyloTree, queries: &[S], config: &FinderConfig) -> Vec<AssignmentRecord>
where
    S: AsRef<str> + Sync,
{
    let prepared: Cow<'_, PhyloTree> = if config.collapse() {
        Cow::Owned(tree.collapse_unsupported())
    } else {
        Cow::Borrowed(tree)
    };
    let per_query = config.clone().without_collapse();
    let query_labels: HashSet<String> = queries.iter().map(|q| q.as_ref().to_string()).collect();

    let records: Vec<AssignmentRecord> = queries
        .par_iter()
        .map(|query| {
            let taxon = query.as_ref();
            let finder = LineageFinder::new(&prepared, taxon, &per_query).excluding(&query_labels);
            match finder.get_lineage() {
                Ok(resolution) => AssignmentRecord {
                    taxon: taxon.to_string(),
                    lineage: Some(resolution.lineage),
                    support: Some(resolution.support),
                    status: Status::Assigned,
                },
                Err(e) => {
                    warn!("Could not assign '{}': {}", taxon, e);
                    AssignmentRecord {
                        taxon: taxon.to_string(),
                        lineage: None,
                        support: None,
                        status: Status::Unassigned(e.to_string()),
                    }
                }
            }
        })
        .collect();

    let assigned = records.iter().filter(|r| r.is_assigned()).count();
    info!("Assigned {} of {} queries", assigned, records.len());
    records
}

// =#========================================================================#=
// I/O
// =#========================================================================#=
/// Writes the records as CSV, header first.
pub fn write_report<W: Write>(writer: W, records: &[AssignmentRecord]) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);
    writeln!(writer, "{}", REPORT_HEADER)?;
    for record in records {
        writeln!(writer, "{}", record.to_csv_row())?;
    }
    writer.flush()
}

/// Creates (or truncates) the file at `path` and writes the records to it.
pub fn write_report_file<P: AsRef<Path>>(path: P, records: &[AssignmentRecord]) -> io::Result<()> {
    write_report(File::create(path)?, records)
}

/// Reads query identifiers, one per line.
///
/// Lines are trimmed; blank lines and lines starting with `#` are skipped.
pub fn read_queries<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

// Quotes a field containing a comma, quote or line break, doubling quotes.
fn csv_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
