use anyhow::{Context, Result, bail};
use clap::Parser;
use lineage_finder::lineage::{FinderConfig, LineageField};
use lineage_finder::newick::{self, write_newick_file};
use lineage_finder::report::{self, DEFAULT_REPORT_FILE};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// Assign lineages to query tips of a reference tree and write a CSV report
#[derive(Parser, Debug)]
#[clap(name = "lineage-finder", version)]
struct Cli {
    /// Newick file with the reference tree (first tree is used)
    #[clap(short, long)]
    tree: PathBuf,
    /// Query tip label, may be repeated
    #[clap(short, long = "query")]
    queries: Vec<String>,
    /// File with one query tip label per line
    #[clap(long = "queries")]
    query_file: Option<PathBuf>,
    /// Separator between the fields of a tip label
    #[clap(short, long, default_value_t = '|')]
    separator: char,
    /// Position of the lineage field in a tip label
    #[clap(short, long, default_value_t = 1)]
    field: usize,
    /// Count fields from 1 instead of 0
    #[clap(long, default_value_t = false)]
    one_indexed: bool,
    /// Walk the tree as given, without collapsing unsupported vertices
    #[clap(long, default_value_t = false)]
    no_collapse: bool,
    /// Output directory, created if missing
    #[clap(short, long, default_value = ".")]
    outdir: PathBuf,
    /// Name of the report file inside the output directory
    #[clap(long, default_value = DEFAULT_REPORT_FILE)]
    outfile: String,
    /// Also write the collapsed tree to this file inside the output directory
    #[clap(long)]
    write_collapsed: Option<String>,
    #[clap(short, long, default_value_t = false, conflicts_with = "quiet")]
    verbose: bool,
    #[clap(long, default_value_t = false)]
    quiet: bool,
}

impl Cli {
    fn finder_config(&self) -> FinderConfig {
        let field = if self.one_indexed {
            LineageField::OneIndexed(self.field)
        } else {
            LineageField::ZeroIndexed(self.field)
        };
        FinderConfig::new(self.separator, field).with_collapse(!self.no_collapse)
    }

    fn default_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.default_log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut trees = newick::parse_file(&args.tree)
        .with_context(|| format!("Unable to parse tree file {}", args.tree.display()))?;
    if trees.is_empty() {
        bail!("No tree found in {}", args.tree.display());
    }
    if trees.len() > 1 {
        warn!("{} trees in {}, using the first", trees.len(), args.tree.display());
    }
    let tree = trees.swap_remove(0);
    info!(
        "Loaded reference tree with {} tips from {}",
        tree.num_leaves(),
        args.tree.display()
    );

    let mut queries = args.queries.clone();
    if let Some(path) = &args.query_file {
        let from_file = report::read_queries(path)
            .with_context(|| format!("Unable to read queries from {}", path.display()))?;
        queries.extend(from_file);
    }
    if queries.is_empty() {
        bail!("No queries given, use --query or --queries");
    }

    fs::create_dir_all(&args.outdir)
        .with_context(|| format!("Unable to create output directory {}", args.outdir.display()))?;

    let config = args.finder_config();

    if let Some(name) = &args.write_collapsed {
        let path = args.outdir.join(name);
        write_newick_file(&path, &[tree.collapse_unsupported()])
            .with_context(|| format!("Unable to write collapsed tree to {}", path.display()))?;
        info!("Wrote collapsed tree to {}", path.display());
    }

    let records = report::assign_all(&tree, &queries, &config);

    let outfile = args.outdir.join(&args.outfile);
    report::write_report_file(&outfile, &records)
        .with_context(|| format!("Unable to write report to {}", outfile.display()))?;
    info!("Wrote lineage report to {}", outfile.display());

    Ok(())
}
