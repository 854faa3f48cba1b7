use criterion::{Criterion, criterion_group, criterion_main};
use lineage_finder::lineage::{FinderConfig, LineageFinder};
use lineage_finder::model::PhyloTree;
use lineage_finder::newick::parse_str;
use lineage_finder::report::assign_all;
use std::hint::black_box;

const REGRESSION_SIZES: &[(&str, usize, usize)] = &[
    ("clades10x10", 10, 10),
    ("clades50x20", 50, 20),
];

const REPORTING_SIZES: &[(&str, usize, usize)] = &[("clades200x50", 200, 50)];

/// Builds a tree of `num_clades` supported clades of `clade_size` tips each,
/// every clade holding one nested unsupported pair and one query tip.
fn generate_newick(num_clades: usize, clade_size: usize) -> String {
    let mut clades = Vec::with_capacity(num_clades);
    for c in 0..num_clades {
        let lineage = format!("B.{}.{}", c / 10 + 1, c % 10 + 1);
        let mut tips: Vec<String> = (0..clade_size)
            .map(|t| format!("s{}_{}|{}", c, t, lineage))
            .collect();
        let pair = format!("(p{}_a|{},p{}_b|{})", c, lineage, c, lineage);
        tips.push(pair);
        tips.push(format!("query{}", c));
        clades.push(format!("({}){}", tips.join(","), 50 + c % 50));
    }
    format!("(root|A,{})100;", clades.join(","))
}

fn queries(num_clades: usize) -> Vec<String> {
    (0..num_clades).map(|c| format!("query{}", c)).collect()
}

fn resolve_each(tree: &PhyloTree, queries: &[String], config: &FinderConfig) {
    for query in queries {
        let _ = black_box(LineageFinder::new(tree, query.as_str(), config).get_lineage());
    }
}

fn lineage_regression(c: &mut Criterion) {
    for &(name, num_clades, clade_size) in REGRESSION_SIZES {
        let tree = parse_str(generate_newick(num_clades, clade_size)).unwrap();
        let queries = queries(num_clades);
        let collapsed = tree.collapse_unsupported();
        let config = FinderConfig::default().without_collapse();

        c.bench_function(&format!("parse_{}", name), |b| {
            let newick = generate_newick(num_clades, clade_size);
            b.iter(|| parse_str(black_box(&newick)).unwrap());
        });
        c.bench_function(&format!("collapse_{}", name), |b| {
            b.iter(|| black_box(&tree).collapse_unsupported());
        });
        c.bench_function(&format!("resolve_{}", name), |b| {
            b.iter(|| resolve_each(&collapsed, &queries, &config));
        });
    }
}

fn lineage_reporting(c: &mut Criterion) {
    for &(name, num_clades, clade_size) in REPORTING_SIZES {
        let tree = parse_str(generate_newick(num_clades, clade_size)).unwrap();
        let queries = queries(num_clades);
        let config = FinderConfig::default();

        c.bench_function(&format!("assign_all_{}", name), |b| {
            b.iter(|| assign_all(&tree, &queries, &config));
        });
    }
}

criterion_group!(regression, lineage_regression);
criterion_group! {
    name = reporting;
    config = Criterion::default().sample_size(10);
    targets = lineage_reporting
}
criterion_main!(regression, reporting);
