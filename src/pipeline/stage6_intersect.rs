use std::collections::{BTreeMap, HashSet};

use tracing::info;

use crate::model::{IntersectionRow, SummaryRow};
use crate::report::join_genes;

/// Distinct genes per cell type, in the order they appear in the summary.
pub fn gene_sets(rows: &[SummaryRow]) -> BTreeMap<&str, Vec<&str>> {
    let mut sets: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    for row in rows {
        if seen.insert((row.cell_type.as_str(), row.gene.as_str())) {
            sets.entry(row.cell_type.as_str())
                .or_default()
                .push(row.gene.as_str());
        }
    }
    sets
}

pub fn intersect<'a>(a: &[&'a str], b: &[&str]) -> Vec<&'a str> {
    let b: HashSet<&str> = b.iter().copied().collect();
    a.iter().copied().filter(|g| b.contains(g)).collect()
}

/// Every ordered pair of cell types, self pairs included, sorted by
/// (cell_type1, cell_type2). Intersecting genes keep the first type's order.
pub fn pairwise_intersections(rows: &[SummaryRow]) -> Vec<IntersectionRow> {
    let sets = gene_sets(rows);
    let mut out = Vec::with_capacity(sets.len() * sets.len());
    for (&a, genes_a) in &sets {
        for (&b, genes_b) in &sets {
            let common = if a == b {
                genes_a.clone()
            } else {
                intersect(genes_a, genes_b)
            };
            out.push(IntersectionRow {
                cell_type1: a.to_string(),
                cell_type2: b.to_string(),
                n_intersect: common.len(),
                n_genes1: genes_a.len(),
                intersect_list: join_genes(common),
            });
        }
    }
    out
}

pub fn run_stage6(rows: &[SummaryRow]) -> Vec<IntersectionRow> {
    let out = pairwise_intersections(rows);
    info!("computed {} pairwise intersections", out.len());
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_intersect.rs"]
mod tests;
