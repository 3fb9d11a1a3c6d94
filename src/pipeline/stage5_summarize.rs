use std::collections::{BTreeMap, HashMap};

use tracing::info;

use crate::input::reference::GeneIdMap;
use crate::model::{HitTable, SummaryRow};
use crate::report::{HistogramRow, join_genes};

#[derive(Debug)]
pub struct Stage5Output {
    pub rows: Vec<SummaryRow>,
    pub histogram: Vec<HistogramRow>,
    pub n_unresolved: usize,
}

/// File-name friendly cell type: "Breast / Liver" becomes "Breast-Liver".
pub fn normalize_cell_type(cell_type: &str) -> String {
    cell_type.replace('/', "-").replace(' ', "")
}

/// Occurrences of each distinct gene in a hit list, in first-seen order.
pub fn count_hits<'a>(symbols: impl IntoIterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for s in symbols {
        match index.get(s) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(s, order.len());
                order.push((s, 1));
            }
        }
    }
    order
}

/// Long-form (cell type, gene) rows with per-gene hit counts. Identifiers come
/// from a left join on the gene symbol; unresolved genes carry none.
pub fn summarize_hits(table: &HitTable, gene_ids: Option<&GeneIdMap>) -> Vec<SummaryRow> {
    let mut rows = Vec::new();
    for row in &table.rows {
        let cell_type = normalize_cell_type(&row.cell_type);
        for (gene, num_hits) in count_hits(row.symbols()) {
            rows.push(SummaryRow {
                cell_type: cell_type.clone(),
                gene: gene.to_string(),
                num_hits,
                num_screens: row.n_screens,
                gene_ensembl: gene_ids.and_then(|m| m.get(gene)).map(str::to_string),
            });
        }
    }
    rows.sort_by(|a, b| {
        a.cell_type
            .cmp(&b.cell_type)
            .then(a.num_hits.cmp(&b.num_hits))
            .then_with(|| a.gene.cmp(&b.gene))
    });
    rows
}

/// How many genes of each cell type were hit exactly n times, with those genes.
pub fn hit_histogram(rows: &[SummaryRow]) -> Vec<HistogramRow> {
    let mut buckets: BTreeMap<(&str, usize), Vec<&str>> = BTreeMap::new();
    for row in rows {
        buckets
            .entry((row.cell_type.as_str(), row.num_hits))
            .or_default()
            .push(row.gene.as_str());
    }
    buckets
        .into_iter()
        .map(|((cell_type, num_hits), genes)| HistogramRow {
            cell_type: cell_type.to_string(),
            num_hits,
            frequency: genes.len(),
            genes: join_genes(genes),
        })
        .collect()
}

pub fn run_stage5(table: &HitTable, gene_ids: Option<&GeneIdMap>) -> Stage5Output {
    let rows = summarize_hits(table, gene_ids);
    let n_unresolved = if gene_ids.is_some() {
        rows.iter().filter(|r| r.gene_ensembl.is_none()).count()
    } else {
        0
    };
    let histogram = hit_histogram(&rows);
    info!(
        "summarised {} (cell type, gene) rows; {} without identifier",
        rows.len(),
        n_unresolved
    );
    Stage5Output {
        rows,
        histogram,
        n_unresolved,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_summarize.rs"]
mod tests;
