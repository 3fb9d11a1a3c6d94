use serde::{Deserialize, Serialize};

pub mod json;
pub mod tables;
pub mod text;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramRow {
    pub cell_type: String,
    pub num_hits: usize,
    pub frequency: usize,
    pub genes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParamsSummary {
    pub top_percent: f64,
    pub experimental_setup: String,
    pub excluded_methodology: String,
    pub group_match: String,
    pub alias_matching: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StageCounts {
    pub screens_indexed: usize,
    pub screens_selected: usize,
    pub cell_type_groups: usize,
    pub hits_unfiltered: usize,
    pub hits_filtered: usize,
    pub essential_genes: usize,
    pub summary_rows: usize,
    pub unresolved_identifiers: usize,
    pub intersection_rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub tool: String,
    pub version: String,
    pub params: ParamsSummary,
    pub counts: StageCounts,
    pub outputs: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CellTypeReport {
    pub cell_type: String,
    pub n_screens: Option<usize>,
    pub n_hits: usize,
    pub n_genes: usize,
    pub top_overlaps: Vec<(String, f64)>,
}

pub fn format_fraction(v: f64) -> String {
    format!("{:.3}", v)
}

/// Comma-joined gene list, in the order given.
pub fn join_genes<'a>(genes: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for (i, g) in genes.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(g);
    }
    out
}
