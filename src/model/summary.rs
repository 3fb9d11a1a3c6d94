use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub cell_type: String,
    pub gene: String,
    pub num_hits: usize,
    pub num_screens: Option<usize>,
    pub gene_ensembl: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntersectionRow {
    pub cell_type1: String,
    pub cell_type2: String,
    pub n_intersect: usize,
    pub n_genes1: usize,
    pub intersect_list: String,
}

impl IntersectionRow {
    /// Share of the first cell type's hit genes also hit in the second.
    pub fn fraction(&self) -> f64 {
        if self.n_genes1 == 0 {
            return 0.0;
        }
        self.n_intersect as f64 / self.n_genes1 as f64
    }

    pub fn is_self(&self) -> bool {
        self.cell_type1 == self.cell_type2
    }
}
