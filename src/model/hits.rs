#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub symbol: String,
    pub aliases: Vec<String>,
}

impl Hit {
    pub fn with_aliases(symbol: impl Into<String>, aliases: Vec<String>) -> Self {
        Self {
            symbol: symbol.into(),
            aliases,
        }
    }
}

/// Hits of one cell-type group, concatenated over its screens in screen order.
/// Duplicates are kept: a gene reported by three screens appears three times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRow {
    pub cell_type: String,
    pub n_screens: Option<usize>,
    pub hits: Vec<Hit>,
}

impl HitRow {
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.hits.iter().map(|h| h.symbol.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitTable {
    pub rows: Vec<HitRow>,
}

impl HitTable {
    pub fn total_hits(&self) -> usize {
        self.rows.iter().map(|r| r.hits.len()).sum()
    }
}
