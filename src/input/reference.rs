use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::input::screens::split_aliases;
use crate::input::{InputError, column_index, csv_reader};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReferenceGene {
    pub symbol: String,
    pub gene_id: Option<u64>,
}

/// Splits a DepMap style "SYMBOL (ID)" entry. A bare symbol is accepted with no
/// id; anything with a malformed id is rejected.
pub fn parse_symbol_id(entry: &str) -> Option<ReferenceGene> {
    let entry = entry.trim();
    if entry.is_empty() {
        return None;
    }
    let Some((symbol, rest)) = entry.split_once('(') else {
        return Some(ReferenceGene {
            symbol: entry.to_string(),
            gene_id: None,
        });
    };
    let symbol = symbol.trim();
    let id = rest.strip_suffix(')')?.trim();
    if symbol.is_empty() {
        return None;
    }
    let gene_id = id.parse::<u64>().ok()?;
    Some(ReferenceGene {
        symbol: symbol.to_string(),
        gene_id: Some(gene_id),
    })
}

pub fn load_reference_genes(path: &Path) -> Result<Vec<ReferenceGene>, InputError> {
    let mut reader = csv_reader(path, b',')?;
    let headers = reader.headers()?.clone();
    let gene_col = column_index(&headers, "Gene", path)?;

    let mut genes = Vec::new();
    let mut skipped = 0usize;
    for result in reader.records() {
        let record = result?;
        let entry = record.get(gene_col).unwrap_or("");
        match parse_symbol_id(entry) {
            Some(gene) => genes.push(gene),
            None => {
                if !entry.is_empty() {
                    skipped += 1;
                    warn!(
                        "skipping malformed reference entry {:?} in {}",
                        entry,
                        path.display()
                    );
                }
            }
        }
    }
    debug!(
        "read {} reference genes from {} ({} skipped)",
        genes.len(),
        path.display(),
        skipped
    );
    Ok(genes)
}

/// Genome-wide alias table keyed by numeric gene id.
#[derive(Debug, Clone, Default)]
pub struct GeneAliasTable {
    pub by_id: HashMap<u64, Vec<String>>,
}

impl GeneAliasTable {
    pub fn aliases(&self, gene_id: u64) -> &[String] {
        self.by_id.get(&gene_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

pub fn load_gene_alias_table(path: &Path) -> Result<GeneAliasTable, InputError> {
    let mut reader = csv_reader(path, b'\t')?;
    let headers = reader.headers()?.clone();
    let id_col = column_index(&headers, "GeneID", path)?;
    let symbol_col = column_index(&headers, "Symbol", path)?;
    let synonyms_col = column_index(&headers, "Synonyms", path)?;

    let mut by_id: HashMap<u64, Vec<String>> = HashMap::new();
    for result in reader.records() {
        let record = result?;
        let Ok(gene_id) = record.get(id_col).unwrap_or("").parse::<u64>() else {
            continue;
        };
        let names = by_id.entry(gene_id).or_default();
        if let Some(symbol) = record.get(symbol_col).filter(|s| !s.is_empty()) {
            names.push(symbol.to_string());
        }
        names.extend(split_aliases(record.get(synonyms_col).unwrap_or("")));
    }
    info!("loaded aliases for {} genes from {}", by_id.len(), path.display());
    Ok(GeneAliasTable { by_id })
}

/// Symbol to stable identifier lookup. The first identifier listed for a symbol wins.
#[derive(Debug, Clone, Default)]
pub struct GeneIdMap {
    pub by_symbol: HashMap<String, String>,
}

impl GeneIdMap {
    pub fn get(&self, symbol: &str) -> Option<&str> {
        self.by_symbol.get(symbol).map(String::as_str)
    }
}

pub fn load_gene_id_map(path: &Path) -> Result<GeneIdMap, InputError> {
    let mut reader = csv_reader(path, b'\t')?;
    let headers = reader.headers()?.clone();
    let symbol_col = column_index(&headers, "Symbol", path)?;
    let id_col = column_index(&headers, "EnsemblID", path)?;

    let mut by_symbol = HashMap::new();
    let mut ambiguous = 0usize;
    for result in reader.records() {
        let record = result?;
        let symbol = record.get(symbol_col).unwrap_or("");
        let id = record.get(id_col).unwrap_or("");
        if symbol.is_empty() || id.is_empty() {
            continue;
        }
        if by_symbol.contains_key(symbol) {
            ambiguous += 1;
            continue;
        }
        by_symbol.insert(symbol.to_string(), id.to_string());
    }
    if ambiguous > 0 {
        warn!(
            "{} symbols in {} map to more than one identifier; kept the first",
            ambiguous,
            path.display()
        );
    }
    info!("loaded {} gene identifiers from {}", by_symbol.len(), path.display());
    Ok(GeneIdMap { by_symbol })
}

/// Sorted, deduplicated set of genes removed from hit lists.
#[derive(Debug, Clone, Default)]
pub struct EssentialSet {
    pub symbols: BTreeSet<String>,
    pub aliases: BTreeSet<String>,
}

impl EssentialSet {
    pub fn from_genes(genes: &[ReferenceGene], alias_table: Option<&GeneAliasTable>) -> Self {
        let mut symbols = BTreeSet::new();
        let mut aliases = BTreeSet::new();
        for gene in genes {
            symbols.insert(gene.symbol.clone());
            if let (Some(table), Some(id)) = (alias_table, gene.gene_id) {
                for alias in table.aliases(id) {
                    aliases.insert(alias.clone());
                }
            }
        }
        Self { symbols, aliases }
    }

    /// True for a canonical essential symbol or one of its known aliases.
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains(name) || self.aliases.contains(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }
}
