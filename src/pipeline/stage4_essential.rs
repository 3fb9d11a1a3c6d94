use std::path::Path;

use tracing::{debug, info};

use crate::input::InputError;
use crate::input::reference::{EssentialSet, GeneAliasTable, load_reference_genes};
use crate::model::params::ReferenceFiles;
use crate::model::{Hit, HitRow, HitTable};

#[derive(Debug)]
pub struct Stage4Output {
    pub table: HitTable,
    pub essential: EssentialSet,
    pub n_removed: usize,
}

/// Union of the non-essential controls, common-essential controls and inferred
/// common essentials found in `reference_dir`.
pub fn load_essential_set(
    reference_dir: &Path,
    files: &ReferenceFiles,
    alias_table: Option<&GeneAliasTable>,
) -> Result<EssentialSet, InputError> {
    let mut genes = Vec::new();
    for name in [
        &files.nonessential,
        &files.common_essential,
        &files.inferred_essential,
    ] {
        let path = reference_dir.join(name);
        let loaded = load_reference_genes(&path)?;
        debug!("{}: {} genes", path.display(), loaded.len());
        genes.extend(loaded);
    }
    genes.sort();
    genes.dedup();

    let essential = EssentialSet::from_genes(&genes, alias_table);
    info!(
        "essential/control reference: {} symbols, {} aliases",
        essential.symbols.len(),
        essential.aliases.len()
    );
    Ok(essential)
}

/// A hit is dropped when its symbol is an essential symbol or a known alias of
/// one, or (with `alias_matching`) when one of its own aliases is an essential
/// symbol.
pub fn is_filtered(hit: &Hit, essential: &EssentialSet, alias_matching: bool) -> bool {
    if essential.contains(&hit.symbol) {
        return true;
    }
    alias_matching && hit.aliases.iter().any(|a| essential.symbols.contains(a))
}

/// Keeps each cell type's non-essential hits in their original order. Duplicate
/// hits are preserved since their multiplicity is the per-gene hit count.
pub fn filter_essential_genes(
    table: &HitTable,
    essential: &EssentialSet,
    alias_matching: bool,
) -> HitTable {
    let rows = table
        .rows
        .iter()
        .map(|row| HitRow {
            cell_type: row.cell_type.clone(),
            n_screens: row.n_screens,
            hits: row
                .hits
                .iter()
                .filter(|h| !is_filtered(h, essential, alias_matching))
                .cloned()
                .collect(),
        })
        .collect();
    HitTable { rows }
}

pub fn run_stage4(
    table: &HitTable,
    essential: EssentialSet,
    alias_matching: bool,
) -> Stage4Output {
    let filtered = filter_essential_genes(table, &essential, alias_matching);
    let n_removed = table.total_hits() - filtered.total_hits();
    info!(
        "removed {} essential/control hits; {} hits remain",
        n_removed,
        filtered.total_hits()
    );
    Stage4Output {
        table: filtered,
        essential,
        n_removed,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_essential.rs"]
mod tests;
