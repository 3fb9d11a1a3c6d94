use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

use crate::input::screens::split_aliases;
use crate::input::{InputError, column_index, csv_reader, optional_column_index};
use crate::model::{Hit, HitRow, HitTable, SummaryRow};

pub const CELL_TYPE_COLUMN: &str = "cell_type";
pub const NUM_SCREENS_COLUMN: &str = "num_screens";

struct WideRow {
    cell_type: String,
    n_screens: Option<usize>,
    slots: Vec<String>,
}

fn read_wide(path: &Path) -> Result<Vec<WideRow>, InputError> {
    let mut reader = csv_reader(path, b',')?;
    let headers = reader.headers()?.clone();
    let cell_col = column_index(&headers, CELL_TYPE_COLUMN, path)?;
    let screens_col = optional_column_index(&headers, NUM_SCREENS_COLUMN);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let cell_type = record.get(cell_col).unwrap_or("").to_string();
        if cell_type.is_empty() {
            return Err(InputError::Parse(format!(
                "{} has a row without a cell type",
                path.display()
            )));
        }
        let n_screens = match screens_col.and_then(|c| record.get(c)) {
            Some(v) if !v.is_empty() => Some(v.parse::<usize>().map_err(|_| {
                InputError::Parse(format!(
                    "{}: invalid screen count {:?} for {}",
                    path.display(),
                    v,
                    cell_type
                ))
            })?),
            _ => None,
        };
        let slots = record
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != cell_col && Some(*i) != screens_col)
            .map(|(_, v)| v.to_string())
            .collect();
        rows.push(WideRow {
            cell_type,
            n_screens,
            slots,
        });
    }
    Ok(rows)
}

/// Reads a wide hit table and, when given, the alias table written next to it.
/// Alias cells are matched to hits by cell type and column position.
pub fn read_hit_table(
    hits_path: &Path,
    aliases_path: Option<&Path>,
) -> Result<HitTable, InputError> {
    let hit_rows = read_wide(hits_path)?;

    let mut alias_rows: HashMap<String, Vec<String>> = HashMap::new();
    if let Some(path) = aliases_path {
        for row in read_wide(path)? {
            alias_rows.insert(row.cell_type, row.slots);
        }
    }

    let mut rows = Vec::with_capacity(hit_rows.len());
    for row in hit_rows {
        let alias_slots = alias_rows.get(&row.cell_type);
        if aliases_path.is_some() && alias_slots.is_none() {
            warn!("no alias row for {}; its hits carry no aliases", row.cell_type);
        }
        let hits = row
            .slots
            .iter()
            .take_while(|s| !s.is_empty())
            .enumerate()
            .map(|(i, symbol)| {
                let aliases = alias_slots
                    .and_then(|a| a.get(i))
                    .map(|cell| split_aliases(cell))
                    .unwrap_or_default();
                Hit::with_aliases(symbol.clone(), aliases)
            })
            .collect::<Vec<_>>();
        rows.push(HitRow {
            cell_type: row.cell_type,
            n_screens: row.n_screens,
            hits,
        });
    }

    let table = HitTable { rows };
    info!(
        "read {} cell types with {} hits from {}",
        table.rows.len(),
        table.total_hits(),
        hits_path.display()
    );
    Ok(table)
}

pub fn read_summary(path: &Path) -> Result<Vec<SummaryRow>, InputError> {
    let mut reader = csv_reader(path, b',')?;
    let headers = reader.headers()?.clone();
    for name in [CELL_TYPE_COLUMN, "gene", "num_hits"] {
        column_index(&headers, name, path)?;
    }
    let mut rows = Vec::new();
    for result in reader.deserialize::<SummaryRow>() {
        rows.push(result?);
    }
    info!("read {} summarised rows from {}", rows.len(), path.display());
    Ok(rows)
}
