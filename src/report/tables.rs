use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::input::InputError;
use crate::input::tables::{CELL_TYPE_COLUMN, NUM_SCREENS_COLUMN};
use crate::model::{Hit, HitTable, IntersectionRow, SummaryRow};
use crate::report::HistogramRow;

fn create_writer(
    path: &Path,
    delimiter: u8,
) -> Result<csv::Writer<BufWriter<File>>, InputError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = BufWriter::new(File::create(path)?);
    Ok(csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(file))
}

fn write_wide<F>(table: &HitTable, path: &Path, cell: F) -> Result<(), InputError>
where
    F: Fn(&Hit) -> String,
{
    let width = table.rows.iter().map(|r| r.hits.len()).max().unwrap_or(0);
    let mut w = create_writer(path, b',')?;

    let mut header = vec![CELL_TYPE_COLUMN.to_string(), NUM_SCREENS_COLUMN.to_string()];
    header.extend((0..width).map(|i| i.to_string()));
    w.write_record(&header)?;

    for row in &table.rows {
        let mut record = Vec::with_capacity(width + 2);
        record.push(row.cell_type.clone());
        record.push(row.n_screens.map(|n| n.to_string()).unwrap_or_default());
        record.extend(row.hits.iter().map(&cell));
        record.resize(width + 2, String::new());
        w.write_record(&record)?;
    }
    w.flush()?;
    Ok(())
}

/// One row per cell type, one column per hit.
pub fn write_hit_table(table: &HitTable, path: &Path) -> Result<(), InputError> {
    write_wide(table, path, |hit| hit.symbol.clone())
}

/// Same shape as the hit table, each cell the hit's aliases joined by '|'.
pub fn write_alias_table(table: &HitTable, path: &Path) -> Result<(), InputError> {
    write_wide(table, path, |hit| hit.aliases.join("|"))
}

pub fn write_summary(rows: &[SummaryRow], path: &Path) -> Result<(), InputError> {
    let mut w = create_writer(path, b',')?;
    for row in rows {
        w.serialize(row)?;
    }
    if rows.is_empty() {
        w.write_record(["cell_type", "gene", "num_hits", "num_screens", "gene_ensembl"])?;
    }
    w.flush()?;
    Ok(())
}

pub fn write_intersections(rows: &[IntersectionRow], path: &Path) -> Result<(), InputError> {
    let mut w = create_writer(path, b'\t')?;
    for row in rows {
        w.serialize(row)?;
    }
    if rows.is_empty() {
        w.write_record([
            "cell_type1",
            "cell_type2",
            "n_intersect",
            "n_genes1",
            "intersect_list",
        ])?;
    }
    w.flush()?;
    Ok(())
}

pub fn write_histogram(rows: &[HistogramRow], path: &Path) -> Result<(), InputError> {
    let mut w = create_writer(path, b'\t')?;
    for row in rows {
        w.serialize(row)?;
    }
    if rows.is_empty() {
        w.write_record(["cell_type", "num_hits", "frequency", "genes"])?;
    }
    w.flush()?;
    Ok(())
}
