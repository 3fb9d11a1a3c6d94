use std::path::Path;

use tracing::{debug, info};

use crate::input::{InputError, column_index, csv_reader};
use crate::model::ScreenRecord;

const REQUIRED_COLUMNS: &[&str] = &[
    "#SCREEN_ID",
    "EXPERIMENTAL_SETUP",
    "LIBRARY_METHODOLOGY",
    "CELL_TYPE_BROAD",
];

pub fn load_screen_index(path: &Path) -> Result<Vec<ScreenRecord>, InputError> {
    let mut reader = csv_reader(path, b',')?;
    let headers = reader.headers()?.clone();
    for name in REQUIRED_COLUMNS {
        column_index(&headers, name, path)?;
    }

    let mut records = Vec::new();
    for (row, result) in reader.deserialize::<ScreenRecord>().enumerate() {
        let record = result?;
        if record.screen_id.is_empty() {
            return Err(InputError::Parse(format!(
                "{} row {} has an empty screen id",
                path.display(),
                row + 2
            )));
        }
        records.push(record);
    }
    if records.is_empty() {
        return Err(InputError::Parse(format!(
            "{} has no screen records",
            path.display()
        )));
    }

    debug!(rows = records.len(), "parsed screen index");
    info!("loaded {} screen records from {}", records.len(), path.display());
    Ok(records)
}
