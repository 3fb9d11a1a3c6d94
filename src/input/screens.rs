use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::input::{InputError, column_index, csv_reader};

const RESULT_SUFFIXES: &[&str] = &[".txt", ".txt.gz", ".tsv", ".tsv.gz"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenResultRow {
    pub symbol: String,
    pub aliases: Vec<String>,
    pub is_hit: bool,
}

/// Result files of a screens directory, sorted by name.
pub fn list_screen_files(dir: &Path) -> Result<Vec<PathBuf>, InputError> {
    if !dir.is_dir() {
        return Err(InputError::MissingInput(format!(
            "screens directory {}",
            dir.display()
        )));
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        if RESULT_SUFFIXES.iter().any(|s| name.ends_with(s)) {
            files.push(path);
        }
    }
    files.sort();
    debug!("found {} screen result files in {}", files.len(), dir.display());
    Ok(files)
}

pub fn screen_file_tag(screen_id: &str) -> String {
    format!("SCREEN_{}-", screen_id)
}

pub fn find_screen_file<'a>(
    files: &'a [PathBuf],
    screen_id: &str,
) -> Result<&'a Path, InputError> {
    let tag = screen_file_tag(screen_id);
    let mut matches = files.iter().filter(|p| {
        p.file_name()
            .is_some_and(|n| n.to_string_lossy().contains(tag.as_str()))
    });
    let first = matches.next().ok_or_else(|| InputError::ScreenNotFound {
        screen_id: screen_id.to_string(),
    })?;
    let extra = matches.count();
    if extra > 0 {
        warn!(
            "screen {} matches {} result files; using {}",
            screen_id,
            extra + 1,
            first.display()
        );
    }
    Ok(first.as_path())
}

pub fn load_screen_result(path: &Path) -> Result<Vec<ScreenResultRow>, InputError> {
    let mut reader = csv_reader(path, b'\t')?;
    let headers = reader.headers()?.clone();
    let symbol_col = column_index(&headers, "OFFICIAL_SYMBOL", path)?;
    let alias_col = column_index(&headers, "ALIASES", path)?;
    let hit_col = column_index(&headers, "HIT", path)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let symbol = record.get(symbol_col).unwrap_or("");
        if symbol.is_empty() {
            continue;
        }
        rows.push(ScreenResultRow {
            symbol: symbol.to_string(),
            aliases: split_aliases(record.get(alias_col).unwrap_or("")),
            is_hit: record.get(hit_col).is_some_and(|v| v == "YES"),
        });
    }
    Ok(rows)
}

/// Pipe-delimited alias field; "-" marks an empty list.
pub fn split_aliases(field: &str) -> Vec<String> {
    field
        .split('|')
        .map(str::trim)
        .filter(|a| !a.is_empty() && *a != "-")
        .map(str::to_string)
        .collect()
}
