use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::input::InputError;
use crate::input::screens::{ScreenResultRow, find_screen_file, load_screen_result};
use crate::model::{CellTypeGroup, Hit, HitRow, HitTable, ScreenRecord};

/// Number of flagged hits kept for a screen: ceil(n_hits * top_percent / 100).
pub fn top_count(n_hits: usize, top_percent: f64) -> usize {
    let n = (n_hits as f64 * top_percent / 100.0).ceil();
    if n <= 0.0 {
        return 0;
    }
    (n as usize).min(n_hits)
}

/// Leading share of the flagged rows, in file order. Result files are ranked by
/// significance upstream; the order is not recomputed here.
pub fn top_hits(rows: &[ScreenResultRow], top_percent: f64) -> Vec<Hit> {
    let flagged = rows.iter().filter(|r| r.is_hit).collect::<Vec<_>>();
    let keep = top_count(flagged.len(), top_percent);
    flagged
        .into_iter()
        .take(keep)
        .map(|r| Hit::with_aliases(r.symbol.clone(), r.aliases.clone()))
        .collect()
}

/// Loads and truncates each screen's hits once, however many groups use it.
pub struct HitExtractor<'a> {
    screen_files: &'a [PathBuf],
    top_percent: f64,
    cache: HashMap<String, Vec<Hit>>,
}

impl<'a> HitExtractor<'a> {
    pub fn new(screen_files: &'a [PathBuf], top_percent: f64) -> Self {
        Self {
            screen_files,
            top_percent,
            cache: HashMap::new(),
        }
    }

    pub fn screen_hits(&mut self, screen_id: &str) -> Result<&[Hit], InputError> {
        if !self.cache.contains_key(screen_id) {
            let path = find_screen_file(self.screen_files, screen_id)?;
            let hits = load_screen_hits(path, self.top_percent)?;
            debug!("screen {}: kept {} hits from {}", screen_id, hits.len(), path.display());
            self.cache.insert(screen_id.to_string(), hits);
        }
        Ok(self.cache.get(screen_id).map(Vec::as_slice).unwrap_or(&[]))
    }

    /// Hits of every screen in `records`, concatenated in record order with
    /// duplicates kept. Each hit carries its alias list.
    pub fn hit_search(&mut self, records: &[ScreenRecord]) -> Result<Vec<Hit>, InputError> {
        let mut hits = Vec::new();
        for record in records {
            hits.extend_from_slice(self.screen_hits(&record.screen_id)?);
        }
        Ok(hits)
    }

    pub fn n_screens_loaded(&self) -> usize {
        self.cache.len()
    }
}

fn load_screen_hits(path: &Path, top_percent: f64) -> Result<Vec<Hit>, InputError> {
    let rows = load_screen_result(path)?;
    Ok(top_hits(&rows, top_percent))
}

pub fn run_stage3(
    groups: &[CellTypeGroup],
    screen_files: &[PathBuf],
    top_percent: f64,
) -> Result<HitTable, InputError> {
    let mut extractor = HitExtractor::new(screen_files, top_percent);
    let mut rows = Vec::with_capacity(groups.len());
    for group in groups {
        let hits = extractor.hit_search(&group.records)?;
        debug!(
            "{} ({:?}): {} hits from {} screens",
            group.key,
            group.kind,
            hits.len(),
            group.n_screens()
        );
        rows.push(HitRow {
            cell_type: group.key.clone(),
            n_screens: Some(group.n_screens()),
            hits,
        });
    }
    let table = HitTable { rows };
    info!(
        "extracted {} hits for {} cell types from {} screens (top {}%)",
        table.total_hits(),
        table.rows.len(),
        extractor.n_screens_loaded(),
        top_percent
    );
    Ok(table)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_hits.rs"]
mod tests;
