use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::input::InputError;
use crate::model::params::{GroupMatch, PipelineParams};
use crate::model::{IntersectionRow, SummaryRow};
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{CellTypeReport, ParamsSummary, RunSummary, StageCounts};

pub const TOP_OVERLAPS: usize = 3;

#[derive(Debug, Clone)]
pub struct Stage7Input<'a> {
    pub params: &'a PipelineParams,
    pub counts: StageCounts,
    pub summary_rows: &'a [SummaryRow],
    pub intersections: &'a [IntersectionRow],
    pub outputs: Vec<String>,
}

pub fn build_run_summary(input: &Stage7Input<'_>) -> RunSummary {
    RunSummary {
        tool: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        params: ParamsSummary {
            top_percent: input.params.top_percent,
            experimental_setup: input.params.experimental_setup.clone(),
            excluded_methodology: input.params.excluded_methodology.clone(),
            group_match: match input.params.group_match {
                GroupMatch::Token => "token".to_string(),
                GroupMatch::Substring => "substring".to_string(),
            },
            alias_matching: input.params.alias_matching,
        },
        counts: input.counts.clone(),
        outputs: input.outputs.clone(),
    }
}

/// Per cell type totals and the other cell types sharing the largest share of
/// its hit genes. The share is computed here only and never written to a table.
pub fn build_cell_type_reports(
    summary_rows: &[SummaryRow],
    intersections: &[IntersectionRow],
) -> Vec<CellTypeReport> {
    let mut reports: BTreeMap<&str, CellTypeReport> = BTreeMap::new();
    for row in summary_rows {
        let entry = reports
            .entry(row.cell_type.as_str())
            .or_insert_with(|| CellTypeReport {
                cell_type: row.cell_type.clone(),
                n_screens: row.num_screens,
                n_hits: 0,
                n_genes: 0,
                top_overlaps: Vec::new(),
            });
        entry.n_hits += row.num_hits;
        entry.n_genes += 1;
    }

    let mut overlaps: BTreeMap<&str, Vec<(&str, f64)>> = BTreeMap::new();
    for row in intersections.iter().filter(|r| !r.is_self()) {
        overlaps
            .entry(row.cell_type1.as_str())
            .or_default()
            .push((row.cell_type2.as_str(), row.fraction()));
    }
    for (cell_type, mut others) in overlaps {
        others.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        if let Some(report) = reports.get_mut(cell_type) {
            report.top_overlaps = others
                .into_iter()
                .filter(|(_, frac)| *frac > 0.0)
                .take(TOP_OVERLAPS)
                .map(|(name, frac)| (name.to_string(), frac))
                .collect();
        }
    }

    reports.into_values().collect()
}

pub fn write_reports(input: &Stage7Input<'_>, out_dir: &Path) -> Result<(), InputError> {
    fs::create_dir_all(out_dir)?;

    let summary = build_run_summary(input);
    let json = render_summary_json(&summary)?;
    fs::write(out_dir.join("summary.json"), json)?;

    let cell_types = build_cell_type_reports(input.summary_rows, input.intersections);
    let report = render_report_text(&summary, &cell_types);
    fs::write(out_dir.join("report.txt"), report)?;

    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage7_report.rs"]
mod tests;
