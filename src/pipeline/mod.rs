use std::path::{Path, PathBuf};

use tracing::info;

use crate::input::InputError;
use crate::input::reference::{load_gene_alias_table, load_gene_id_map};
use crate::input::screens::list_screen_files;
use crate::model::params::{PipelineParams, ReferenceFiles};
use crate::model::{HitTable, IntersectionRow, SummaryRow};
use crate::report::StageCounts;
use crate::report::tables::{
    write_alias_table, write_hit_table, write_histogram, write_intersections, write_summary,
};

pub mod stage1_index;
pub mod stage2_groups;
pub mod stage3_hits;
pub mod stage4_essential;
pub mod stage5_summarize;
pub mod stage6_intersect;
pub mod stage7_report;

use stage1_index::run_stage1;
use stage2_groups::build_groups;
use stage3_hits::run_stage3;
use stage4_essential::{Stage4Output, load_essential_set, run_stage4};
use stage5_summarize::{Stage5Output, run_stage5};
use stage6_intersect::run_stage6;
use stage7_report::{Stage7Input, write_reports};

pub const HIT_LIST: &str = "hit_list.csv";
pub const ALIAS_LIST: &str = "alias_list.csv";
pub const FILTERED_HIT_LIST: &str = "filtered_hit_list.csv";
pub const FILTERED_ALIAS_LIST: &str = "filtered_alias_list.csv";
pub const SUMMARY: &str = "filtered_hit_list_summarised.csv";
pub const HISTOGRAM: &str = "hit_histogram.tsv";
pub const INTERSECTIONS: &str = "pairwise_intersects.txt";

#[derive(Debug, Clone)]
pub struct ReferenceInputs {
    pub reference_dir: PathBuf,
    pub files: ReferenceFiles,
    pub gene_aliases: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub index: PathBuf,
    pub screens_dir: PathBuf,
    pub references: ReferenceInputs,
    pub gene_ids: Option<PathBuf>,
    pub out_dir: PathBuf,
    pub params: PipelineParams,
}

#[derive(Debug)]
pub struct SearchOutput {
    pub n_indexed: usize,
    pub n_selected: usize,
    pub table: HitTable,
}

/// Stages 1-3: select screens, group them by cell type and extract hits.
pub fn run_search(
    index: &Path,
    screens_dir: &Path,
    params: &PipelineParams,
    out_dir: &Path,
) -> Result<SearchOutput, InputError> {
    let stage1 = run_stage1(index, params)?;
    let groups = build_groups(&stage1.records, params);
    let screen_files = list_screen_files(screens_dir)?;
    let table = run_stage3(&groups, &screen_files, params.top_percent)?;

    write_hit_table(&table, &out_dir.join(HIT_LIST))?;
    write_alias_table(&table, &out_dir.join(ALIAS_LIST))?;
    info!("wrote {} and {} to {}", HIT_LIST, ALIAS_LIST, out_dir.display());

    Ok(SearchOutput {
        n_indexed: stage1.n_indexed,
        n_selected: stage1.records.len(),
        table,
    })
}

/// Stage 4: drop essential and control genes from a hit table.
pub fn run_filter(
    table: &HitTable,
    references: &ReferenceInputs,
    params: &PipelineParams,
    out_dir: &Path,
) -> Result<Stage4Output, InputError> {
    let alias_table = match &references.gene_aliases {
        Some(path) => Some(load_gene_alias_table(path)?),
        None => None,
    };
    let essential = load_essential_set(
        &references.reference_dir,
        &references.files,
        alias_table.as_ref(),
    )?;
    let stage4 = run_stage4(table, essential, params.alias_matching);

    write_hit_table(&stage4.table, &out_dir.join(FILTERED_HIT_LIST))?;
    write_alias_table(&stage4.table, &out_dir.join(FILTERED_ALIAS_LIST))?;
    info!(
        "wrote {} and {} to {}",
        FILTERED_HIT_LIST,
        FILTERED_ALIAS_LIST,
        out_dir.display()
    );
    Ok(stage4)
}

/// Stage 5: long-form per-gene hit counts and the hit histogram.
pub fn run_summarize(
    table: &HitTable,
    gene_ids: Option<&Path>,
    out_dir: &Path,
) -> Result<Stage5Output, InputError> {
    let id_map = match gene_ids {
        Some(path) => Some(load_gene_id_map(path)?),
        None => None,
    };
    let stage5 = run_stage5(table, id_map.as_ref());

    write_summary(&stage5.rows, &out_dir.join(SUMMARY))?;
    write_histogram(&stage5.histogram, &out_dir.join(HISTOGRAM))?;
    info!("wrote {} and {} to {}", SUMMARY, HISTOGRAM, out_dir.display());
    Ok(stage5)
}

/// Stage 6: pairwise intersections of the summarised hit-gene sets.
pub fn run_intersect(
    rows: &[SummaryRow],
    out_dir: &Path,
) -> Result<Vec<IntersectionRow>, InputError> {
    let intersections = run_stage6(rows);
    write_intersections(&intersections, &out_dir.join(INTERSECTIONS))?;
    info!("wrote {} to {}", INTERSECTIONS, out_dir.display());
    Ok(intersections)
}

/// All stages end to end. Every stage writes its complete output before the
/// next one starts.
pub fn run_all(config: &RunConfig) -> Result<StageCounts, InputError> {
    let out_dir = config.out_dir.as_path();
    std::fs::create_dir_all(out_dir)?;

    let search = run_search(&config.index, &config.screens_dir, &config.params, out_dir)?;
    let stage4 = run_filter(&search.table, &config.references, &config.params, out_dir)?;
    let stage5 = run_summarize(&stage4.table, config.gene_ids.as_deref(), out_dir)?;
    let intersections = run_intersect(&stage5.rows, out_dir)?;

    let counts = StageCounts {
        screens_indexed: search.n_indexed,
        screens_selected: search.n_selected,
        cell_type_groups: search.table.rows.len(),
        hits_unfiltered: search.table.total_hits(),
        hits_filtered: stage4.table.total_hits(),
        essential_genes: stage4.essential.len(),
        summary_rows: stage5.rows.len(),
        unresolved_identifiers: stage5.n_unresolved,
        intersection_rows: intersections.len(),
    };

    let outputs = [
        HIT_LIST,
        ALIAS_LIST,
        FILTERED_HIT_LIST,
        FILTERED_ALIAS_LIST,
        SUMMARY,
        HISTOGRAM,
        INTERSECTIONS,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    write_reports(
        &Stage7Input {
            params: &config.params,
            counts: counts.clone(),
            summary_rows: &stage5.rows,
            intersections: &intersections,
            outputs,
        },
        out_dir,
    )?;
    info!("run complete; outputs in {}", out_dir.display());
    Ok(counts)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/end_to_end.rs"]
mod tests;
