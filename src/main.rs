mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use crate::input::InputError;
use crate::input::tables::{read_hit_table, read_summary};
use crate::model::params::{GroupMatch, PipelineParams, ReferenceFiles};
use crate::pipeline::{
    ALIAS_LIST, FILTERED_ALIAS_LIST, FILTERED_HIT_LIST, HIT_LIST, ReferenceInputs, RunConfig,
    SUMMARY, run_all, run_filter, run_intersect, run_search, run_summarize,
};

#[derive(Debug, Parser)]
#[command(name = "orcs-hits", version, about)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run every stage, from the screen index to the pairwise intersections.
    Run(RunArgs),
    /// Select screens, group them by cell type and extract the top hits.
    Search(SearchArgs),
    /// Remove essential and control genes from a hit list.
    Filter(FilterArgs),
    /// Count hits per gene and cell type.
    Summarize(SummarizeArgs),
    /// Intersect hit-gene sets between every pair of cell types.
    Intersect(IntersectArgs),
}

#[derive(Debug, Args)]
struct SelectionArgs {
    /// Master index CSV of screens.
    #[arg(long)]
    index: PathBuf,
    /// Directory holding one result file per screen.
    #[arg(long)]
    screens: PathBuf,
    /// Percentage of each screen's flagged hits to keep, in (0, 100].
    #[arg(long, default_value_t = 10.0)]
    top_percent: f64,
    #[arg(long, default_value = "Timecourse")]
    experimental_setup: String,
    #[arg(long, default_value = "Activation")]
    exclude_methodology: String,
    /// Build non-unique groups by substring instead of label component.
    #[arg(long)]
    substring_match: bool,
}

#[derive(Debug, Args)]
struct ReferenceArgs {
    /// Directory holding the essential and non-essential reference lists.
    #[arg(long)]
    reference_dir: PathBuf,
    /// Genome-wide alias table (GeneID, Symbol, Synonyms) used to expand the
    /// essential set.
    #[arg(long)]
    gene_aliases: Option<PathBuf>,
    #[arg(long)]
    nonessential_file: Option<String>,
    #[arg(long)]
    common_essential_file: Option<String>,
    #[arg(long)]
    inferred_essential_file: Option<String>,
    /// Only compare hit symbols, not their aliases, against the essential set.
    #[arg(long)]
    no_alias_matching: bool,
}

#[derive(Debug, Args)]
struct RunArgs {
    #[command(flatten)]
    selection: SelectionArgs,
    #[command(flatten)]
    references: ReferenceArgs,
    /// Symbol to Ensembl identifier table (Symbol, EnsemblID).
    #[arg(long)]
    gene_ids: Option<PathBuf>,
    #[arg(long)]
    out: PathBuf,
}

#[derive(Debug, Args)]
struct SearchArgs {
    #[command(flatten)]
    selection: SelectionArgs,
    #[arg(long)]
    out: PathBuf,
}

#[derive(Debug, Args)]
struct FilterArgs {
    /// Directory holding hit_list.csv (and alias_list.csv).
    #[arg(long)]
    input: PathBuf,
    #[command(flatten)]
    references: ReferenceArgs,
    #[arg(long)]
    out: PathBuf,
}

#[derive(Debug, Args)]
struct SummarizeArgs {
    /// Directory holding filtered_hit_list.csv.
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    gene_ids: Option<PathBuf>,
    #[arg(long)]
    out: PathBuf,
}

#[derive(Debug, Args)]
struct IntersectArgs {
    /// Directory holding filtered_hit_list_summarised.csv.
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    out: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    if let Err(err) = run(cli.command) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), InputError> {
    match command {
        Command::Run(args) => {
            let config = RunConfig {
                index: args.selection.index.clone(),
                screens_dir: args.selection.screens.clone(),
                references: reference_inputs(&args.references),
                gene_ids: args.gene_ids,
                out_dir: args.out,
                params: build_params(Some(&args.selection), Some(&args.references))?,
            };
            let counts = run_all(&config)?;
            info!(
                "{} cell types, {} filtered hits, {} intersections",
                counts.cell_type_groups, counts.hits_filtered, counts.intersection_rows
            );
        }
        Command::Search(args) => {
            let params = build_params(Some(&args.selection), None)?;
            run_search(
                &args.selection.index,
                &args.selection.screens,
                &params,
                &args.out,
            )?;
        }
        Command::Filter(args) => {
            let params = build_params(None, Some(&args.references))?;
            let table = read_hit_table(
                &args.input.join(HIT_LIST),
                existing(&args.input.join(ALIAS_LIST)),
            )?;
            let references = reference_inputs(&args.references);
            let stage4 = run_filter(&table, &references, &params, &args.out)?;
            info!("{} hits removed, {} kept", stage4.n_removed, stage4.table.total_hits());
        }
        Command::Summarize(args) => {
            let table = read_hit_table(
                &args.input.join(FILTERED_HIT_LIST),
                existing(&args.input.join(FILTERED_ALIAS_LIST)),
            )?;
            run_summarize(&table, args.gene_ids.as_deref(), &args.out)?;
        }
        Command::Intersect(args) => {
            let rows = read_summary(&args.input.join(SUMMARY))?;
            run_intersect(&rows, &args.out)?;
        }
    }
    Ok(())
}

fn existing(path: &Path) -> Option<&Path> {
    path.exists().then_some(path)
}

fn build_params(
    selection: Option<&SelectionArgs>,
    references: Option<&ReferenceArgs>,
) -> Result<PipelineParams, InputError> {
    let mut params = PipelineParams::default_v1();
    if let Some(sel) = selection {
        params.top_percent = sel.top_percent;
        params.experimental_setup = sel.experimental_setup.clone();
        params.excluded_methodology = sel.exclude_methodology.clone();
        if sel.substring_match {
            params.group_match = GroupMatch::Substring;
        }
    }
    if let Some(refs) = references {
        params.alias_matching = !refs.no_alias_matching;
    }
    params.validate().map_err(InputError::InvalidInput)?;
    Ok(params)
}

fn reference_inputs(args: &ReferenceArgs) -> ReferenceInputs {
    let mut files = ReferenceFiles::default();
    if let Some(name) = &args.nonessential_file {
        files.nonessential = name.clone();
    }
    if let Some(name) = &args.common_essential_file {
        files.common_essential = name.clone();
    }
    if let Some(name) = &args.inferred_essential_file {
        files.inferred_essential = name.clone();
    }
    ReferenceInputs {
        reference_dir: args.reference_dir.clone(),
        files,
        gene_aliases: args.gene_aliases.clone(),
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
