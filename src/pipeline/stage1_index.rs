use std::path::Path;

use tracing::info;

use crate::input::InputError;
use crate::input::index::load_screen_index;
use crate::model::ScreenRecord;
use crate::model::params::PipelineParams;

#[derive(Debug)]
pub struct Stage1Output {
    pub n_indexed: usize,
    pub records: Vec<ScreenRecord>,
}

pub fn run_stage1(
    index_path: &Path,
    params: &PipelineParams,
) -> Result<Stage1Output, InputError> {
    let all = load_screen_index(index_path)?;
    let n_indexed = all.len();
    let records = select_screens(all, params);
    info!(
        "selected {} of {} screens ({} setup, excluding {} libraries)",
        records.len(),
        n_indexed,
        params.experimental_setup,
        params.excluded_methodology
    );
    Ok(Stage1Output { n_indexed, records })
}

pub fn select_screens(records: Vec<ScreenRecord>, params: &PipelineParams) -> Vec<ScreenRecord> {
    records
        .into_iter()
        .filter(|r| r.experimental_setup == params.experimental_setup)
        .filter(|r| r.library_methodology != params.excluded_methodology)
        .collect()
}
