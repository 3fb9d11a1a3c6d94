use crate::report::{CellTypeReport, RunSummary, format_fraction};

pub fn render_report_text(summary: &RunSummary, cell_types: &[CellTypeReport]) -> String {
    let mut out = String::new();

    out.push_str("CRISPR Screen Hit Report\n");
    out.push_str("========================\n\n");

    out.push_str("1. Run\n");
    out.push_str(&format!("Tool: {} {}\n", summary.tool, summary.version));
    out.push_str(&format!(
        "Top percent of flagged hits kept per screen: {}\n",
        summary.params.top_percent
    ));
    out.push_str(&format!(
        "Screens: {} selected of {} indexed ({} setup, excluding {})\n",
        summary.counts.screens_selected,
        summary.counts.screens_indexed,
        summary.params.experimental_setup,
        summary.params.excluded_methodology
    ));
    out.push_str(&format!(
        "Cell-type groups: {} (non-unique matching: {})\n\n",
        summary.counts.cell_type_groups, summary.params.group_match
    ));

    out.push_str("2. Filtering\n");
    out.push_str(&format!(
        "Essential/control genes: {}\n",
        summary.counts.essential_genes
    ));
    out.push_str(&format!(
        "Hits before filtering: {}\nHits after filtering: {}\n",
        summary.counts.hits_unfiltered, summary.counts.hits_filtered
    ));
    if summary.counts.unresolved_identifiers > 0 {
        out.push_str(&format!(
            "Genes without identifier: {}\n",
            summary.counts.unresolved_identifiers
        ));
    }
    out.push('\n');

    out.push_str("3. Cell types\n");
    for ct in cell_types {
        let screens = ct
            .n_screens
            .map(|n| n.to_string())
            .unwrap_or_else(|| "?".to_string());
        out.push_str(&format!(
            "{}: {} screens, {} hits, {} distinct genes\n",
            ct.cell_type, screens, ct.n_hits, ct.n_genes
        ));
        if !ct.top_overlaps.is_empty() {
            let overlaps = ct
                .top_overlaps
                .iter()
                .map(|(other, frac)| format!("{} ({})", other, format_fraction(*frac)))
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!("  closest: {}\n", overlaps));
        }
    }

    out
}
