use std::collections::HashSet;

use tracing::{debug, info};

use crate::model::params::{GroupMatch, PipelineParams};
use crate::model::{CellTypeGroup, GroupKind, ScreenRecord};

/// Atomic cell types named by a label, in order. "Breast / Liver" gives
/// ["Breast", "Liver"]; a plain label gives itself.
pub fn label_components(label: &str, separator: char) -> Vec<&str> {
    label
        .split(separator)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect()
}

fn label_mentions(label: &str, name: &str, params: &PipelineParams) -> bool {
    match params.group_match {
        GroupMatch::Token => label_components(label, params.separator).contains(&name),
        GroupMatch::Substring => label.contains(name),
    }
}

fn push_unique<'a>(out: &mut Vec<&'a str>, seen: &mut HashSet<&'a str>, value: &'a str) {
    if seen.insert(value) {
        out.push(value);
    }
}

#[derive(Debug, Clone, Default)]
pub struct LabelSets<'a> {
    pub labels: Vec<&'a str>,
    pub atomic: Vec<&'a str>,
    pub composite: Vec<&'a str>,
}

/// Distinct labels, atomic names and composite labels in first-seen order.
pub fn collect_labels<'a>(records: &'a [ScreenRecord], separator: char) -> LabelSets<'a> {
    let mut labels = Vec::new();
    let mut seen_labels = HashSet::new();
    for record in records {
        push_unique(&mut labels, &mut seen_labels, record.cell_type_broad.as_str());
    }

    let mut atomic = Vec::new();
    let mut seen_atomic = HashSet::new();
    let mut composite = Vec::new();
    for &label in &labels {
        let components = label_components(label, separator);
        if components.len() > 1 {
            composite.push(label);
        }
        for c in components {
            push_unique(&mut atomic, &mut seen_atomic, c);
        }
    }

    LabelSets {
        labels,
        atomic,
        composite,
    }
}

/// Partitions screens by broad cell type: one group per atomic name and per
/// composite label holding the records with exactly that label, plus one
/// marker-suffixed group per atomic name shared by two or more composite
/// labels holding every record that mentions it. Empty groups are skipped and a
/// group whose membership repeats an earlier one is dropped.
pub fn build_groups(records: &[ScreenRecord], params: &PipelineParams) -> Vec<CellTypeGroup> {
    let sets = collect_labels(records, params.separator);
    let mut groups = Vec::new();

    for (kind, names) in [
        (GroupKind::Single, &sets.atomic),
        (GroupKind::Composite, &sets.composite),
    ] {
        for &name in names {
            let members = records
                .iter()
                .filter(|r| r.cell_type_broad == name)
                .cloned()
                .collect::<Vec<_>>();
            if members.is_empty() {
                debug!("no screens labelled exactly {:?}; skipping", name);
                continue;
            }
            groups.push(CellTypeGroup {
                key: name.to_string(),
                kind,
                records: members,
            });
        }
    }

    for &name in &sets.atomic {
        let n_composites = sets
            .composite
            .iter()
            .filter(|label| label_mentions(label, name, params))
            .count();
        if n_composites == 0 {
            continue;
        }
        if n_composites == 1 {
            debug!(
                "{:?} appears in a single composite label; no non-unique group",
                name
            );
            continue;
        }
        let members = records
            .iter()
            .filter(|r| label_mentions(&r.cell_type_broad, name, params))
            .cloned()
            .collect::<Vec<_>>();
        groups.push(CellTypeGroup {
            key: format!("{}{}", name, params.non_unique_marker),
            kind: GroupKind::NonUnique,
            records: members,
        });
    }

    let groups = drop_duplicate_groups(groups);
    info!(
        "built {} cell-type groups from {} labels ({} atomic, {} composite)",
        groups.len(),
        sets.labels.len(),
        sets.atomic.len(),
        sets.composite.len()
    );
    groups
}

fn membership(group: &CellTypeGroup) -> Vec<&str> {
    let mut ids = group.screen_ids().collect::<Vec<_>>();
    ids.sort_unstable();
    ids
}

fn drop_duplicate_groups(groups: Vec<CellTypeGroup>) -> Vec<CellTypeGroup> {
    let mut kept: Vec<CellTypeGroup> = Vec::with_capacity(groups.len());
    for group in groups {
        let ids = membership(&group);
        if let Some(existing) = kept.iter().find(|k| membership(k) == ids) {
            debug!(
                "group {:?} has the same screens as {:?}; dropped",
                group.key, existing.key
            );
            continue;
        }
        kept.push(group);
    }
    kept
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_groups.rs"]
mod tests;
