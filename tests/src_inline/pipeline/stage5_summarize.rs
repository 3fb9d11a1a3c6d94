use super::*;
use crate::model::{Hit, HitRow};

fn row(cell_type: &str, n_screens: Option<usize>, symbols: &[&str]) -> HitRow {
    HitRow {
        cell_type: cell_type.to_string(),
        n_screens,
        hits: symbols
            .iter()
            .map(|s| Hit::with_aliases(*s, Vec::new()))
            .collect(),
    }
}

fn id_map(pairs: &[(&str, &str)]) -> GeneIdMap {
    GeneIdMap {
        by_symbol: pairs
            .iter()
            .map(|(s, id)| (s.to_string(), id.to_string()))
            .collect(),
    }
}

#[test]
fn test_normalize_cell_type() {
    assert_eq!(normalize_cell_type("Breast / Liver"), "Breast-Liver");
    assert_eq!(normalize_cell_type("Breast*"), "Breast*");
    assert_eq!(normalize_cell_type("Bone Marrow"), "BoneMarrow");
}

#[test]
fn test_count_hits() {
    let counts = count_hits(["B", "A", "B", "C", "B"]);
    assert_eq!(counts, vec![("B", 3), ("A", 1), ("C", 1)]);
}

#[test]
fn test_summarize_orders_by_cell_type_then_count() {
    let table = HitTable {
        rows: vec![
            row("Lung", Some(3), &["MYC", "KRAS", "MYC", "EGFR", "MYC", "KRAS"]),
            row("Breast / Liver", Some(2), &["BRCA1", "EGFR"]),
        ],
    };
    let ids = id_map(&[("MYC", "ENSG00000136997"), ("EGFR", "ENSG00000146648")]);
    let rows = summarize_hits(&table, Some(&ids));

    let flat = rows
        .iter()
        .map(|r| (r.cell_type.as_str(), r.gene.as_str(), r.num_hits))
        .collect::<Vec<_>>();
    assert_eq!(
        flat,
        vec![
            ("Breast-Liver", "BRCA1", 1),
            ("Breast-Liver", "EGFR", 1),
            ("Lung", "EGFR", 1),
            ("Lung", "KRAS", 2),
            ("Lung", "MYC", 3),
        ]
    );
    assert_eq!(rows[0].gene_ensembl, None);
    assert_eq!(rows[1].gene_ensembl.as_deref(), Some("ENSG00000146648"));
    assert_eq!(rows[4].num_screens, Some(3));
}

#[test]
fn test_hit_counts_sum_to_hit_list_length() {
    let table = HitTable {
        rows: vec![
            row("A", Some(4), &["X", "Y", "X", "Z", "X", "Y", "W"]),
            row("B", None, &["Q"]),
            row("C", Some(1), &[]),
        ],
    };
    let rows = summarize_hits(&table, None);
    for hit_row in &table.rows {
        let total: usize = rows
            .iter()
            .filter(|r| r.cell_type == normalize_cell_type(&hit_row.cell_type))
            .map(|r| r.num_hits)
            .sum();
        assert_eq!(total, hit_row.hits.len());
    }
}

#[test]
fn test_hit_histogram() {
    let table = HitTable {
        rows: vec![row("Lung", Some(3), &["MYC", "KRAS", "MYC", "EGFR", "TP53"])],
    };
    let rows = summarize_hits(&table, None);
    let hist = hit_histogram(&rows);
    assert_eq!(hist.len(), 2);
    assert_eq!(hist[0].num_hits, 1);
    assert_eq!(hist[0].frequency, 3);
    assert_eq!(hist[0].genes, "EGFR,KRAS,TP53");
    assert_eq!(hist[1].num_hits, 2);
    assert_eq!(hist[1].genes, "MYC");
}

#[test]
fn test_run_stage5_counts_unresolved() {
    let table = HitTable {
        rows: vec![row("Lung", Some(1), &["MYC", "NOVEL1"])],
    };
    let ids = id_map(&[("MYC", "ENSG00000136997")]);
    assert_eq!(run_stage5(&table, Some(&ids)).n_unresolved, 1);
    assert_eq!(run_stage5(&table, None).n_unresolved, 0);
}
