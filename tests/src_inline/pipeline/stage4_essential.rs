use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::input::reference::ReferenceGene;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("orcs_hits_stage4_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    let mut f = BufWriter::new(File::create(path).unwrap());
    f.write_all(contents.as_bytes()).unwrap();
}

fn hit(symbol: &str, aliases: &[&str]) -> Hit {
    Hit::with_aliases(symbol, aliases.iter().map(|a| a.to_string()).collect())
}

fn essential(symbols: &[&str]) -> EssentialSet {
    let genes = symbols
        .iter()
        .map(|s| ReferenceGene {
            symbol: s.to_string(),
            gene_id: None,
        })
        .collect::<Vec<_>>();
    EssentialSet::from_genes(&genes, None)
}

fn table(rows: Vec<(&str, Vec<Hit>)>) -> HitTable {
    HitTable {
        rows: rows
            .into_iter()
            .map(|(cell_type, hits)| HitRow {
                cell_type: cell_type.to_string(),
                n_screens: Some(2),
                hits,
            })
            .collect(),
    }
}

#[test]
fn test_filter_removes_essential_and_keeps_order() {
    let input = table(vec![(
        "Breast",
        vec![
            hit("TP53", &[]),
            hit("BRCA1", &[]),
            hit("TP53", &[]),
            hit("EGFR", &[]),
        ],
    )]);
    let filtered = filter_essential_genes(&input, &essential(&["TP53"]), true);
    assert_eq!(
        filtered.rows[0].symbols().collect::<Vec<_>>(),
        vec!["BRCA1", "EGFR"]
    );
    assert_eq!(filtered.rows[0].n_screens, Some(2));
}

#[test]
fn test_filter_keeps_duplicate_non_essential_hits() {
    let input = table(vec![(
        "Lung",
        vec![hit("MYC", &[]), hit("KRAS", &[]), hit("MYC", &[])],
    )]);
    let filtered = filter_essential_genes(&input, &essential(&["RPL3"]), true);
    assert_eq!(
        filtered.rows[0].symbols().collect::<Vec<_>>(),
        vec!["MYC", "KRAS", "MYC"]
    );
}

#[test]
fn test_alias_matching() {
    let input = table(vec![(
        "Liver",
        vec![hit("P53ALIAS", &["TP53", "X"]), hit("MYC", &["c-Myc"])],
    )]);
    let set = essential(&["TP53"]);

    let with_aliases = filter_essential_genes(&input, &set, true);
    assert_eq!(with_aliases.rows[0].symbols().collect::<Vec<_>>(), vec!["MYC"]);

    let symbols_only = filter_essential_genes(&input, &set, false);
    assert_eq!(symbols_only.rows[0].hits.len(), 2);
}

#[test]
fn test_no_essential_symbol_survives() {
    let set = essential(&["A", "C", "E"]);
    let input = table(vec![
        ("X", vec![hit("A", &[]), hit("B", &[]), hit("C", &[])]),
        ("Y", vec![hit("D", &[]), hit("E", &[]), hit("B", &[])]),
        ("Z", vec![]),
    ]);
    for alias_matching in [true, false] {
        let filtered = filter_essential_genes(&input, &set, alias_matching);
        assert_eq!(filtered.rows.len(), 3);
        for row in &filtered.rows {
            for symbol in row.symbols() {
                assert!(!set.symbols.contains(symbol));
            }
        }
    }
}

#[test]
fn test_load_essential_set_unions_three_lists() {
    let dir = make_temp_dir();
    let files = ReferenceFiles::default();
    write_file(&dir.join(&files.nonessential), "Gene\nOR1A1 (8383)\n");
    write_file(
        &dir.join(&files.common_essential),
        "Gene\nRPL3 (6122)\nTP53 (7157)\n",
    );
    write_file(
        &dir.join(&files.inferred_essential),
        "Gene\nTP53 (7157)\nPOLR2A (5430)\n",
    );

    let set = load_essential_set(&dir, &files, None).unwrap();
    assert_eq!(
        set.symbols.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["OR1A1", "POLR2A", "RPL3", "TP53"]
    );
}

#[test]
fn test_missing_reference_is_fatal() {
    let dir = make_temp_dir();
    let files = ReferenceFiles::default();
    write_file(&dir.join(&files.nonessential), "Gene\nOR1A1 (8383)\n");
    assert!(load_essential_set(&dir, &files, None).is_err());
}

#[test]
fn test_run_stage4_counts_removed() {
    let input = table(vec![(
        "Breast",
        vec![hit("TP53", &[]), hit("BRCA1", &[]), hit("TP53", &[])],
    )]);
    let out = run_stage4(&input, essential(&["TP53"]), true);
    assert_eq!(out.n_removed, 2);
    assert_eq!(out.table.total_hits(), 1);
}
