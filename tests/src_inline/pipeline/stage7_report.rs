use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("orcs_hits_stage7_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn summary_row(cell_type: &str, gene: &str, num_hits: usize) -> SummaryRow {
    SummaryRow {
        cell_type: cell_type.to_string(),
        gene: gene.to_string(),
        num_hits,
        num_screens: Some(2),
        gene_ensembl: None,
    }
}

fn intersection(a: &str, b: &str, n: usize, total: usize) -> IntersectionRow {
    IntersectionRow {
        cell_type1: a.to_string(),
        cell_type2: b.to_string(),
        n_intersect: n,
        n_genes1: total,
        intersect_list: String::new(),
    }
}

#[test]
fn test_cell_type_reports() {
    let rows = vec![
        summary_row("A", "X", 1),
        summary_row("A", "Y", 2),
        summary_row("B", "Y", 1),
    ];
    let intersections = vec![
        intersection("A", "A", 2, 2),
        intersection("A", "B", 1, 2),
        intersection("A", "C", 0, 2),
        intersection("B", "A", 1, 1),
        intersection("B", "B", 1, 1),
    ];
    let reports = build_cell_type_reports(&rows, &intersections);

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].cell_type, "A");
    assert_eq!(reports[0].n_hits, 3);
    assert_eq!(reports[0].n_genes, 2);
    assert_eq!(reports[0].top_overlaps, vec![("B".to_string(), 0.5)]);
    assert_eq!(reports[1].top_overlaps, vec![("A".to_string(), 1.0)]);
}

#[test]
fn test_write_reports() {
    let dir = make_temp_dir();
    let params = PipelineParams::default_v1();
    let rows = vec![summary_row("A", "X", 1)];
    let intersections = vec![intersection("A", "A", 1, 1)];
    let counts = StageCounts {
        cell_type_groups: 1,
        hits_filtered: 1,
        ..StageCounts::default()
    };

    write_reports(
        &Stage7Input {
            params: &params,
            counts,
            summary_rows: &rows,
            intersections: &intersections,
            outputs: vec!["pairwise_intersects.txt".to_string()],
        },
        &dir,
    )
    .unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.join("summary.json")).unwrap()).unwrap();
    assert_eq!(json["tool"], "orcs-hits");
    assert_eq!(json["params"]["top_percent"], 10.0);
    assert_eq!(json["params"]["group_match"], "token");
    assert_eq!(json["counts"]["hits_filtered"], 1);

    let text = fs::read_to_string(dir.join("report.txt")).unwrap();
    assert!(text.contains("A: 2 screens, 1 hits, 1 distinct genes"));
}
