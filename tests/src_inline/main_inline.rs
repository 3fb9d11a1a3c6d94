use super::*;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("orcs-hits").chain(args.iter().copied()))
}

#[test]
fn test_parse_run_defaults() {
    let cli = parse(&[
        "run",
        "--index",
        "index.csv",
        "--screens",
        "screens",
        "--reference-dir",
        "depmap",
        "--out",
        "out",
    ])
    .unwrap();
    let Command::Run(args) = cli.command else {
        panic!("expected run");
    };
    let params = build_params(Some(&args.selection), Some(&args.references)).unwrap();
    assert_eq!(params.top_percent, 10.0);
    assert_eq!(params.group_match, GroupMatch::Token);
    assert!(params.alias_matching);
    assert_eq!(args.gene_ids, None);

    let refs = reference_inputs(&args.references);
    assert_eq!(refs.files.nonessential, "AchillesNonessentialControls.csv");
}

#[test]
fn test_parse_search_overrides() {
    let cli = parse(&[
        "search",
        "--index",
        "index.csv",
        "--screens",
        "screens",
        "--top-percent",
        "25",
        "--substring-match",
        "--out",
        "out",
    ])
    .unwrap();
    let Command::Search(args) = cli.command else {
        panic!("expected search");
    };
    let params = build_params(Some(&args.selection), None).unwrap();
    assert_eq!(params.top_percent, 25.0);
    assert_eq!(params.group_match, GroupMatch::Substring);
}

#[test]
fn test_invalid_top_percent_rejected() {
    let cli = parse(&[
        "search",
        "--index",
        "i.csv",
        "--screens",
        "s",
        "--top-percent",
        "0",
        "--out",
        "o",
    ])
    .unwrap();
    let Command::Search(args) = cli.command else {
        panic!("expected search");
    };
    let err = build_params(Some(&args.selection), None).unwrap_err();
    assert!(matches!(err, InputError::InvalidInput(_)));
}

#[test]
fn test_filter_reference_overrides() {
    let cli = parse(&[
        "filter",
        "--input",
        "hits",
        "--reference-dir",
        "depmap",
        "--common-essential-file",
        "essentials.csv",
        "--no-alias-matching",
        "--out",
        "out",
    ])
    .unwrap();
    let Command::Filter(args) = cli.command else {
        panic!("expected filter");
    };
    let params = build_params(None, Some(&args.references)).unwrap();
    assert!(!params.alias_matching);
    let refs = reference_inputs(&args.references);
    assert_eq!(refs.files.common_essential, "essentials.csv");
    assert_eq!(refs.reference_dir, PathBuf::from("depmap"));
}

#[test]
fn test_missing_required_argument() {
    assert!(parse(&["intersect", "--input", "x"]).is_err());
}
