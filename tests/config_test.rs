use cipherforge::config::{Config, SearchParams};
use cipherforge::error::CipherError;
use clap::{CommandFactory, FromArgMatches, Parser};
use rstest::rstest;
use std::io::Write;
use tempfile::NamedTempFile;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    search: SearchParams,
}

#[test]
fn test_defaults_are_valid() {
    let params = SearchParams::default();
    assert!(params.validate().is_ok());
    assert_eq!(params.population_size(), 200);
    assert!(params.shock_enabled());
}

#[rstest]
#[case(SearchParams { crossover_probability: 0.6, ..Default::default() })]
#[case(SearchParams { crossover_probability: 1.5, mutation_probability: -0.5, ..Default::default() })]
#[case(SearchParams { crossover_probability: f64::NAN, ..Default::default() })]
#[case(SearchParams { elites: 0, children: 0, randoms: 0, ..Default::default() })]
#[case(SearchParams { tournament_size: 0, ..Default::default() })]
fn test_invalid_params_are_rejected(#[case] params: SearchParams) {
    assert!(matches!(params.validate(), Err(CipherError::Config(_))));
}

#[test]
fn test_tournament_size_only_matters_with_children() {
    let params = SearchParams {
        children: 0,
        tournament_size: 0,
        ..Default::default()
    };
    assert!(params.validate().is_ok());
}

#[test]
fn test_probability_sum_tolerates_rounding() {
    let params = SearchParams {
        crossover_probability: 0.1 + 0.2,
        mutation_probability: 0.7,
        ..Default::default()
    };
    assert!(params.validate().is_ok());
}

#[test]
fn test_partial_json_falls_back_to_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"search": {{"elites": 3, "max_cycles": 12}}}}"#).unwrap();

    let config = Config::load_from_file(file.path()).unwrap();
    assert_eq!(config.search.elites, 3);
    assert_eq!(config.search.max_cycles, 12);
    assert_eq!(config.search.children, SearchParams::default().children);
}

#[test]
fn test_invalid_json_config_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"search": {{"crossover_probability": 0.5, "mutation_probability": 0.1}}}}"#
    )
    .unwrap();
    assert!(matches!(
        Config::load_from_file(file.path()),
        Err(CipherError::Config(_))
    ));
}

#[test]
fn test_cli_overrides_only_typed_flags() {
    let matches = TestCli::command().get_matches_from(["test", "--elites", "3", "--tournament-size", "5"]);
    let cli = TestCli::from_arg_matches(&matches).unwrap();

    let mut base = SearchParams {
        elites: 99,
        children: 77,
        ..Default::default()
    };
    base.merge_from_cli(&cli.search, &matches);

    assert_eq!(base.elites, 3);
    assert_eq!(base.tournament_size, 5);
    // Defaulted on the command line, so the file value wins.
    assert_eq!(base.children, 77);
}
