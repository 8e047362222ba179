use super::output_mode;
use crate::cli::args::Cli;
use crate::project_identity;
use crate::utils::machine_output::Format;
use clap::Parser;

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec![project_identity::BINARY_NAME];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).expect("arguments should parse")
}

#[test]
fn table_is_the_default() {
    let mode = output_mode(&parse(&["list"])).unwrap();
    assert_eq!(mode.format, Format::Table);
    assert!(!mode.versioned);
}

#[test]
fn json_without_contract_is_plain() {
    let mode = output_mode(&parse(&["list", "--format", "json"])).unwrap();
    assert_eq!(mode.format, Format::Json);
    assert!(!mode.versioned);
}

#[test]
fn v1_contract_wraps_machine_output() {
    let mode = output_mode(&parse(&["query", "SUNWcurl", "--format", "yaml", "--output-version", "v1"])).unwrap();
    assert_eq!(mode.format, Format::Yaml);
    assert!(mode.versioned);
}

#[test]
fn unknown_contract_version_is_rejected() {
    assert!(output_mode(&parse(&["list", "--format", "json", "--output-version", "v2"])).is_err());
}

#[test]
fn contract_is_rejected_for_check() {
    assert!(output_mode(&parse(&["check", "--format", "json", "--output-version", "v1"])).is_err());
}

#[test]
fn unknown_format_is_rejected() {
    assert!(output_mode(&parse(&["list", "--format", "xml"])).is_err());
}

#[test]
fn machine_format_is_rejected_for_commands_without_it() {
    assert!(output_mode(&parse(&["ensure", "SUNWcurl", "absent", "--format", "json"])).is_err());
    assert!(output_mode(&parse(&["check", "--format", "yaml"])).is_err());
}

#[test]
fn explicit_table_format_is_accepted_everywhere() {
    let mode = output_mode(&parse(&["check", "--format", "table"])).unwrap();
    assert_eq!(mode.format, Format::Table);
}
