//! Tests for command-line argument parsing
//!
//! Note: These tests verify the argument parser configuration by creating
//! a test parser with the same structure as the replay binary.

use clap::{Arg, ArgAction, Command as ClapCommand};

/// Create a command with the same argument structure as the main binary
fn create_test_command() -> ClapCommand {
    ClapCommand::new("expression-replay")
        .version("0.1.0")
        .about("Replays recorded face-tracker output through the expression pipeline")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("PATH")
                .help("JSON Lines file of detection records"),
        )
        .arg(
            Arg::new("config")
                .short('C')
                .long("config")
                .value_name("PATH")
                .help("Path to configuration file"),
        )
        .arg(
            Arg::new("print-config")
                .long("print-config")
                .action(ArgAction::SetTrue)
                .help("Print an example configuration and exit"),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Enable debug output"),
        )
}

#[test]
fn test_defaults() {
    let matches = create_test_command().try_get_matches_from(["expression-replay"]).unwrap();

    assert!(matches.get_one::<String>("input").is_none());
    assert!(matches.get_one::<String>("config").is_none());
    assert!(!matches.get_flag("print-config"));
    assert!(!matches.get_flag("debug"));
}

#[test]
fn test_short_and_long_flags() {
    let matches = create_test_command()
        .try_get_matches_from(["expression-replay", "-i", "faces.jsonl", "-C", "tuning.yaml", "-d"])
        .unwrap();
    assert_eq!(matches.get_one::<String>("input").unwrap(), "faces.jsonl");
    assert_eq!(matches.get_one::<String>("config").unwrap(), "tuning.yaml");
    assert!(matches.get_flag("debug"));

    let matches = create_test_command()
        .try_get_matches_from(["expression-replay", "--input", "a.jsonl", "--print-config"])
        .unwrap();
    assert_eq!(matches.get_one::<String>("input").unwrap(), "a.jsonl");
    assert!(matches.get_flag("print-config"));
}

#[test]
fn test_unknown_argument_is_rejected() {
    let result = create_test_command().try_get_matches_from(["expression-replay", "--filter", "kalman"]);
    assert!(result.is_err());
}

#[test]
fn test_missing_value_is_rejected() {
    let result = create_test_command().try_get_matches_from(["expression-replay", "--input"]);
    assert!(result.is_err());
}
