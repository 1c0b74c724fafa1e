use clap::Parser;
use critiquer::cli::{exit_code, Cli, Commands, EXIT_CONTRACT, EXIT_VALIDATION};
use critiquer::DomainError;
use std::path::PathBuf;

#[test]
fn test_parse_run() {
    let cli = Cli::try_parse_from([
        "critiquer",
        "run",
        "--config",
        "critique.yaml",
        "--script",
        "navigation.yaml",
        "-o",
        "report.md",
    ])
    .unwrap();

    assert!(!cli.json);
    match cli.command {
        Commands::Run(args) => {
            assert_eq!(args.config, PathBuf::from("critique.yaml"));
            assert_eq!(args.script, Some(PathBuf::from("navigation.yaml")));
            assert_eq!(args.output, Some(PathBuf::from("report.md")));
        }
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_parse_run_requires_config() {
    assert!(Cli::try_parse_from(["critiquer", "run"]).is_err());
}

#[test]
fn test_global_json_flag() {
    let cli = Cli::try_parse_from(["critiquer", "validate", "-c", "critique.yaml", "--json"])
        .unwrap();

    assert!(cli.json);
    match cli.command {
        Commands::Validate(args) => assert_eq!(args.config, PathBuf::from("critique.yaml")),
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_parse_personas() {
    let cli = Cli::try_parse_from(["critiquer", "--json", "personas"]).unwrap();
    assert!(cli.json);
    assert!(matches!(cli.command, Commands::Personas));
}

#[test]
fn test_unknown_command_rejected() {
    assert!(Cli::try_parse_from(["critiquer", "deploy"]).is_err());
}

#[test]
fn test_exit_codes_follow_fault_kind() {
    let validation = anyhow::Error::from(DomainError::ValidationFault("no app_url".to_string()));
    let contract = anyhow::Error::from(DomainError::contract("keyword-judge", "blank reason"));

    assert_eq!(exit_code(&validation), EXIT_VALIDATION);
    assert_eq!(exit_code(&contract), EXIT_CONTRACT);
}
