use super::*;
use clap::CommandFactory;

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_resolve_with_flags() {
    let cli = Cli::try_parse_from([
        "pomwalk",
        "--repository-url",
        "http://localhost:1234/",
        "resolve",
        "com.google.code.gson:gson:2.8.8",
        "--check-jars",
        "--format",
        "json",
    ])
    .unwrap();

    assert_eq!(cli.config.repository_url, "http://localhost:1234/");
    match cli.command {
        Some(Commands::Resolve {
            coordinate,
            check_jars,
            format,
        }) => {
            assert_eq!(coordinate, "com.google.code.gson:gson:2.8.8");
            assert!(check_jars);
            assert_eq!(format, OutputFormat::Json);
        }
        other => panic!("Expected Resolve, got: {:?}", other),
    }
}

#[test]
fn test_resolve_defaults_to_plain() {
    let cli = Cli::try_parse_from(["pomwalk", "resolve", "a:b:1"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Resolve {
            format: OutputFormat::Plain,
            check_jars: false,
            ..
        })
    ));
}

#[test]
fn test_resolve_requires_coordinate() {
    assert!(Cli::try_parse_from(["pomwalk", "resolve"]).is_err());
}

#[test]
fn test_output_format_from_str() {
    assert_eq!("plain".parse::<OutputFormat>().unwrap(), OutputFormat::Plain);
    assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert!("xml".parse::<OutputFormat>().is_err());
}

#[test]
fn test_requires_network() {
    assert!(
        Commands::Pom {
            coordinate: "a:b:1".to_string()
        }
        .requires_network()
    );
    assert!(
        !Commands::Url {
            coordinate: "a:b:1".to_string()
        }
        .requires_network()
    );
    assert!(!Commands::Version.requires_network());
}
