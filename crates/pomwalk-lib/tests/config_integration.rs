use clap::Parser;
use pomwalk_lib::application::config::AppConfig;
use pomwalk_lib::application::{Cli, Commands, OutputFormat};
use pomwalk_lib::maven::MAVEN_CENTRAL_URL;
use pomwalk_lib::primitives::{ColorIntent, ConfigError, LogFormat};

#[test]
fn test_config_default_creation() {
    let config = AppConfig::default();

    assert!(config.log_level <= 4);
    assert!(config.net_timeout > 0);
    assert_eq!(config.repository_url, MAVEN_CENTRAL_URL);
    assert_eq!(config.color, ColorIntent::Auto);
    assert!(config.cache_dir.is_none());
}

#[test]
fn test_config_merging_integration() {
    let base_config = AppConfig::default();
    let override_config = AppConfig {
        log_level: 3,
        repository_url: "https://repo.example.org/maven".to_string(),
        color: ColorIntent::Never,
        ..AppConfig::default()
    };

    let merged = base_config.merge_with(override_config);

    assert_eq!(merged.log_level, 3);
    assert_eq!(merged.repository_url, "https://repo.example.org/maven");
    assert_eq!(merged.color, ColorIntent::Never);

    // Non-overridden fields keep their defaults
    assert_eq!(merged.net_timeout, 30);
    assert_eq!(merged.retry_backoff_ms, 1000);
}

#[test]
fn test_config_deserializes_with_defaults() {
    let config: AppConfig = serde_json::from_str(
        r#"{ "repository_url": "https://mirror.example.org/m2", "log_format": "json" }"#,
    )
    .unwrap();

    assert_eq!(config.repository_url, "https://mirror.example.org/m2");
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.net_timeout, 30);
    assert_eq!(config.color, ColorIntent::Auto);
}

#[test]
fn test_cli_global_flags_reach_config() {
    let cli = Cli::try_parse_from([
        "pomwalk",
        "--repository-url",
        "https://mirror.example.org/m2",
        "--net-timeout",
        "5",
        "--color",
        "never",
        "resolve",
        "org.acme:app:1.0",
        "--format",
        "json",
    ])
    .unwrap();

    assert_eq!(cli.config.repository_url, "https://mirror.example.org/m2");
    assert_eq!(cli.config.net_timeout, 5);
    assert_eq!(cli.config.color, ColorIntent::Never);
    assert!(matches!(
        cli.command,
        Some(Commands::Resolve {
            format: OutputFormat::Json,
            check_jars: false,
            ..
        })
    ));
}

#[test]
fn test_validation_rejects_non_http_repository() {
    let mut config = AppConfig {
        repository_url: "file:///tmp/m2".to_string(),
        ..AppConfig::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidRepositoryUrl { .. })
    ));
}

#[test]
fn test_validation_normalizes_repository_url() {
    let mut config = AppConfig {
        repository_url: "https://mirror.example.org/m2//".to_string(),
        ..AppConfig::default()
    };

    config.validate().unwrap();
    assert_eq!(config.repository_url, "https://mirror.example.org/m2/");
}
