use super::*;
use crate::primitives::{ColorIntent, ConfigError, LogFormat, LogLevel};
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn test_config_loading_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.log_level, 0);
    assert_eq!(config.net_timeout, 30);
    assert_eq!(config.retry_backoff_ms, 1000);
    assert_eq!(config.repository_url, "https://repo1.maven.org/maven2/");
    assert_eq!(config.color, ColorIntent::Auto);
    assert!(config.cache_dir.is_none());
}

#[test]
fn test_config_merging() {
    let base = AppConfig::default();
    let override_config = AppConfig {
        log_level: 4,
        color: ColorIntent::Always,
        repository_url: "https://mirror.example/maven2".to_string(),
        cache_dir: Some(PathBuf::from("/tmp/pomwalk")),
        ..AppConfig::default()
    };

    let merged = base.merge_with(override_config);
    assert_eq!(merged.log_level, 4);
    assert_eq!(merged.color, ColorIntent::Always);
    assert_eq!(merged.repository_url, "https://mirror.example/maven2");
    assert_eq!(merged.cache_dir, Some(PathBuf::from("/tmp/pomwalk")));
    assert_eq!(merged.net_timeout, 30);
}

#[test]
fn test_merge_keeps_base_when_other_is_default() {
    let base = AppConfig {
        color: ColorIntent::Never,
        log_format: LogFormat::Json,
        ..AppConfig::default()
    };

    let merged = base.merge_with(AppConfig::default());
    assert_eq!(merged.color, ColorIntent::Never);
    assert_eq!(merged.log_format, LogFormat::Json);
}

#[test]
fn test_validate_normalizes_repository_url() {
    let mut config = AppConfig {
        repository_url: "  http://localhost:8080/repo  ".to_string(),
        ..AppConfig::default()
    };

    config.validate().unwrap();
    assert_eq!(config.repository_url, "http://localhost:8080/repo/");
}

#[test]
fn test_validate_rejects_non_http_url() {
    let mut config = AppConfig {
        repository_url: "ftp://repo.example".to_string(),
        ..AppConfig::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidRepositoryUrl { .. })
    ));
}

#[test]
fn test_validate_rejects_zero_timeout() {
    let mut config = AppConfig {
        net_timeout: 0,
        ..AppConfig::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationFailed { .. })
    ));
}

#[test]
fn test_explicit_cache_dir_wins_over_persistent_default() {
    let mut config = AppConfig {
        cache_dir: Some(PathBuf::from("/tmp/explicit")),
        persistent_cache: true,
        ..AppConfig::default()
    };

    config.validate().unwrap();
    assert_eq!(config.cache_dir, Some(PathBuf::from("/tmp/explicit")));
}

#[test]
fn test_networking_config_derivation() {
    let config = AppConfig {
        net_timeout: 5,
        retry_backoff_ms: 250,
        log_level: 4,
        ..AppConfig::default()
    };

    let networking = config.networking_config();
    assert_eq!(networking.timeout_seconds, 5);
    assert_eq!(networking.retry.max_retries, 1);
    assert_eq!(networking.retry.backoff, Duration::from_millis(250));
    assert!(networking.trace_requests);
}

#[test]
fn test_logger_config_derivation() {
    let config = AppConfig {
        log_level: 2,
        color: ColorIntent::Never,
        ..AppConfig::default()
    };

    let logger = config.to_logger_config();
    assert_eq!(logger.level, LogLevel::Info);
    assert!(!logger.color);
}

#[test]
fn test_load_with_applies_cli_layer() {
    let cli = AppConfig {
        net_timeout: 7,
        ..AppConfig::default()
    };

    let config = AppConfig::load_with(cli).unwrap();
    assert_eq!(config.net_timeout, 7);
    assert!(config.repository_url.ends_with('/'));
}
