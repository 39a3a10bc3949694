//! Env files feed clap's `POMWALK_*` lookup
//!
//! These tests export variables into the process environment, so they live
//! in their own test binary and each one touches a distinct variable.

use clap::Parser;
use pomwalk_lib::application::config::AppConfig;
use pomwalk_lib::application::{Cli, CliConfig};
use pomwalk_lib::primitives::ConfigError;
use tempfile::TempDir;

fn parse_bare_command_line() -> CliConfig {
    let cli = Cli::try_parse_from(["pomwalk"]).unwrap();
    CliConfig::from_cli(cli).unwrap()
}

#[test]
fn test_env_file_variables_reach_the_command_line() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join(".env"),
        "POMWALK_NET_TIMEOUT=7\nPOMWALK_REPOSITORY_URL=https://mirror.example/m2\n",
    )
    .unwrap();

    AppConfig::load_env_files_in(temp_dir.path()).unwrap();
    let config = parse_bare_command_line();

    assert_eq!(config.app_config.net_timeout, 7);
    assert_eq!(config.app_config.repository_url, "https://mirror.example/m2/");
}

#[test]
fn test_env_local_wins_over_env() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join(".env.local"),
        "POMWALK_RETRY_BACKOFF_MS=250\n",
    )
    .unwrap();
    std::fs::write(
        temp_dir.path().join(".env"),
        "POMWALK_RETRY_BACKOFF_MS=900\n",
    )
    .unwrap();

    AppConfig::load_env_files_in(temp_dir.path()).unwrap();
    let config = parse_bare_command_line();

    assert_eq!(config.app_config.retry_backoff_ms, 250);
}

#[test]
fn test_missing_env_files_are_ignored() {
    let temp_dir = TempDir::new().unwrap();
    assert!(AppConfig::load_env_files_in(temp_dir.path()).is_ok());
}

#[test]
fn test_malformed_env_file_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(".env"), "not a valid line\n").unwrap();

    let result = AppConfig::load_env_files_in(temp_dir.path());
    assert!(matches!(
        result,
        Err(ConfigError::EnvFileError { ref file, .. }) if file == ".env"
    ));
}
