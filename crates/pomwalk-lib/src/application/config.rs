//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::api::repository::normalize_base_url;
use crate::maven::MAVEN_CENTRAL_URL;
use crate::networking::{NetworkingConfig, RetryPolicy};
use crate::primitives::*;
use clap::Parser;
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default configuration values
pub mod defaults {
    pub const LOG_LEVEL: &str = "0"; // Error-only logging by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR: &str = "auto";
    pub const NET_TIMEOUT: &str = "30";
    pub const RETRY_BACKOFF_MS: &str = "1000";
    pub const REPOSITORY_URL: &str = crate::maven::MAVEN_CENTRAL_URL;
}

/// Default value functions for configuration fields
mod default_fns {
    use super::*;

    pub fn repository_url() -> String {
        MAVEN_CENTRAL_URL.to_string()
    }

    // Constant parses below cannot fail
    pub fn log_level() -> u8 {
        defaults::LOG_LEVEL.parse().unwrap_or(0)
    }

    pub fn log_format() -> LogFormat {
        defaults::LOG_FORMAT.parse().unwrap_or(LogFormat::Text)
    }

    pub fn log_output() -> LogOutput {
        defaults::LOG_OUTPUT.parse().unwrap_or(LogOutput::Stderr)
    }

    pub fn color() -> ColorIntent {
        defaults::COLOR.parse().unwrap_or(ColorIntent::Auto)
    }

    pub fn net_timeout() -> u64 {
        defaults::NET_TIMEOUT.parse().unwrap_or(30)
    }

    pub fn retry_backoff_ms() -> u64 {
        defaults::RETRY_BACKOFF_MS.parse().unwrap_or(1000)
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Base URL of the Maven repository
    #[arg(short, long, env = "POMWALK_REPOSITORY_URL", default_value = defaults::REPOSITORY_URL)]
    #[serde(default = "default_fns::repository_url")]
    pub repository_url: String,

    /// HTTP timeout in seconds
    #[arg(short, long, env = "POMWALK_NET_TIMEOUT", default_value = defaults::NET_TIMEOUT)]
    #[serde(default = "default_fns::net_timeout")]
    pub net_timeout: u64,

    /// Wait before the single retry of a failed fetch, in milliseconds
    #[arg(long, env = "POMWALK_RETRY_BACKOFF_MS", default_value = defaults::RETRY_BACKOFF_MS)]
    #[serde(default = "default_fns::retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Directory for the on-disk POM cache
    #[arg(long, env = "POMWALK_CACHE_DIR")]
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// Persist the POM cache in the platform cache directory
    #[arg(long, env = "POMWALK_PERSISTENT_CACHE")]
    #[serde(default)]
    pub persistent_cache: bool,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, env = "POMWALK_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Log format (text, json, yaml)
    #[arg(long, env = "POMWALK_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, env = "POMWALK_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(short, long, env = "POMWALK_COLOR", default_value = defaults::COLOR)]
    #[serde(default = "default_fns::color")]
    pub color: ColorIntent,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            repository_url: default_fns::repository_url(),
            net_timeout: default_fns::net_timeout(),
            retry_backoff_ms: default_fns::retry_backoff_ms(),
            cache_dir: None,
            persistent_cache: false,
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color(),
        }
    }
}

impl AppConfig {
    /// Create LoggerConfig from AppConfig
    pub fn to_logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            color: self.color.enabled(),
        }
    }

    /// HTTP client settings: timeout and the single fixed-backoff retry
    pub fn networking_config(&self) -> NetworkingConfig {
        NetworkingConfig {
            timeout_seconds: self.net_timeout,
            retry: RetryPolicy {
                max_retries: 1,
                backoff: Duration::from_millis(self.retry_backoff_ms),
            },
            trace_requests: LogLevel::from_verbosity(self.log_level) == LogLevel::Trace,
        }
    }

    /// Merge this config with another, taking non-default values from other
    pub fn merge_with(mut self, other: Self) -> Self {
        // For Option fields, take other if it's Some
        if other.cache_dir.is_some() {
            self.cache_dir = other.cache_dir;
        }

        // For primitive fields, take other if it's not the default
        if other.repository_url != default_fns::repository_url() {
            self.repository_url = other.repository_url;
        }
        if other.net_timeout != default_fns::net_timeout() {
            self.net_timeout = other.net_timeout;
        }
        if other.retry_backoff_ms != default_fns::retry_backoff_ms() {
            self.retry_backoff_ms = other.retry_backoff_ms;
        }
        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }
        if other.persistent_cache {
            self.persistent_cache = true;
        }

        // For enums, detect if it's non-default
        if !matches!(other.log_format, LogFormat::Text) {
            self.log_format = other.log_format;
        }
        if !matches!(other.log_output, LogOutput::Stderr) {
            self.log_output = other.log_output;
        }
        if !matches!(other.color, ColorIntent::Auto) {
            self.color = other.color;
        }

        self
    }

    /// Validate the final configuration
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        let url = self.repository_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidRepositoryUrl {
                url: self.repository_url.clone(),
            });
        }
        self.repository_url = normalize_base_url(url);

        if self.net_timeout == 0 {
            return Err(ConfigError::ValidationFailed {
                reason: "net_timeout must be at least 1 second".to_string(),
            });
        }

        if self.persistent_cache && self.cache_dir.is_none() {
            let dirs = ProjectDirs::from("design", "inherent", "pomwalk").ok_or_else(|| {
                ConfigError::ValidationFailed {
                    reason: "no home directory for the persistent cache; set --cache-dir"
                        .to_string(),
                }
            })?;
            self.cache_dir = Some(dirs.cache_dir().to_path_buf());
        }

        Ok(())
    }
}
