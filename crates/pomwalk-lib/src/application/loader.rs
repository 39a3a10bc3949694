//! Configuration loading
//!
//! Coordinates loading configuration from the layered sources.

use crate::primitives::ConfigError;
use std::path::Path;

use super::{config::AppConfig, env::EnvironmentConfig};

/// Environment files read before the process environment, first wins
const ENV_FILES: [&str; 2] = [".env.local", ".env"];

impl AppConfig {
    /// Export `.env.local` and `.env` from the working directory into the
    /// process environment. Must run before the command line is parsed so
    /// clap sees the `POMWALK_*` variables they define.
    pub fn load_env_files() -> Result<(), ConfigError> {
        Self::load_env_files_in(Path::new("."))
    }

    /// [`load_env_files`](Self::load_env_files) rooted at `dir`
    ///
    /// Variables already set in the environment are never overwritten.
    pub fn load_env_files_in(dir: &Path) -> Result<(), ConfigError> {
        for env_file in ENV_FILES {
            if let Err(e) = dotenvy::from_path(dir.join(env_file)) {
                if !e.not_found() {
                    return Err(ConfigError::EnvFileError {
                        file: env_file.to_string(),
                        source: e,
                    });
                }
            }
        }
        Ok(())
    }

    /// Layer config: defaults -> standard env vars -> `cli`
    ///
    /// `cli` is the parsed command line, which already carries the
    /// `POMWALK_*` variables (including those from env files) through clap.
    pub fn load_with(cli: AppConfig) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let env_config = EnvironmentConfig::load()?;
        config.color = env_config.apply_color_config(config.color);

        config = config.merge_with(cli);
        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
