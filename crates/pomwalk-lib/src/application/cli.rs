use crate::primitives::ConfigError;
use clap::{Parser, Subcommand};

use super::config::AppConfig;

/// pomwalk CLI - Maven transitive dependency resolver
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "pomwalk")]
#[command(about = "Resolve the transitive dependencies of a Maven artifact")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// pomwalk commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

impl CliConfig {
    /// Load env files, then parse the command line and layer it over the
    /// environment
    pub fn load() -> Result<Self, ConfigError> {
        AppConfig::load_env_files()?;
        Self::from_cli(Cli::parse())
    }

    /// Layer an already-parsed command line
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        Ok(Self {
            app_config: AppConfig::load_with(cli.config)?,
            command: cli.command,
        })
    }
}

/// Available pomwalk commands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Resolve a coordinate and print every transitive dependency
    Resolve {
        /// Coordinate to resolve
        #[arg(help = "Artifact coordinate: group:artifact:version")]
        coordinate: String,

        /// Annotate each coordinate with whether its jar exists
        #[arg(long, help = "Check the repository for each coordinate's jar")]
        check_jars: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
        format: OutputFormat,
    },

    /// Print the raw POM of a coordinate
    Pom {
        #[arg(help = "Artifact coordinate: group:artifact:version")]
        coordinate: String,
    },

    /// Print the repository URL of a coordinate's POM
    Url {
        #[arg(help = "Artifact coordinate: group:artifact:version")]
        coordinate: String,
    },

    /// Check whether a coordinate's jar exists
    Probe {
        #[arg(help = "Artifact coordinate: group:artifact:version")]
        coordinate: String,
    },

    /// Show version information
    Version,
}

/// Result rendering for `resolve`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One coordinate per line, printed as resolved
    Plain,
    /// A single JSON array once resolution ends
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl Commands {
    /// Whether the command talks to the repository
    pub fn requires_network(&self) -> bool {
        match self {
            Commands::Resolve { .. } => true,
            Commands::Pom { .. } => true,
            Commands::Probe { .. } => true,
            Commands::Url { .. } => false,
            Commands::Version => false,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
