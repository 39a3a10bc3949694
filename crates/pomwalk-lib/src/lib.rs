//! # pomwalk Library
//!
//! Transitive dependency resolution for Maven artifacts.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Foundation types and errors
//! - [`maven`] - Coordinates, the POM model, and the parser
//! - [`networking`] - HTTP client, retry policy, and metadata cache
//! - [`api`] - Repository fetchers, the metadata source, and the resolver
//! - [`logger`] - Structured logging with progress integration
//! - [`application`] - CLI interface, configuration, and commands
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use pomwalk_lib::api::{DependencyResolver, MavenRepositoryClient, MetadataSource};
//! use pomwalk_lib::networking::{NetworkingConfig, NetworkingManager};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let networking = Arc::new(NetworkingManager::new(NetworkingConfig::default())?);
//! let source = MetadataSource::new(MavenRepositoryClient::new(networking));
//! let resolver = DependencyResolver::new(Arc::new(source));
//!
//! let mut stream = resolver.resolve("com.google.code.gson:gson:2.8.8");
//! while let Some(item) = stream.next().await {
//!     println!("{}", item?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod logger;
pub mod maven;
pub mod networking;
pub mod primitives;

// Re-export commonly used types for convenience
pub use api::{DependencyResolver, MetadataSource, PomFetcher, ResolutionStream};
pub use application::{AppConfig, Cli, Commands, execute_command};
pub use logger::Logger;
pub use maven::{Coordinate, PomDocument};
pub use networking::{NetworkingConfig, NetworkingManager};
pub use primitives::{
    ColorIntent, ConfigError, LogFormat, LogLevel, LogOutput, LoggerError, ResolutionError,
};

// Private imports for the main function
use anyhow::Result;
use application::CliConfig;

pub async fn main() -> Result<()> {
    // Load CLI configuration
    let config = CliConfig::load()?;

    // Execute the command
    execute_command(config).await
}
