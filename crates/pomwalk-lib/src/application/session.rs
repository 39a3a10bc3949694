//! Command session
//!
//! Each command execution creates a session that owns its ephemeral state:
//! the layered config, the resolver with its document caches, and the
//! terminal presentation choices.

use crate::api::{DependencyResolver, MavenRepositoryClient, MetadataSource, PomFetcher};
use crate::application::config::AppConfig;
use crate::networking::NetworkingManager;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Session state shared by the command handlers
pub struct CommandSession<F> {
    config: AppConfig,
    resolver: DependencyResolver<F>,
    progress: bool,
    color: bool,
}

impl CommandSession<MavenRepositoryClient> {
    /// Session against the configured remote repository
    pub fn live(config: AppConfig) -> Result<Self> {
        let networking = NetworkingManager::new(config.networking_config())
            .context("Failed to build HTTP client")?;
        let client = MavenRepositoryClient::with_base_url(Arc::new(networking), &config.repository_url);

        let attended = console::Term::stderr().is_term();
        let color = config.color.enabled();

        Ok(Self::new(config, client)
            .with_progress(attended)
            .with_color(color))
    }
}

impl<F> CommandSession<F>
where
    F: PomFetcher + Send + Sync + 'static,
{
    /// Session over any fetcher, without spinner or color
    pub fn new(config: AppConfig, fetcher: F) -> Self {
        let source = Arc::new(MetadataSource::new(fetcher));
        Self {
            config,
            resolver: DependencyResolver::new(source),
            progress: false,
            color: false,
        }
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn resolver(&self) -> &DependencyResolver<F> {
        &self.resolver
    }

    pub fn source(&self) -> &MetadataSource<F> {
        self.resolver.source()
    }

    pub fn color(&self) -> bool {
        self.color
    }

    /// Spinner on stderr, hidden when the terminal is unattended
    pub fn spinner(&self, message: &str) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.green} {msg}")
            .map(|style| style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]))
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Load persisted raw documents, if a cache directory is configured.
    ///
    /// An unreadable cache is logged and ignored.
    pub async fn load_cache(&self) -> usize {
        let Some(dir) = &self.config.cache_dir else {
            return 0;
        };

        match self.source().raw_cache().load_from_disk(dir).await {
            Ok(count) => {
                debug!("Loaded {} POMs from {}", count, dir.display());
                count
            }
            Err(e) => {
                warn!("Ignoring POM cache in {}: {}", dir.display(), e);
                0
            }
        }
    }

    /// Persist raw documents, if a cache directory is configured
    pub async fn save_cache(&self) {
        let Some(dir) = &self.config.cache_dir else {
            return;
        };

        if let Err(e) = self.source().raw_cache().save_to_disk(dir).await {
            warn!("Failed to save POM cache to {}: {}", dir.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    include!("session.test.rs");
}
