//! Hermetic test environment for E2E testing
//!
//! [`TestEnvironment`] pairs a local mockito server laid out like a Maven
//! repository with a scratch directory for the on-disk cache, so live
//! sessions run end to end without touching the network.

use anyhow::Result;
use mockito::{Mock, ServerGuard};
use pomwalk_lib::api::MavenRepositoryClient;
use pomwalk_lib::application::{AppConfig, CommandSession, Commands, execute_command_with_session};
use pomwalk_lib::maven::{ArtifactKind, Coordinate};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Local repository server plus scratch space
pub struct TestEnvironment {
    server: ServerGuard,
    // Mocks are removed from the server when dropped
    mocks: Vec<Mock>,
    /// Owns the scratch directory for the lifetime of the environment
    pub temp_dir: TempDir,
    /// Cache directory handed to sessions built with a disk cache
    pub cache_path: PathBuf,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let server = mockito::Server::new_async().await;
        let temp_dir = TempDir::new()?;
        let cache_path = temp_dir.path().join("cache");

        Ok(Self {
            server,
            mocks: Vec::new(),
            temp_dir,
            cache_path,
        })
    }

    /// Repository base URL
    pub fn url(&self) -> String {
        self.server.url()
    }

    /// Serve `xml` as the POM of `coordinate`, expecting exactly `hits` requests
    pub async fn serve_pom(&mut self, coordinate: &str, xml: &str, hits: usize) {
        let path = mock_path(coordinate, ArtifactKind::Pom);
        let mock = self
            .server
            .mock("GET", path.as_str())
            .with_status(200)
            .with_header("content-type", "application/xml")
            .with_body(xml)
            .expect(hits)
            .create_async()
            .await;
        self.mocks.push(mock);
    }

    /// Answer `hits` POM requests for `coordinate` with `status`
    pub async fn fail_pom(&mut self, coordinate: &str, status: usize, hits: usize) {
        let path = mock_path(coordinate, ArtifactKind::Pom);
        let mock = self
            .server
            .mock("GET", path.as_str())
            .with_status(status)
            .expect(hits)
            .create_async()
            .await;
        self.mocks.push(mock);
    }

    /// Answer HEAD requests for the jar of `coordinate` with 200
    pub async fn serve_jar(&mut self, coordinate: &str) {
        let path = mock_path(coordinate, ArtifactKind::Jar);
        let mock = self
            .server
            .mock("HEAD", path.as_str())
            .with_status(200)
            .expect_at_least(1)
            .create_async()
            .await;
        self.mocks.push(mock);
    }

    /// Assert every registered expectation
    pub async fn assert_all(&self) {
        for mock in &self.mocks {
            mock.assert_async().await;
        }
    }

    /// Session builder pointed at this environment's server
    pub fn session(&self) -> HermeticSessionBuilder {
        HermeticSessionBuilder::new(&self.url())
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }
}

/// Builds live sessions with fast retries and no terminal decoration
pub struct HermeticSessionBuilder {
    config: AppConfig,
}

impl HermeticSessionBuilder {
    fn new(repository_url: &str) -> Self {
        let mut config = AppConfig {
            repository_url: repository_url.to_string(),
            net_timeout: 5,
            retry_backoff_ms: 10,
            ..AppConfig::default()
        };
        // Mock server URLs have no trailing slash
        if !config.repository_url.ends_with('/') {
            config.repository_url.push('/');
        }
        Self { config }
    }

    pub fn with_cache_dir(mut self, dir: &Path) -> Self {
        self.config.cache_dir = Some(dir.to_path_buf());
        self
    }

    pub fn build(self) -> Result<CommandSession<MavenRepositoryClient>> {
        let session = CommandSession::live(self.config)?;
        Ok(session.with_progress(false).with_color(false))
    }
}

/// Captured result of one command run
pub struct CommandRun {
    pub result: Result<()>,
    pub stdout: String,
}

/// Run `command` against `session`, capturing what it writes
pub async fn run_command(
    command: Commands,
    session: &CommandSession<MavenRepositoryClient>,
) -> CommandRun {
    let mut out: Vec<u8> = Vec::new();
    let result = execute_command_with_session(command, session, &mut out).await;
    CommandRun {
        result,
        stdout: String::from_utf8_lossy(&out).into_owned(),
    }
}

fn mock_path(coordinate: &str, kind: ArtifactKind) -> String {
    match Coordinate::parse(coordinate) {
        Ok(parsed) => format!("/{}", parsed.repository_path(kind)),
        Err(_) => panic!("fixture coordinate must be well formed: {coordinate}"),
    }
}
