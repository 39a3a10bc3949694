//! Remote Maven repository access
//!
//! Provides production (Live) and test (Mock) implementations of the
//! document fetcher. The live client addresses documents by the standard
//! repository layout and retries through [`RetryingClient`].

#[cfg(any(test, feature = "test-utils"))]
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
#[cfg(any(test, feature = "test-utils"))]
use tokio::sync::Mutex;
use tracing::{debug, trace};

use crate::maven::{ArtifactKind, Coordinate, MAVEN_CENTRAL_URL};
use crate::networking::{NetworkingManager, RetryingClient};
use crate::primitives::ResolutionError;

/// Trait for fetching documents from a Maven repository
pub trait PomFetcher {
    /// Fetch the raw POM text for a coordinate
    ///
    /// # Returns
    /// The document body, or `NetworkFailure` once retries are exhausted
    fn fetch_pom(
        &self,
        coordinate: &Coordinate,
    ) -> impl std::future::Future<Output = Result<String, ResolutionError>> + Send;

    /// Best-effort check that the coordinate's binary artifact exists.
    ///
    /// Failures of any kind read as `false`.
    fn artifact_exists(
        &self,
        coordinate: &Coordinate,
    ) -> impl std::future::Future<Output = bool> + Send;
}

/// Normalise a repository base URL to end with a single `/`
pub fn normalize_base_url(base_url: &str) -> String {
    format!("{}/", base_url.trim_end_matches('/'))
}

/// Live repository client (production)
pub struct MavenRepositoryClient {
    networking: Arc<NetworkingManager>,
    retrying: RetryingClient,
    base_url: String,
}

impl MavenRepositoryClient {
    /// Create a client for Maven Central
    pub fn new(networking: Arc<NetworkingManager>) -> Self {
        Self::with_base_url(networking, MAVEN_CENTRAL_URL)
    }

    /// Create a client for a mirror or private repository
    pub fn with_base_url(networking: Arc<NetworkingManager>, base_url: &str) -> Self {
        let retrying = networking.retrying_client();
        Self {
            networking,
            retrying,
            base_url: normalize_base_url(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Repository URL of a coordinate's POM
    pub fn pom_url(&self, coordinate: &Coordinate) -> String {
        coordinate.url(&self.base_url, ArtifactKind::Pom)
    }

    /// Repository URL of a coordinate's jar
    pub fn jar_url(&self, coordinate: &Coordinate) -> String {
        coordinate.url(&self.base_url, ArtifactKind::Jar)
    }
}

impl PomFetcher for MavenRepositoryClient {
    async fn fetch_pom(&self, coordinate: &Coordinate) -> Result<String, ResolutionError> {
        let url = self.pom_url(coordinate);
        trace!("Fetching {}", url);

        self.retrying
            .get_text(&url)
            .await
            .map_err(|e| ResolutionError::NetworkFailure {
                coordinate: coordinate.to_string(),
                detail: e.to_string(),
            })
    }

    async fn artifact_exists(&self, coordinate: &Coordinate) -> bool {
        // Annotation only: a single HEAD, no retry
        let url = self.jar_url(coordinate);
        match self.networking.client().head(&url).send().await {
            Ok(response) => {
                trace!("HEAD {} -> {}", url, response.status());
                response.status().is_success()
            }
            Err(e) => {
                debug!("Artifact probe for {} failed: {}", coordinate, e);
                false
            }
        }
    }
}

/// Mock repository client (testing)
#[cfg(any(test, feature = "test-utils"))]
pub struct MockRepositoryClient {
    documents: Arc<Mutex<HashMap<Coordinate, Result<String, String>>>>,
    jars: Arc<Mutex<HashSet<Coordinate>>>,
    fetch_log: Arc<Mutex<Vec<Coordinate>>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockRepositoryClient {
    /// Create new mock client
    pub fn new() -> Self {
        Self {
            documents: Arc::new(Mutex::new(HashMap::new())),
            jars: Arc::new(Mutex::new(HashSet::new())),
            fetch_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a document served for `coordinate`
    pub async fn with_document(self, coordinate: &str, xml: &str) -> Self {
        if let Ok(key) = Coordinate::parse(coordinate) {
            self.documents.lock().await.insert(key, Ok(xml.to_string()));
        }
        self
    }

    /// Add a fetch failure for `coordinate`
    pub async fn with_failure(self, coordinate: &str, detail: &str) -> Self {
        if let Ok(key) = Coordinate::parse(coordinate) {
            self.documents
                .lock()
                .await
                .insert(key, Err(detail.to_string()));
        }
        self
    }

    /// Mark a coordinate's jar as present
    pub async fn with_jar(self, coordinate: &str) -> Self {
        if let Ok(key) = Coordinate::parse(coordinate) {
            self.jars.lock().await.insert(key);
        }
        self
    }

    /// Number of `fetch_pom` calls so far
    pub async fn fetch_count(&self) -> usize {
        self.fetch_log.lock().await.len()
    }

    /// Coordinates fetched so far, in call order
    pub async fn fetched(&self) -> Vec<Coordinate> {
        self.fetch_log.lock().await.clone()
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl PomFetcher for MockRepositoryClient {
    async fn fetch_pom(&self, coordinate: &Coordinate) -> Result<String, ResolutionError> {
        self.fetch_log.lock().await.push(coordinate.clone());
        let documents = self.documents.lock().await;

        match documents.get(coordinate) {
            Some(Ok(xml)) => Ok(xml.clone()),
            Some(Err(detail)) => Err(ResolutionError::NetworkFailure {
                coordinate: coordinate.to_string(),
                detail: detail.clone(),
            }),
            None => Err(ResolutionError::NetworkFailure {
                coordinate: coordinate.to_string(),
                detail: "HTTP 404 Not Found".to_string(),
            }),
        }
    }

    async fn artifact_exists(&self, coordinate: &Coordinate) -> bool {
        self.jars.lock().await.contains(coordinate)
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl Default for MockRepositoryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    include!("repository.test.rs");
}
