//! Cache-or-fetch access to parsed documents

use std::sync::Arc;
use tracing::{debug, trace};

use super::repository::PomFetcher;
use crate::maven::{Coordinate, PomDocument, PomParser};
use crate::networking::MetadataCache;
use crate::primitives::ResolutionError;

/// Composes a fetcher, the parser, and two caches.
///
/// Raw text is cached on every successful fetch; parsed documents are
/// cached only once parsing succeeds. A hit in either cache never reaches
/// the fetcher.
pub struct MetadataSource<F> {
    fetcher: F,
    parser: PomParser,
    raw: MetadataCache<String>,
    documents: MetadataCache<Arc<PomDocument>>,
}

impl<F: PomFetcher> MetadataSource<F> {
    pub fn new(fetcher: F) -> Self {
        Self::with_raw_cache(fetcher, MetadataCache::new())
    }

    /// Share an existing raw-text cache, e.g. one loaded from disk
    pub fn with_raw_cache(fetcher: F, raw: MetadataCache<String>) -> Self {
        Self {
            fetcher,
            parser: PomParser::new(),
            raw,
            documents: MetadataCache::new(),
        }
    }

    /// Parsed document for a coordinate (group and version already inherited)
    pub async fn get_document(
        &self,
        coordinate: &Coordinate,
    ) -> Result<Arc<PomDocument>, ResolutionError> {
        if let Some(document) = self.documents.get(coordinate).await {
            trace!("Document cache hit: {}", coordinate);
            return Ok(document);
        }

        let raw = self.raw_document(coordinate).await?;
        let document = Arc::new(self.parser.parse(&raw)?);
        self.documents
            .put(coordinate.clone(), Arc::clone(&document))
            .await;

        Ok(document)
    }

    /// Raw document text for display, validating the coordinate first
    pub async fn fetch_raw_document(&self, coordinate: &str) -> Result<String, ResolutionError> {
        let coordinate = Coordinate::parse(coordinate)?;
        self.raw_document(&coordinate).await
    }

    /// Whether the coordinate's binary artifact exists.
    ///
    /// Malformed coordinates and network failures read as `false`.
    pub async fn probe_artifact_exists(&self, coordinate: &str) -> bool {
        match Coordinate::parse(coordinate) {
            Ok(coordinate) => self.fetcher.artifact_exists(&coordinate).await,
            Err(e) => {
                debug!("Skipping artifact probe: {}", e);
                false
            }
        }
    }

    async fn raw_document(&self, coordinate: &Coordinate) -> Result<String, ResolutionError> {
        if let Some(raw) = self.raw.get(coordinate).await {
            trace!("Raw cache hit: {}", coordinate);
            return Ok(raw);
        }

        debug!("Cache miss, fetching {}", coordinate);
        let raw = self.fetcher.fetch_pom(coordinate).await?;
        self.raw.put(coordinate.clone(), raw.clone()).await;
        Ok(raw)
    }

    /// Raw-text cache, for persistence
    pub fn raw_cache(&self) -> &MetadataCache<String> {
        &self.raw
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }
}

#[cfg(test)]
mod tests {
    include!("source.test.rs");
}
