use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, trace};

use super::NetworkingError;
use crate::maven::Coordinate;

/// File name of the persisted raw-document cache inside a cache directory
pub const CACHE_FILE_NAME: &str = "pom_cache.json";

/// Process-lifetime cache keyed by coordinate
///
/// Published POMs never change, so entries have no TTL and are never
/// evicted. Clones share the same underlying map.
pub struct MetadataCache<V> {
    entries: Arc<RwLock<HashMap<Coordinate, V>>>,
}

impl<V> Clone for MetadataCache<V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<V> Default for MetadataCache<V> {
    fn default() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<V: Clone> MetadataCache<V> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached entry
    pub async fn get(&self, coordinate: &Coordinate) -> Option<V> {
        let entries = self.entries.read().await;
        entries.get(coordinate).cloned()
    }

    /// Store an entry, replacing any previous value
    pub async fn put(&self, coordinate: Coordinate, value: V) {
        let mut entries = self.entries.write().await;
        entries.insert(coordinate, value);
    }

    /// Check for an entry without cloning it
    pub async fn contains(&self, coordinate: &Coordinate) -> bool {
        let entries = self.entries.read().await;
        entries.contains_key(coordinate)
    }

    /// Clear all cached entries
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();
    }

    /// Get the number of cached entries
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries.len()
    }

    /// Check if the cache is empty
    pub async fn is_empty(&self) -> bool {
        let entries = self.entries.read().await;
        entries.is_empty()
    }
}

impl MetadataCache<String> {
    /// Merge raw documents persisted in `cache_dir` into memory.
    ///
    /// A missing cache file is not an error. Returns the number of entries
    /// loaded.
    pub async fn load_from_disk(&self, cache_dir: &Path) -> Result<usize, NetworkingError> {
        let cache_file = cache_dir.join(CACHE_FILE_NAME);
        if !tokio::fs::try_exists(&cache_file).await.unwrap_or(false) {
            trace!("No cache file at {}, starting empty", cache_file.display());
            return Ok(0);
        }

        let data = tokio::fs::read_to_string(&cache_file).await.map_err(|e| {
            NetworkingError::CacheError {
                message: format!("Failed to read cache file: {}", e),
            }
        })?;

        let loaded: HashMap<Coordinate, String> =
            serde_json::from_str(&data).map_err(|e| NetworkingError::CacheError {
                message: format!("Failed to parse cache file: {}", e),
            })?;

        let count = loaded.len();
        let mut entries = self.entries.write().await;
        entries.extend(loaded);

        debug!("Loaded {} cached POMs from {}", count, cache_file.display());
        Ok(count)
    }

    /// Write all raw documents to `cache_dir`, creating it if needed
    pub async fn save_to_disk(&self, cache_dir: &Path) -> Result<(), NetworkingError> {
        let entries = self.entries.read().await;

        tokio::fs::create_dir_all(cache_dir)
            .await
            .map_err(|e| NetworkingError::CacheError {
                message: format!("Failed to create cache directory: {}", e),
            })?;

        let cache_file = cache_dir.join(CACHE_FILE_NAME);
        let data = serde_json::to_string(&*entries).map_err(|e| NetworkingError::CacheError {
            message: format!("Failed to serialize cache: {}", e),
        })?;

        tokio::fs::write(&cache_file, data)
            .await
            .map_err(|e| NetworkingError::CacheError {
                message: format!("Failed to write cache file: {}", e),
            })?;

        debug!("Saved {} cached POMs to {}", entries.len(), cache_file.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("cache.test.rs");
}
