use super::*;
use tempfile::TempDir;

fn coordinate(s: &str) -> Coordinate {
    Coordinate::parse(s).unwrap()
}

#[tokio::test]
async fn test_cache_creation() {
    let cache: MetadataCache<String> = MetadataCache::new();
    assert!(cache.is_empty().await);
    assert_eq!(cache.len().await, 0);
}

#[tokio::test]
async fn test_cache_hit() {
    let cache = MetadataCache::new();
    let key = coordinate("a:b:1");

    cache.put(key.clone(), "<project/>".to_string()).await;

    assert!(cache.contains(&key).await);
    assert_eq!(cache.get(&key).await.as_deref(), Some("<project/>"));
}

#[tokio::test]
async fn test_cache_miss() {
    let cache: MetadataCache<String> = MetadataCache::new();
    let key = coordinate("a:b:1");

    assert!(!cache.contains(&key).await);
    assert!(cache.get(&key).await.is_none());
}

#[tokio::test]
async fn test_cache_put_replaces() {
    let cache = MetadataCache::new();
    let key = coordinate("a:b:1");

    cache.put(key.clone(), 1u32).await;
    cache.put(key.clone(), 2u32).await;

    assert_eq!(cache.len().await, 1);
    assert_eq!(cache.get(&key).await, Some(2));
}

#[tokio::test]
async fn test_cache_clear() {
    let cache = MetadataCache::new();
    cache.put(coordinate("a:b:1"), 1u8).await;
    cache.put(coordinate("a:b:2"), 2u8).await;
    assert_eq!(cache.len().await, 2);

    cache.clear().await;
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn test_clones_share_entries() {
    let cache = MetadataCache::new();
    let other = cache.clone();

    other.put(coordinate("a:b:1"), "shared".to_string()).await;
    assert_eq!(cache.get(&coordinate("a:b:1")).await.as_deref(), Some("shared"));
}

#[tokio::test]
async fn test_concurrent_writers() {
    let cache: MetadataCache<usize> = MetadataCache::new();

    let mut handles = Vec::new();
    for i in 0..32 {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            cache.put(coordinate(&format!("g:a:{}", i)), i).await;
            cache.get(&coordinate(&format!("g:a:{}", i))).await
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.await.unwrap(), Some(i));
    }
    assert_eq!(cache.len().await, 32);
}

#[tokio::test]
async fn test_disk_round_trip() {
    let temp_dir = TempDir::new().unwrap();

    let cache = MetadataCache::new();
    cache
        .put(coordinate("org.example:lib:1.0"), "<project>lib</project>".to_string())
        .await;
    cache.save_to_disk(temp_dir.path()).await.unwrap();
    assert!(temp_dir.path().join(CACHE_FILE_NAME).exists());

    let restored: MetadataCache<String> = MetadataCache::new();
    let loaded = restored.load_from_disk(temp_dir.path()).await.unwrap();

    assert_eq!(loaded, 1);
    assert_eq!(
        restored.get(&coordinate("org.example:lib:1.0")).await.as_deref(),
        Some("<project>lib</project>")
    );
}

#[tokio::test]
async fn test_load_missing_file_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let cache: MetadataCache<String> = MetadataCache::new();

    let loaded = cache.load_from_disk(temp_dir.path()).await.unwrap();
    assert_eq!(loaded, 0);
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn test_load_corrupt_file_is_cache_error() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(CACHE_FILE_NAME), "not json").unwrap();

    let cache: MetadataCache<String> = MetadataCache::new();
    let result = cache.load_from_disk(temp_dir.path()).await;

    assert!(matches!(result, Err(NetworkingError::CacheError { .. })));
}

#[tokio::test]
async fn test_save_creates_nested_directory() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("deep").join("cache");

    let cache = MetadataCache::new();
    cache.put(coordinate("a:b:1"), "x".to_string()).await;
    cache.save_to_disk(&nested).await.unwrap();

    assert!(nested.join(CACHE_FILE_NAME).exists());
}
