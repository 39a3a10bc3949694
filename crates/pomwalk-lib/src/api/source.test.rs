use super::*;
use crate::api::repository::MockRepositoryClient;

const LIB_POM: &str = r#"<project>
    <parent>
        <groupId>org.example</groupId>
        <artifactId>parent</artifactId>
        <version>1.0</version>
    </parent>
    <artifactId>lib</artifactId>
</project>"#;

fn lib() -> Coordinate {
    Coordinate::parse("org.example:lib:1.0").unwrap()
}

#[tokio::test]
async fn test_get_document_fetches_and_parses() {
    let fetcher = MockRepositoryClient::new()
        .with_document("org.example:lib:1.0", LIB_POM)
        .await;
    let source = MetadataSource::new(fetcher);

    let document = source.get_document(&lib()).await.unwrap();

    assert_eq!(document.coordinate(), lib());
    assert_eq!(
        document.parent,
        Some(Coordinate::parse("org.example:parent:1.0").unwrap())
    );
    assert_eq!(source.fetcher().fetch_count().await, 1);
}

#[tokio::test]
async fn test_cache_hit_never_calls_fetcher() {
    let fetcher = MockRepositoryClient::new()
        .with_document("org.example:lib:1.0", LIB_POM)
        .await;
    let source = MetadataSource::new(fetcher);

    let first = source.get_document(&lib()).await.unwrap();
    let second = source.get_document(&lib()).await.unwrap();
    let raw = source.fetch_raw_document("org.example:lib:1.0").await.unwrap();

    assert!(Arc::ptr_eq(&first, &second), "Second hit should not re-parse");
    assert_eq!(raw, LIB_POM);
    assert_eq!(source.fetcher().fetch_count().await, 1);
}

#[tokio::test]
async fn test_failed_fetch_is_not_cached() {
    let fetcher = MockRepositoryClient::new()
        .with_failure("org.example:lib:1.0", "HTTP 503 Service Unavailable")
        .await;
    let source = MetadataSource::new(fetcher);

    for _ in 0..2 {
        let err = source.get_document(&lib()).await.unwrap_err();
        assert!(matches!(err, ResolutionError::NetworkFailure { .. }));
    }

    assert_eq!(source.fetcher().fetch_count().await, 2);
    assert!(source.raw_cache().is_empty().await);
}

#[tokio::test]
async fn test_parse_failure_propagates_unchanged() {
    let fetcher = MockRepositoryClient::new()
        .with_document("org.example:lib:1.0", "<project><groupId>")
        .await;
    let source = MetadataSource::new(fetcher);

    let err = source.get_document(&lib()).await.unwrap_err();
    assert!(matches!(err, ResolutionError::ParseFailure { .. }));

    // Raw text stays viewable without another fetch
    let raw = source.fetch_raw_document("org.example:lib:1.0").await.unwrap();
    assert_eq!(raw, "<project><groupId>");
    assert_eq!(source.fetcher().fetch_count().await, 1);
}

#[tokio::test]
async fn test_preloaded_raw_cache_serves_documents() {
    let raw = MetadataCache::new();
    raw.put(lib(), LIB_POM.to_string()).await;

    let source = MetadataSource::with_raw_cache(MockRepositoryClient::new(), raw);
    let document = source.get_document(&lib()).await.unwrap();

    assert_eq!(document.artifact, "lib");
    assert_eq!(source.fetcher().fetch_count().await, 0);
}

#[tokio::test]
async fn test_fetch_raw_document_rejects_malformed_coordinate() {
    let source = MetadataSource::new(MockRepositoryClient::new());

    let err = source.fetch_raw_document("org.example:lib").await.unwrap_err();
    assert!(matches!(err, ResolutionError::InvalidCoordinateFormat { .. }));
    assert_eq!(source.fetcher().fetch_count().await, 0);
}

#[tokio::test]
async fn test_probe_artifact_exists() {
    let fetcher = MockRepositoryClient::new().with_jar("org.example:lib:1.0").await;
    let source = MetadataSource::new(fetcher);

    assert!(source.probe_artifact_exists("org.example:lib:1.0").await);
    assert!(!source.probe_artifact_exists("org.example:other:1.0").await);
    assert!(!source.probe_artifact_exists("not-a-coordinate").await);
}
