use super::*;
use crate::api::MockRepositoryClient;
use crate::maven::Coordinate;
use tempfile::TempDir;

#[tokio::test]
async fn test_cache_round_trip_through_session() {
    let temp_dir = TempDir::new().unwrap();
    let config = AppConfig {
        cache_dir: Some(temp_dir.path().to_path_buf()),
        ..AppConfig::default()
    };

    let fetcher = MockRepositoryClient::new()
        .with_document("a:b:1", "<project/>")
        .await;
    let session = CommandSession::new(config.clone(), fetcher);
    assert_eq!(session.load_cache().await, 0);

    session.source().fetch_raw_document("a:b:1").await.unwrap();
    session.save_cache().await;

    let restored = CommandSession::new(config, MockRepositoryClient::new());
    assert_eq!(restored.load_cache().await, 1);
    assert_eq!(
        restored.source().fetch_raw_document("a:b:1").await.unwrap(),
        "<project/>"
    );
    assert_eq!(restored.source().fetcher().fetch_count().await, 0);
}

#[tokio::test]
async fn test_corrupt_cache_is_ignored() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join(crate::networking::cache::CACHE_FILE_NAME),
        "{not json",
    )
    .unwrap();

    let config = AppConfig {
        cache_dir: Some(temp_dir.path().to_path_buf()),
        ..AppConfig::default()
    };
    let session = CommandSession::new(config, MockRepositoryClient::new());

    assert_eq!(session.load_cache().await, 0);
    assert!(session.source().raw_cache().is_empty().await);
}

#[tokio::test]
async fn test_no_cache_dir_is_memory_only() {
    let session = CommandSession::new(AppConfig::default(), MockRepositoryClient::new());
    session
        .source()
        .raw_cache()
        .put(Coordinate::parse("a:b:1").unwrap(), "x".to_string())
        .await;

    assert_eq!(session.load_cache().await, 0);
    session.save_cache().await;
}

#[test]
fn test_hidden_spinner_when_unattended() {
    let session = CommandSession::new(AppConfig::default(), MockRepositoryClient::new());
    assert!(session.spinner("Resolving").is_hidden());
    assert!(!session.color());
}

#[test]
fn test_live_session_builds() {
    let session = CommandSession::live(AppConfig::default()).unwrap();
    assert_eq!(
        session.source().fetcher().base_url(),
        "https://repo1.maven.org/maven2/"
    );
}
