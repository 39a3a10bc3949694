use super::*;
use crate::networking::{NetworkingConfig, RetryPolicy};
use mockito::Server;
use std::io::Write;
use std::time::Duration;

fn fast_networking() -> Arc<NetworkingManager> {
    let config = NetworkingConfig {
        timeout_seconds: 5,
        retry: RetryPolicy {
            max_retries: 1,
            backoff: Duration::from_millis(10),
        },
        trace_requests: true,
    };
    Arc::new(NetworkingManager::new(config).unwrap())
}

fn gson() -> Coordinate {
    Coordinate::parse("com.google.code.gson:gson:2.8.8").unwrap()
}

#[test]
fn test_normalize_base_url() {
    assert_eq!(normalize_base_url("http://repo"), "http://repo/");
    assert_eq!(normalize_base_url("http://repo/"), "http://repo/");
    assert_eq!(normalize_base_url("http://repo//"), "http://repo/");
}

#[test]
fn test_default_base_url_is_central() {
    let client = MavenRepositoryClient::new(fast_networking());
    assert_eq!(client.base_url(), "https://repo1.maven.org/maven2/");
    assert_eq!(
        client.pom_url(&gson()),
        "https://repo1.maven.org/maven2/com/google/code/gson/gson/2.8.8/gson-2.8.8.pom"
    );
    assert_eq!(
        client.jar_url(&gson()),
        "https://repo1.maven.org/maven2/com/google/code/gson/gson/2.8.8/gson-2.8.8.jar"
    );
}

#[tokio::test]
async fn test_fetch_pom_uses_repository_layout() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/com/google/code/gson/gson/2.8.8/gson-2.8.8.pom")
        .with_status(200)
        .with_body("<project/>")
        .expect(1)
        .create_async()
        .await;

    let client = MavenRepositoryClient::with_base_url(fast_networking(), &server.url());
    let body = client.fetch_pom(&gson()).await.unwrap();

    assert_eq!(body, "<project/>");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_pom_retries_once_then_succeeds() {
    let mut server = Server::new_async().await;
    let path = "/com/google/code/gson/gson/2.8.8/gson-2.8.8.pom";
    let failing = server
        .mock("GET", path)
        .with_status(502)
        .expect(1)
        .create_async()
        .await;
    let succeeding = server
        .mock("GET", path)
        .with_status(200)
        .with_body("<project/>")
        .expect(1)
        .create_async()
        .await;

    let client = MavenRepositoryClient::with_base_url(fast_networking(), &server.url());
    assert_eq!(client.fetch_pom(&gson()).await.unwrap(), "<project/>");

    failing.assert_async().await;
    succeeding.assert_async().await;
}

#[tokio::test]
async fn test_fetch_pom_retries_truncated_body() {
    let mut server = Server::new_async().await;
    let path = "/com/google/code/gson/gson/2.8.8/gson-2.8.8.pom";
    let truncated = server
        .mock("GET", path)
        .with_status(200)
        .with_chunked_body(|w| {
            w.write_all(b"<proj")?;
            Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionAborted,
                "body cut off",
            ))
        })
        .expect(1)
        .create_async()
        .await;
    let complete = server
        .mock("GET", path)
        .with_status(200)
        .with_body("<project/>")
        .expect(1)
        .create_async()
        .await;

    let client = MavenRepositoryClient::with_base_url(fast_networking(), &server.url());
    assert_eq!(client.fetch_pom(&gson()).await.unwrap(), "<project/>");

    truncated.assert_async().await;
    complete.assert_async().await;
}

#[tokio::test]
async fn test_fetch_pom_failure_is_network_failure() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/com/google/code/gson/gson/2.8.8/gson-2.8.8.pom")
        .with_status(404)
        .expect(2)
        .create_async()
        .await;

    let client = MavenRepositoryClient::with_base_url(fast_networking(), &server.url());
    let err = client.fetch_pom(&gson()).await.unwrap_err();

    match err {
        ResolutionError::NetworkFailure { coordinate, detail } => {
            assert_eq!(coordinate, "com.google.code.gson:gson:2.8.8");
            assert!(detail.contains("404"), "detail was: {}", detail);
        }
        other => panic!("Expected NetworkFailure, got: {:?}", other),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_artifact_exists_uses_head_on_jar() {
    let mut server = Server::new_async().await;
    let present = server
        .mock("HEAD", "/com/google/code/gson/gson/2.8.8/gson-2.8.8.jar")
        .with_status(200)
        .expect(1)
        .create_async()
        .await;
    let absent = server
        .mock("HEAD", "/org/example/pom-only/1.0/pom-only-1.0.jar")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;

    let client = MavenRepositoryClient::with_base_url(fast_networking(), &server.url());

    assert!(client.artifact_exists(&gson()).await);
    assert!(
        !client
            .artifact_exists(&Coordinate::parse("org.example:pom-only:1.0").unwrap())
            .await
    );

    present.assert_async().await;
    absent.assert_async().await;
}

#[tokio::test]
async fn test_artifact_probe_swallows_transport_errors() {
    let client = MavenRepositoryClient::with_base_url(fast_networking(), "http://127.0.0.1:9");
    assert!(!client.artifact_exists(&gson()).await);
}

#[tokio::test]
async fn test_mock_client_serves_and_counts() {
    let client = MockRepositoryClient::new()
        .with_document("a:b:1", "<project/>")
        .await
        .with_failure("c:d:1", "boom")
        .await
        .with_jar("a:b:1")
        .await;

    let a = Coordinate::parse("a:b:1").unwrap();
    let c = Coordinate::parse("c:d:1").unwrap();
    let missing = Coordinate::parse("x:y:1").unwrap();

    assert_eq!(client.fetch_pom(&a).await.unwrap(), "<project/>");
    assert!(matches!(
        client.fetch_pom(&c).await,
        Err(ResolutionError::NetworkFailure { detail, .. }) if detail == "boom"
    ));
    assert!(client.fetch_pom(&missing).await.is_err());

    assert_eq!(client.fetch_count().await, 3);
    assert_eq!(client.fetched().await, vec![a.clone(), c.clone(), missing]);
    assert!(client.artifact_exists(&a).await);
    assert!(!client.artifact_exists(&c).await);
}
