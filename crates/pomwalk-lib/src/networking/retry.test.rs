// Tests for fixed-backoff retry behavior

use super::*;
use mockito::Server;
use reqwest::StatusCode;
use std::io::Write;
use std::time::Instant;

fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_retries: 1,
        backoff: Duration::from_millis(20),
    }
}

#[tokio::test]
async fn test_success_on_first_attempt() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/doc.pom")
        .with_status(200)
        .with_body("<project/>")
        .expect(1)
        .create_async()
        .await;

    let client = RetryingClient::with_policy(Client::new(), fast_policy());
    let response = client
        .get(&format!("{}/doc.pom", server.url()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "<project/>");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_single_retry_after_backoff() {
    let mut server = Server::new_async().await;

    let mock_500 = server
        .mock("GET", "/doc.pom")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let mock_200 = server
        .mock("GET", "/doc.pom")
        .with_status(200)
        .with_body("recovered")
        .expect(1)
        .create_async()
        .await;

    let client = RetryingClient::with_policy(Client::new(), fast_policy());
    let start = Instant::now();
    let response = client
        .get(&format!("{}/doc.pom", server.url()))
        .await
        .unwrap();

    assert_eq!(response.text().await.unwrap(), "recovered");
    assert!(
        start.elapsed() >= Duration::from_millis(20),
        "Backoff delay should have occurred: {:?}",
        start.elapsed()
    );

    mock_500.assert_async().await;
    mock_200.assert_async().await;
}

#[tokio::test]
async fn test_exactly_one_retry_then_failure() {
    let mut server = Server::new_async().await;
    let mock_404 = server
        .mock("GET", "/missing.pom")
        .with_status(404)
        .expect(2) // Initial + 1 retry
        .create_async()
        .await;

    let client = RetryingClient::with_policy(Client::new(), fast_policy());
    let result = client.get(&format!("{}/missing.pom", server.url())).await;

    match result {
        Err(NetworkingError::UnsuccessfulStatus { status, url }) => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert!(url.ends_with("/missing.pom"));
        }
        other => panic!("Expected UnsuccessfulStatus, got: {:?}", other),
    }

    mock_404.assert_async().await;
}

#[tokio::test]
async fn test_zero_retries_fails_immediately() {
    let mut server = Server::new_async().await;
    let mock_503 = server
        .mock("GET", "/flaky.pom")
        .with_status(503)
        .expect(1)
        .create_async()
        .await;

    let policy = RetryPolicy {
        max_retries: 0,
        backoff: Duration::from_secs(10),
    };
    let client = RetryingClient::with_policy(Client::new(), policy);

    let start = Instant::now();
    let result = client.get(&format!("{}/flaky.pom", server.url())).await;

    assert!(result.is_err());
    assert!(start.elapsed() < Duration::from_secs(5), "No backoff without retries");
    mock_503.assert_async().await;
}

#[tokio::test]
async fn test_transport_error_is_retried_then_reported() {
    // Nothing listens on port 9 (discard) in the test environment
    let client = RetryingClient::with_policy(Client::new(), fast_policy());
    let result = client.get("http://127.0.0.1:9/unreachable.pom").await;

    assert!(matches!(result, Err(NetworkingError::RequestFailed { .. })));
}

#[test]
fn test_default_policy() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_retries, 1);
    assert_eq!(policy.backoff, Duration::from_secs(1));
}

#[tokio::test]
async fn test_get_text_retries_body_cut_off_mid_transfer() {
    let mut server = Server::new_async().await;

    let truncated = server
        .mock("GET", "/doc.pom")
        .with_status(200)
        .with_chunked_body(|w| {
            w.write_all(b"<project>")?;
            Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection dropped",
            ))
        })
        .expect(1)
        .create_async()
        .await;

    let complete = server
        .mock("GET", "/doc.pom")
        .with_status(200)
        .with_body("<project></project>")
        .expect(1)
        .create_async()
        .await;

    let client = RetryingClient::with_policy(Client::new(), fast_policy());
    let body = client
        .get_text(&format!("{}/doc.pom", server.url()))
        .await
        .unwrap();

    assert_eq!(body, "<project></project>");
    truncated.assert_async().await;
    complete.assert_async().await;
}

#[tokio::test]
async fn test_get_text_reports_status_after_retry() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/gone.pom")
        .with_status(404)
        .expect(2)
        .create_async()
        .await;

    let client = RetryingClient::with_policy(Client::new(), fast_policy());
    let err = client
        .get_text(&format!("{}/gone.pom", server.url()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        NetworkingError::UnsuccessfulStatus { status, .. } if status == StatusCode::NOT_FOUND
    ));
    mock.assert_async().await;
}
