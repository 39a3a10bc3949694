use super::*;

#[test]
fn test_networking_manager_creation() {
    let config = NetworkingConfig::default();
    let manager = NetworkingManager::new(config);

    assert!(manager.is_ok(), "Should create networking manager");
    let manager = manager.unwrap();
    assert_eq!(manager.config().timeout_seconds, 30);
}

#[test]
fn test_default_retry_policy_is_single_retry_after_one_second() {
    let config = NetworkingConfig::default();

    assert_eq!(config.retry.max_retries, 1);
    assert_eq!(config.retry.backoff, Duration::from_secs(1));
}

#[tokio::test]
async fn test_retrying_client_inherits_policy() {
    let config = NetworkingConfig {
        retry: RetryPolicy {
            max_retries: 3,
            backoff: Duration::from_millis(5),
        },
        ..Default::default()
    };
    let manager = NetworkingManager::new(config).unwrap();

    let client = manager.retrying_client();
    assert_eq!(client.policy().max_retries, 3);
    assert_eq!(client.policy().backoff, Duration::from_millis(5));
}

#[test]
fn test_status_error_display() {
    let error = NetworkingError::UnsuccessfulStatus {
        url: "http://localhost/a.pom".to_string(),
        status: StatusCode::NOT_FOUND,
    };
    assert_eq!(error.to_string(), "HTTP 404 Not Found for http://localhost/a.pom");
}
