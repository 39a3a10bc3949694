use super::*;

#[test]
fn test_log_context_creation() {
    let context = LogContext::new("resolve");
    assert_eq!(context.operation, "resolve");
    assert_eq!(context.current_item, None);
}

#[test]
fn test_log_context_tracks_progress() {
    let mut context = LogContext::new("resolve");
    context.set_progress(4);
    assert_eq!(context.current_item, Some(4));
}

#[test]
fn test_default_filter_scopes_own_crates() {
    let filter = default_filter(LogLevel::Debug);

    assert!(filter.starts_with("pomwalk=debug,pomwalk_lib=debug,"));
    assert!(filter.contains("reqwest=warn"));
    assert!(filter.contains("hyper_util=warn"));
    assert!(filter.ends_with(",debug"));
}

#[test]
fn test_default_filter_parses() {
    for level in [LogLevel::Error, LogLevel::Warning, LogLevel::Trace] {
        assert!(EnvFilter::try_new(default_filter(level)).is_ok());
    }
}

#[test]
fn test_log_without_subscriber_is_noop() {
    // No global subscriber in unit tests; must not panic
    Logger::log(LogLevel::Info, "hello", None);
    Logger::log(LogLevel::Error, "with context", Some(&LogContext::new("resolve")));
}

#[test]
fn test_logger_global_consistency() {
    assert_eq!(Logger::is_initialized(), Logger::global().is_some());
}
