use super::*;
use crate::api::MockRepositoryClient;
use crate::application::AppConfig;

const ROOT_POM: &str = r#"<project>
    <groupId>org.example</groupId>
    <artifactId>app</artifactId>
    <version>1.0</version>
    <dependencies>
        <dependency>
            <groupId>org.example</groupId>
            <artifactId>lib</artifactId>
            <version>2.0</version>
        </dependency>
        <dependency>
            <groupId>org.example</groupId>
            <artifactId>broken</artifactId>
            <version>3.0</version>
            <scope>test</scope>
        </dependency>
    </dependencies>
</project>"#;

const LIB_POM: &str = r#"<project>
    <groupId>org.example</groupId>
    <artifactId>lib</artifactId>
    <version>2.0</version>
</project>"#;

async fn session() -> CommandSession<MockRepositoryClient> {
    let fetcher = MockRepositoryClient::new()
        .with_document("org.example:app:1.0", ROOT_POM)
        .await
        .with_document("org.example:lib:2.0", LIB_POM)
        .await
        .with_jar("org.example:lib:2.0")
        .await;
    CommandSession::new(AppConfig::default(), fetcher)
}

async fn run(command: Commands, session: &CommandSession<MockRepositoryClient>) -> (Result<()>, String) {
    let mut out: Vec<u8> = Vec::new();
    let result = execute_command_with_session(command, session, &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_resolve_plain_output() {
    let session = session().await;
    let (result, output) = run(
        Commands::Resolve {
            coordinate: "org.example:app:1.0".to_string(),
            check_jars: false,
            format: OutputFormat::Plain,
        },
        &session,
    )
    .await;

    result.unwrap();
    assert_eq!(output, "org.example:app:1.0\norg.example:lib:2.0\n");
}

#[tokio::test]
async fn test_resolve_with_jar_annotations() {
    let session = session().await;
    let (result, output) = run(
        Commands::Resolve {
            coordinate: "org.example:app:1.0".to_string(),
            check_jars: true,
            format: OutputFormat::Plain,
        },
        &session,
    )
    .await;

    result.unwrap();
    assert_eq!(
        output,
        "org.example:app:1.0 [no jar]\norg.example:lib:2.0 [jar]\n"
    );
}

#[tokio::test]
async fn test_resolve_json_output() {
    let session = session().await;
    let (result, output) = run(
        Commands::Resolve {
            coordinate: "org.example:app:1.0".to_string(),
            check_jars: true,
            format: OutputFormat::Json,
        },
        &session,
    )
    .await;

    result.unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!([
            { "coordinate": "org.example:app:1.0", "jar": false },
            { "coordinate": "org.example:lib:2.0", "jar": true }
        ])
    );
}

#[tokio::test]
async fn test_resolve_rejects_malformed_coordinate_before_fetching() {
    let session = session().await;
    let (result, output) = run(
        Commands::Resolve {
            coordinate: "org.example:app".to_string(),
            check_jars: false,
            format: OutputFormat::Plain,
        },
        &session,
    )
    .await;

    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ResolutionError>(),
        Some(ResolutionError::InvalidCoordinateFormat { .. })
    ));
    assert!(output.is_empty());
    assert_eq!(session.source().fetcher().fetch_count().await, 0);
}

#[tokio::test]
async fn test_resolve_rejects_unresolvable_characters() {
    let session = session().await;
    let (result, _) = run(
        Commands::Resolve {
            coordinate: "org.example:app:${version}".to_string(),
            check_jars: false,
            format: OutputFormat::Plain,
        },
        &session,
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_resolve_failure_keeps_printed_output() {
    let fetcher = MockRepositoryClient::new()
        .with_document("org.example:app:1.0", ROOT_POM)
        .await;
    let session = CommandSession::new(AppConfig::default(), fetcher);

    let (result, output) = run(
        Commands::Resolve {
            coordinate: "org.example:app:1.0".to_string(),
            check_jars: false,
            format: OutputFormat::Plain,
        },
        &session,
    )
    .await;

    assert_eq!(output, "org.example:app:1.0\n");
    let err = result.unwrap_err();
    assert!(err.to_string().contains("stopped after 1 coordinates"));
    assert!(matches!(
        err.downcast_ref::<ResolutionError>(),
        Some(ResolutionError::NetworkFailure { .. })
    ));
}

#[tokio::test]
async fn test_pom_prints_raw_document() {
    let session = session().await;
    let (result, output) = run(
        Commands::Pom {
            coordinate: "org.example:lib:2.0".to_string(),
        },
        &session,
    )
    .await;

    result.unwrap();
    assert_eq!(output, format!("{}\n", LIB_POM));
}

#[tokio::test]
async fn test_pom_missing_document_fails() {
    let session = session().await;
    let (result, output) = run(
        Commands::Pom {
            coordinate: "org.example:missing:1.0".to_string(),
        },
        &session,
    )
    .await;

    assert!(result.is_err());
    assert!(output.is_empty());
}

#[tokio::test]
async fn test_url_uses_repository_layout() {
    let session = session().await;
    let (result, output) = run(
        Commands::Url {
            coordinate: "com.google.code.gson:gson:2.8.8".to_string(),
        },
        &session,
    )
    .await;

    result.unwrap();
    assert_eq!(
        output,
        "https://repo1.maven.org/maven2/com/google/code/gson/gson/2.8.8/gson-2.8.8.pom\n"
    );
    assert_eq!(session.source().fetcher().fetch_count().await, 0);
}

#[tokio::test]
async fn test_probe_reports_existence() {
    let session = session().await;

    let (result, output) = run(
        Commands::Probe {
            coordinate: "org.example:lib:2.0".to_string(),
        },
        &session,
    )
    .await;
    result.unwrap();
    assert_eq!(output, "org.example:lib:2.0: jar found\n");

    let (result, output) = run(
        Commands::Probe {
            coordinate: "org.example:app:1.0".to_string(),
        },
        &session,
    )
    .await;
    result.unwrap();
    assert_eq!(output, "org.example:app:1.0: no jar\n");
}

#[tokio::test]
async fn test_version_output() {
    let session = session().await;
    let (result, output) = run(Commands::Version, &session).await;

    result.unwrap();
    assert!(output.starts_with(&format!("pomwalk {}\n", env!("CARGO_PKG_VERSION"))));
    assert!(output.contains("Repository: https://repo1.maven.org/maven2/"));
}

const CACHED: &str = r#"{"org.example:lib:2.0":"<project><groupId>org.example</groupId><artifactId>lib</artifactId><version>2.0</version></project>"}"#;

fn cached_session_dir() -> tempfile::TempDir {
    let temp_dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join(crate::networking::cache::CACHE_FILE_NAME),
        CACHED,
    )
    .unwrap();
    temp_dir
}

#[tokio::test]
async fn test_offline_commands_leave_cache_file_intact() {
    let temp_dir = cached_session_dir();
    let config = AppConfig {
        cache_dir: Some(temp_dir.path().to_path_buf()),
        ..AppConfig::default()
    };
    let session = CommandSession::new(config, MockRepositoryClient::new());
    let cache_file = temp_dir.path().join(crate::networking::cache::CACHE_FILE_NAME);

    let mut out: Vec<u8> = Vec::new();
    execute_cached_command(Commands::Version, &session, &mut out)
        .await
        .unwrap();
    assert_eq!(std::fs::read_to_string(&cache_file).unwrap(), CACHED);

    execute_cached_command(
        Commands::Url {
            coordinate: "org.example:lib:2.0".to_string(),
        },
        &session,
        &mut out,
    )
    .await
    .unwrap();
    assert_eq!(std::fs::read_to_string(&cache_file).unwrap(), CACHED);
}

#[tokio::test]
async fn test_network_commands_extend_cache_file() {
    let temp_dir = cached_session_dir();
    let config = AppConfig {
        cache_dir: Some(temp_dir.path().to_path_buf()),
        ..AppConfig::default()
    };
    let fetcher = MockRepositoryClient::new()
        .with_document("org.example:app:1.0", ROOT_POM)
        .await;
    let session = CommandSession::new(config.clone(), fetcher);

    let mut out: Vec<u8> = Vec::new();
    execute_cached_command(
        Commands::Resolve {
            coordinate: "org.example:app:1.0".to_string(),
            check_jars: false,
            format: OutputFormat::Plain,
        },
        &session,
        &mut out,
    )
    .await
    .unwrap();

    // lib came from the loaded cache, app from the fetcher
    assert_eq!(session.source().fetcher().fetch_count().await, 1);

    let restored = CommandSession::new(config, MockRepositoryClient::new());
    assert_eq!(restored.load_cache().await, 2);
}
