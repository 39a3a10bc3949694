//! Sessions over the in-memory repository client

use pomwalk_lib::api::MockRepositoryClient;
use pomwalk_lib::application::{
    AppConfig, CommandSession, Commands, OutputFormat, execute_command_with_session,
};
use pomwalk_lib::primitives::ResolutionError;
use pomwalk_tests::PomBuilder;

async fn run(
    command: Commands,
    session: &CommandSession<MockRepositoryClient>,
) -> (anyhow::Result<()>, String) {
    let mut out: Vec<u8> = Vec::new();
    let result = execute_command_with_session(command, session, &mut out).await;
    (result, String::from_utf8_lossy(&out).into_owned())
}

#[tokio::test]
async fn broken_document_stays_viewable_without_refetching() -> anyhow::Result<()> {
    let broken = "<project><groupId>org.acme</groupId><artifactId>bad</artifactId>";
    let fetcher = MockRepositoryClient::new()
        .with_document("org.acme:bad:1.0", broken)
        .await;
    let session = CommandSession::new(AppConfig::default(), fetcher);

    let (result, _) = run(
        Commands::Resolve {
            coordinate: "org.acme:bad:1.0".to_string(),
            check_jars: false,
            format: OutputFormat::Plain,
        },
        &session,
    )
    .await;
    assert!(matches!(
        result.expect_err("truncated XML must fail").downcast_ref::<ResolutionError>(),
        Some(ResolutionError::ParseFailure { .. })
    ));

    let (result, output) = run(
        Commands::Pom {
            coordinate: "org.acme:bad:1.0".to_string(),
        },
        &session,
    )
    .await;
    result?;
    assert_eq!(output, format!("{}\n", broken));
    assert_eq!(session.source().fetcher().fetch_count().await, 1);
    Ok(())
}

#[tokio::test]
async fn repeated_runs_share_the_session_cache() -> anyhow::Result<()> {
    let fetcher = MockRepositoryClient::new()
        .with_document(
            "org.acme:app:1.0",
            &PomBuilder::new("org.acme:app:1.0")
                .dependency("org.acme:lib:1.0")
                .build(),
        )
        .await
        .with_document("org.acme:lib:1.0", &PomBuilder::new("org.acme:lib:1.0").build())
        .await;
    let session = CommandSession::new(AppConfig::default(), fetcher);

    let command = || Commands::Resolve {
        coordinate: "org.acme:app:1.0".to_string(),
        check_jars: false,
        format: OutputFormat::Plain,
    };

    let (first, first_output) = run(command(), &session).await;
    let (second, second_output) = run(command(), &session).await;
    first?;
    second?;

    assert_eq!(first_output, "org.acme:app:1.0\norg.acme:lib:1.0\n");
    assert_eq!(first_output, second_output);
    assert_eq!(session.source().fetcher().fetch_count().await, 2);
    Ok(())
}
