//! Command output of live sessions against a local mock repository

use pomwalk_lib::application::{Commands, OutputFormat};
use pomwalk_tests::fixtures::GSON_POM;
use pomwalk_tests::{PomBuilder, TestEnvironment, run_command};

async fn two_artifact_repository() -> anyhow::Result<TestEnvironment> {
    let mut env = TestEnvironment::new().await?;
    env.serve_pom(
        "org.acme:app:1.0",
        &PomBuilder::new("org.acme:app:1.0")
            .dependency("org.acme:lib:1.0")
            .build(),
        1,
    )
    .await;
    env.serve_pom("org.acme:lib:1.0", &PomBuilder::new("org.acme:lib:1.0").build(), 1)
        .await;
    env.serve_jar("org.acme:lib:1.0").await;
    Ok(env)
}

#[tokio::test]
async fn resolve_annotates_jars() -> anyhow::Result<()> {
    let env = two_artifact_repository().await?;
    let session = env.session().build()?;

    let run = run_command(
        Commands::Resolve {
            coordinate: "org.acme:app:1.0".to_string(),
            check_jars: true,
            format: OutputFormat::Plain,
        },
        &session,
    )
    .await;

    run.result?;
    assert_eq!(
        run.stdout,
        "org.acme:app:1.0 [no jar]\norg.acme:lib:1.0 [jar]\n"
    );
    Ok(())
}

#[tokio::test]
async fn resolve_json_lists_entries_in_order() -> anyhow::Result<()> {
    let env = two_artifact_repository().await?;
    let session = env.session().build()?;

    let run = run_command(
        Commands::Resolve {
            coordinate: "org.acme:app:1.0".to_string(),
            check_jars: false,
            format: OutputFormat::Json,
        },
        &session,
    )
    .await;

    run.result?;
    let parsed: serde_json::Value = serde_json::from_str(&run.stdout)?;
    assert_eq!(
        parsed,
        serde_json::json!([
            { "coordinate": "org.acme:app:1.0" },
            { "coordinate": "org.acme:lib:1.0" }
        ])
    );
    Ok(())
}

#[tokio::test]
async fn pom_prints_the_served_document() -> anyhow::Result<()> {
    let mut env = TestEnvironment::new().await?;
    env.serve_pom("com.google.code.gson:gson:2.8.8", GSON_POM, 1)
        .await;
    let session = env.session().build()?;

    let run = run_command(
        Commands::Pom {
            coordinate: "com.google.code.gson:gson:2.8.8".to_string(),
        },
        &session,
    )
    .await;

    run.result?;
    assert_eq!(run.stdout, format!("{}\n", GSON_POM.trim_end()));
    Ok(())
}

#[tokio::test]
async fn url_points_into_the_configured_repository() -> anyhow::Result<()> {
    let env = TestEnvironment::new().await?;
    let session = env.session().build()?;

    let run = run_command(
        Commands::Url {
            coordinate: "org.acme:app:1.0".to_string(),
        },
        &session,
    )
    .await;

    run.result?;
    assert_eq!(
        run.stdout,
        format!("{}/org/acme/app/1.0/app-1.0.pom\n", env.url())
    );
    Ok(())
}

#[tokio::test]
async fn probe_reports_both_outcomes() -> anyhow::Result<()> {
    let env = two_artifact_repository().await?;
    let session = env.session().build()?;

    let found = run_command(
        Commands::Probe {
            coordinate: "org.acme:lib:1.0".to_string(),
        },
        &session,
    )
    .await;
    found.result?;
    assert_eq!(found.stdout, "org.acme:lib:1.0: jar found\n");

    let missing = run_command(
        Commands::Probe {
            coordinate: "org.acme:app:1.0".to_string(),
        },
        &session,
    )
    .await;
    missing.result?;
    assert_eq!(missing.stdout, "org.acme:app:1.0: no jar\n");
    Ok(())
}

#[tokio::test]
async fn version_names_the_repository() -> anyhow::Result<()> {
    let env = TestEnvironment::new().await?;
    let session = env.session().build()?;

    let run = run_command(Commands::Version, &session).await;

    run.result?;
    assert!(run.stdout.contains(&format!("Repository: {}/", env.url())));
    Ok(())
}
