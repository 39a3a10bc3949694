//! Resolution over HTTP against a local mock repository

use pomwalk_lib::application::{Commands, OutputFormat};
use pomwalk_lib::primitives::ResolutionError;
use pomwalk_tests::fixtures::{GSON_PARENT_POM, GSON_POM};
use pomwalk_tests::{PomBuilder, TestEnvironment, run_command};

fn resolve(coordinate: &str) -> Commands {
    Commands::Resolve {
        coordinate: coordinate.to_string(),
        check_jars: false,
        format: OutputFormat::Plain,
    }
}

fn lines(stdout: &str) -> Vec<&str> {
    stdout.lines().collect()
}

#[tokio::test]
async fn gson_resolves_through_its_parent() -> anyhow::Result<()> {
    let mut env = TestEnvironment::new().await?;
    env.serve_pom("com.google.code.gson:gson:2.8.8", GSON_POM, 1)
        .await;
    env.serve_pom("com.google.code.gson:gson-parent:2.8.8", GSON_PARENT_POM, 1)
        .await;

    let session = env.session().build()?;
    let run = run_command(resolve("com.google.code.gson:gson:2.8.8"), &session).await;

    run.result?;
    // junit is test-scoped and never walked
    assert_eq!(
        lines(&run.stdout),
        vec![
            "com.google.code.gson:gson:2.8.8",
            "com.google.code.gson:gson-parent:2.8.8",
        ]
    );
    env.assert_all().await;
    Ok(())
}

#[tokio::test]
async fn tree_is_walked_depth_first_with_inherited_versions() -> anyhow::Result<()> {
    let mut env = TestEnvironment::new().await?;

    let acme_parent = PomBuilder::new("org.acme:acme-parent:5")
        .property("core.version", "2.1")
        .managed("org.acme:util:3.0")
        .build();
    let app = PomBuilder::inheriting("app", "org.acme:acme-parent:5")
        .dependency("org.acme:core:${core.version}")
        .unversioned_dependency("org.acme", "util")
        .scoped_dependency("junit:junit:4.13.2", "test")
        .build();
    let core = PomBuilder::new("org.acme:core:2.1")
        .dependency("org.acme:util:3.0")
        .dependency("org.slf4j:slf4j-api:1.7.36")
        .optional_dependency("org.acme:extras:1.0")
        .build();
    let util = PomBuilder::new("org.acme:util:3.0").build();
    let slf4j_parent = PomBuilder::new("org.slf4j:slf4j-parent:1.7.36").build();
    let slf4j = PomBuilder::inheriting("slf4j-api", "org.slf4j:slf4j-parent:1.7.36").build();

    env.serve_pom("org.acme:app:5", &app, 1).await;
    env.serve_pom("org.acme:acme-parent:5", &acme_parent, 1).await;
    env.serve_pom("org.acme:core:2.1", &core, 1).await;
    env.serve_pom("org.acme:util:3.0", &util, 1).await;
    env.serve_pom("org.slf4j:slf4j-api:1.7.36", &slf4j, 1).await;
    env.serve_pom("org.slf4j:slf4j-parent:1.7.36", &slf4j_parent, 1)
        .await;

    let session = env.session().build()?;
    let run = run_command(resolve("org.acme:app:5"), &session).await;

    run.result?;
    assert_eq!(
        lines(&run.stdout),
        vec![
            "org.acme:app:5",
            "org.acme:acme-parent:5",
            "org.acme:core:2.1",
            "org.acme:util:3.0",
            "org.slf4j:slf4j-api:1.7.36",
            "org.slf4j:slf4j-parent:1.7.36",
        ]
    );
    env.assert_all().await;
    Ok(())
}

#[tokio::test]
async fn transient_server_error_is_retried_once() -> anyhow::Result<()> {
    let mut env = TestEnvironment::new().await?;
    env.fail_pom("org.acme:flaky:1.0", 503, 1).await;
    env.serve_pom(
        "org.acme:flaky:1.0",
        &PomBuilder::new("org.acme:flaky:1.0").build(),
        1,
    )
    .await;

    let session = env.session().build()?;
    let run = run_command(resolve("org.acme:flaky:1.0"), &session).await;

    run.result?;
    assert_eq!(lines(&run.stdout), vec!["org.acme:flaky:1.0"]);
    env.assert_all().await;
    Ok(())
}

#[tokio::test]
async fn missing_dependency_stops_the_run_after_one_retry() -> anyhow::Result<()> {
    let mut env = TestEnvironment::new().await?;
    let root = PomBuilder::new("org.acme:app:1.0")
        .dependency("org.acme:gone:1.0")
        .dependency("org.acme:never:1.0")
        .build();
    env.serve_pom("org.acme:app:1.0", &root, 1).await;
    env.fail_pom("org.acme:gone:1.0", 404, 2).await;
    env.serve_pom(
        "org.acme:never:1.0",
        &PomBuilder::new("org.acme:never:1.0").build(),
        0,
    )
    .await;

    let session = env.session().build()?;
    let run = run_command(resolve("org.acme:app:1.0"), &session).await;

    assert_eq!(lines(&run.stdout), vec!["org.acme:app:1.0"]);
    let err = run.result.expect_err("404 must end the run");
    match err.downcast_ref::<ResolutionError>() {
        Some(ResolutionError::NetworkFailure { coordinate, detail }) => {
            assert_eq!(coordinate, "org.acme:gone:1.0");
            assert!(detail.contains("404"), "detail was {detail}");
        }
        other => panic!("expected NetworkFailure, got {other:?}"),
    }
    env.assert_all().await;
    Ok(())
}

#[tokio::test]
async fn circular_parents_are_reported_with_their_chain() -> anyhow::Result<()> {
    let mut env = TestEnvironment::new().await?;
    env.serve_pom(
        "org.loop:a:1",
        &PomBuilder::new("org.loop:a:1").parent("org.loop:b:1").build(),
        1,
    )
    .await;
    env.serve_pom(
        "org.loop:b:1",
        &PomBuilder::new("org.loop:b:1").parent("org.loop:a:1").build(),
        1,
    )
    .await;

    let session = env.session().build()?;
    let run = run_command(resolve("org.loop:a:1"), &session).await;

    assert!(run.stdout.is_empty());
    let err = run.result.expect_err("cycle must end the run");
    match err.downcast_ref::<ResolutionError>() {
        Some(ResolutionError::CircularReference { coordinate, chain }) => {
            assert_eq!(coordinate, "org.loop:a:1");
            assert_eq!(chain, "org.loop:a:1 -> org.loop:b:1 -> org.loop:a:1");
        }
        other => panic!("expected CircularReference, got {other:?}"),
    }
    env.assert_all().await;
    Ok(())
}

#[tokio::test]
async fn malformed_document_is_a_parse_failure() -> anyhow::Result<()> {
    let mut env = TestEnvironment::new().await?;
    env.serve_pom("org.acme:bad:1.0", "<project><groupId>org.acme</project>", 1)
        .await;

    let session = env.session().build()?;
    let run = run_command(resolve("org.acme:bad:1.0"), &session).await;

    let err = run.result.expect_err("malformed XML must fail");
    assert!(matches!(
        err.downcast_ref::<ResolutionError>(),
        Some(ResolutionError::ParseFailure { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn disk_cache_serves_a_second_session_without_requests() -> anyhow::Result<()> {
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
    let cache_dir = env.cache_path().to_path_buf();

    let first = env.session().with_cache_dir(&cache_dir).build()?;
    assert_eq!(first.load_cache().await, 0);
    run_command(resolve("org.acme:app:1.0"), &first).await.result?;
    first.save_cache().await;
    assert!(cache_dir.join("pom_cache.json").exists());

    let second = env.session().with_cache_dir(&cache_dir).build()?;
    assert_eq!(second.load_cache().await, 2);
    let run = run_command(resolve("org.acme:app:1.0"), &second).await;
    run.result?;
    assert_eq!(lines(&run.stdout), vec!["org.acme:app:1.0", "org.acme:lib:1.0"]);

    // Still exactly one request each
    env.assert_all().await;
    Ok(())
}
