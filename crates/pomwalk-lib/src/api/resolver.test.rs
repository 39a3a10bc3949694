use super::*;
use crate::api::repository::MockRepositoryClient;
use std::time::Duration;

fn split(coordinate: &str) -> (&str, &str, &str) {
    let mut parts = coordinate.split(':');
    (
        parts.next().unwrap_or_default(),
        parts.next().unwrap_or_default(),
        parts.next().unwrap_or_default(),
    )
}

fn dependency(coordinate: &str) -> String {
    let (group, artifact, version) = split(coordinate);
    format!(
        "<dependency><groupId>{}</groupId><artifactId>{}</artifactId><version>{}</version></dependency>",
        group, artifact, version
    )
}

fn scoped(coordinate: &str, scope: &str) -> String {
    let (group, artifact, version) = split(coordinate);
    format!(
        "<dependency><groupId>{}</groupId><artifactId>{}</artifactId><version>{}</version><scope>{}</scope></dependency>",
        group, artifact, version, scope
    )
}

fn unversioned(group: &str, artifact: &str) -> String {
    format!(
        "<dependency><groupId>{}</groupId><artifactId>{}</artifactId></dependency>",
        group, artifact
    )
}

fn pom(coordinate: &str, parent: Option<&str>, body: &str) -> String {
    let (group, artifact, version) = split(coordinate);
    let parent = parent
        .map(|parent| {
            let (pg, pa, pv) = split(parent);
            format!(
                "<parent><groupId>{}</groupId><artifactId>{}</artifactId><version>{}</version></parent>",
                pg, pa, pv
            )
        })
        .unwrap_or_default();
    format!(
        "<project>{}<groupId>{}</groupId><artifactId>{}</artifactId><version>{}</version>{}</project>",
        parent, group, artifact, version, body
    )
}

fn dependencies(entries: &[String]) -> String {
    format!("<dependencies>{}</dependencies>", entries.concat())
}

async fn repository(documents: &[(&str, String)]) -> MockRepositoryClient {
    let mut client = MockRepositoryClient::new();
    for (coordinate, xml) in documents {
        client = client.with_document(coordinate, xml).await;
    }
    client
}

fn resolver(client: MockRepositoryClient) -> DependencyResolver<MockRepositoryClient> {
    DependencyResolver::new(Arc::new(MetadataSource::new(client)))
}

async fn fetched(resolver: &DependencyResolver<MockRepositoryClient>) -> Vec<String> {
    resolver
        .source()
        .fetcher()
        .fetched()
        .await
        .iter()
        .map(|c| c.to_string())
        .collect()
}

#[tokio::test]
async fn test_depth_first_chain() {
    let client = repository(&[
        ("a:b:1", pom("a:b:1", None, &dependencies(&[dependency("c:d:1")]))),
        ("c:d:1", pom("c:d:1", None, &dependencies(&[dependency("e:f:1")]))),
        ("e:f:1", pom("e:f:1", None, "")),
    ])
    .await;

    let outcome = resolver(client).resolve("a:b:1").collect().await;

    assert!(outcome.is_success());
    assert_eq!(outcome.coordinates, vec!["a:b:1", "c:d:1", "e:f:1"]);
}

#[tokio::test]
async fn test_subtree_completes_before_next_sibling() {
    let client = repository(&[
        (
            "a:b:1",
            pom(
                "a:b:1",
                None,
                &dependencies(&[dependency("c:d:1"), dependency("g:h:1")]),
            ),
        ),
        ("c:d:1", pom("c:d:1", None, &dependencies(&[dependency("e:f:1")]))),
        ("e:f:1", pom("e:f:1", None, "")),
        ("g:h:1", pom("g:h:1", None, "")),
    ])
    .await;

    let resolver = resolver(client);
    let outcome = resolver.resolve("a:b:1").collect().await;

    assert_eq!(outcome.coordinates, vec!["a:b:1", "c:d:1", "e:f:1", "g:h:1"]);
    assert_eq!(fetched(&resolver).await, vec!["a:b:1", "c:d:1", "e:f:1", "g:h:1"]);
}

#[tokio::test]
async fn test_parent_chain_emitted_before_dependencies() {
    let client = repository(&[
        ("a:b:1", pom("a:b:1", Some("p:q:1"), "")),
        ("p:q:1", pom("p:q:1", None, "")),
    ])
    .await;

    let outcome = resolver(client).resolve("a:b:1").collect().await;

    assert_eq!(outcome.coordinates, vec!["a:b:1", "p:q:1"]);
}

#[tokio::test]
async fn test_inherited_dependencies_follow_chain() {
    let client = repository(&[
        (
            "a:b:1",
            pom("a:b:1", Some("p:q:1"), &dependencies(&[dependency("own:dep:1")])),
        ),
        (
            "p:q:1",
            pom("p:q:1", Some("r:s:1"), &dependencies(&[dependency("inherited:dep:1")])),
        ),
        ("r:s:1", pom("r:s:1", None, "")),
        ("own:dep:1", pom("own:dep:1", None, "")),
        ("inherited:dep:1", pom("inherited:dep:1", None, "")),
    ])
    .await;

    let outcome = resolver(client).resolve("a:b:1").collect().await;

    assert_eq!(
        outcome.coordinates,
        vec!["a:b:1", "p:q:1", "r:s:1", "inherited:dep:1", "own:dep:1"]
    );
}

#[tokio::test]
async fn test_self_parent_is_circular_reference() {
    let client = repository(&[("x:y:1", pom("x:y:1", Some("x:y:1"), ""))]).await;

    let outcome = resolver(client).resolve("x:y:1").collect().await;

    assert!(outcome.coordinates.is_empty());
    match outcome.error {
        Some(ResolutionError::CircularReference { coordinate, chain }) => {
            assert_eq!(coordinate, "x:y:1");
            assert_eq!(chain, "x:y:1 -> x:y:1");
        }
        other => panic!("Expected CircularReference, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_ancestry_loop_keeps_prior_output() {
    let client = repository(&[
        ("a:b:1", pom("a:b:1", None, &dependencies(&[dependency("c:d:1")]))),
        ("c:d:1", pom("c:d:1", Some("p:q:1"), "")),
        ("p:q:1", pom("p:q:1", Some("c:d:1"), "")),
    ])
    .await;

    let outcome = resolver(client).resolve("a:b:1").collect().await;

    assert_eq!(outcome.coordinates, vec!["a:b:1"]);
    assert!(matches!(
        outcome.error,
        Some(ResolutionError::CircularReference { ref coordinate, .. }) if coordinate == "c:d:1"
    ));
}

#[tokio::test]
async fn test_diamond_emits_shared_dependency_once() {
    let client = repository(&[
        (
            "a:a:1",
            pom(
                "a:a:1",
                None,
                &dependencies(&[dependency("b:b:1"), dependency("c:c:1")]),
            ),
        ),
        ("b:b:1", pom("b:b:1", None, &dependencies(&[dependency("d:d:1")]))),
        ("c:c:1", pom("c:c:1", None, &dependencies(&[dependency("d:d:1")]))),
        ("d:d:1", pom("d:d:1", None, "")),
    ])
    .await;

    let resolver = resolver(client);
    let outcome = resolver.resolve("a:a:1").collect().await;

    assert_eq!(outcome.coordinates, vec!["a:a:1", "b:b:1", "d:d:1", "c:c:1"]);
    let fetches = fetched(&resolver).await;
    assert_eq!(fetches.iter().filter(|c| *c == "d:d:1").count(), 1);
}

#[tokio::test]
async fn test_non_transitive_dependencies_are_never_visited() {
    let optional = "<dependency><groupId>o</groupId><artifactId>o</artifactId><version>1</version><optional>true</optional></dependency>";
    let client = repository(&[
        (
            "a:b:1",
            pom(
                "a:b:1",
                None,
                &dependencies(&[
                    scoped("t:t:1", "test"),
                    scoped("p:p:1", "provided"),
                    optional.to_string(),
                    scoped("c:c:1", "compile"),
                    scoped("r:r:1", "runtime"),
                ]),
            ),
        ),
        ("c:c:1", pom("c:c:1", None, "")),
        ("r:r:1", pom("r:r:1", None, "")),
    ])
    .await;

    let resolver = resolver(client);
    let outcome = resolver.resolve("a:b:1").collect().await;

    assert!(outcome.is_success());
    assert_eq!(outcome.coordinates, vec!["a:b:1", "c:c:1", "r:r:1"]);
    assert_eq!(fetched(&resolver).await, vec!["a:b:1", "c:c:1", "r:r:1"]);
}

#[tokio::test]
async fn test_property_substitution() {
    let root = pom(
        "a:b:2.3.0",
        Some("p:q:1"),
        &format!(
            "<properties><lib.version>4.5</lib.version></properties>{}",
            dependencies(&[
                "<dependency><groupId>x</groupId><artifactId>self-versioned</artifactId><version>${project.version}</version></dependency>".to_string(),
                "<dependency><groupId>x</groupId><artifactId>child-prop</artifactId><version>${lib.version}</version></dependency>".to_string(),
                "<dependency><groupId>x</groupId><artifactId>parent-prop</artifactId><version>${parent.only}</version></dependency>".to_string(),
                "<dependency><groupId>x</groupId><artifactId>unknown</artifactId><version>${missing.key}</version></dependency>".to_string(),
            ])
        ),
    );
    let parent = pom(
        "p:q:1",
        None,
        "<properties><lib.version>0.1</lib.version><parent.only>7</parent.only></properties>",
    );
    let client = repository(&[
        ("a:b:2.3.0", root),
        ("p:q:1", parent),
        ("x:self-versioned:2.3.0", pom("x:self-versioned:2.3.0", None, "")),
        ("x:child-prop:4.5", pom("x:child-prop:4.5", None, "")),
        ("x:parent-prop:7", pom("x:parent-prop:7", None, "")),
    ])
    .await;

    let outcome = resolver(client).resolve("a:b:2.3.0").collect().await;

    assert!(outcome.is_success(), "error: {:?}", outcome.error);
    assert_eq!(
        outcome.coordinates,
        vec![
            "a:b:2.3.0",
            "p:q:1",
            "x:self-versioned:2.3.0",
            "x:child-prop:4.5",
            "x:parent-prop:7",
            "x:unknown:${missing.key}",
        ]
    );
}

#[tokio::test]
async fn test_managed_version_injection() {
    let parent = pom(
        "p:q:1",
        None,
        "<dependencyManagement><dependencies>\
         <dependency><groupId>m</groupId><artifactId>n</artifactId><version>1.2.3</version></dependency>\
         </dependencies></dependencyManagement>",
    );
    let root = pom(
        "a:b:1",
        Some("p:q:1"),
        &dependencies(&[unversioned("m", "n"), unversioned("u", "v")]),
    );
    let client = repository(&[
        ("a:b:1", root),
        ("p:q:1", parent),
        ("m:n:1.2.3", pom("m:n:1.2.3", None, "")),
    ])
    .await;

    let outcome = resolver(client).resolve("a:b:1").collect().await;

    assert!(outcome.is_success(), "error: {:?}", outcome.error);
    assert_eq!(outcome.coordinates, vec!["a:b:1", "p:q:1", "m:n:1.2.3"]);
}

#[tokio::test]
async fn test_cache_transparency_across_runs() {
    let client = repository(&[
        ("a:b:1", pom("a:b:1", Some("p:q:1"), &dependencies(&[dependency("c:d:1")]))),
        ("p:q:1", pom("p:q:1", None, "")),
        ("c:d:1", pom("c:d:1", None, "")),
    ])
    .await;

    let resolver = resolver(client);
    let first = resolver.resolve("a:b:1").collect().await;
    let fetches_after_first = resolver.source().fetcher().fetch_count().await;
    let second = resolver.resolve("a:b:1").collect().await;

    assert_eq!(first.coordinates, vec!["a:b:1", "p:q:1", "c:d:1"]);
    assert_eq!(first.coordinates, second.coordinates);
    assert_eq!(fetches_after_first, 3);
    assert_eq!(resolver.source().fetcher().fetch_count().await, 3);
}

#[tokio::test]
async fn test_failure_is_terminal_and_keeps_prior_output() {
    let client = repository(&[
        (
            "a:b:1",
            pom(
                "a:b:1",
                None,
                &dependencies(&[
                    dependency("ok:dep:1"),
                    dependency("gone:dep:1"),
                    dependency("never:dep:1"),
                ]),
            ),
        ),
        ("ok:dep:1", pom("ok:dep:1", None, "")),
        ("never:dep:1", pom("never:dep:1", None, "")),
    ])
    .await;

    let resolver = resolver(client);
    let mut stream = resolver.resolve("a:b:1");

    assert_eq!(stream.next().await.unwrap().unwrap(), "a:b:1");
    assert_eq!(stream.next().await.unwrap().unwrap(), "ok:dep:1");
    match stream.next().await {
        Some(Err(ResolutionError::NetworkFailure { coordinate, .. })) => {
            assert_eq!(coordinate, "gone:dep:1");
        }
        other => panic!("Expected NetworkFailure, got: {:?}", other),
    }
    assert!(stream.next().await.is_none());
    assert!(!fetched(&resolver).await.contains(&"never:dep:1".to_string()));
}

#[tokio::test]
async fn test_missing_fields_fail_the_run() {
    let client = repository(&[
        ("a:b:1", pom("a:b:1", None, &dependencies(&[dependency("c:d:1")]))),
        ("c:d:1", "<project><artifactId>d</artifactId></project>".to_string()),
    ])
    .await;

    let outcome = resolver(client).resolve("a:b:1").collect().await;

    assert_eq!(outcome.coordinates, vec!["a:b:1"]);
    assert!(matches!(
        outcome.into_result(),
        Err(ResolutionError::MissingRequiredFields { .. })
    ));
}

#[tokio::test]
async fn test_cancel_stops_emission_and_fetching() {
    let client = repository(&[
        ("a:a:1", pom("a:a:1", None, &dependencies(&[dependency("b:b:1")]))),
        ("b:b:1", pom("b:b:1", None, &dependencies(&[dependency("c:c:1")]))),
        ("c:c:1", pom("c:c:1", None, &dependencies(&[dependency("d:d:1")]))),
        ("d:d:1", pom("d:d:1", None, &dependencies(&[dependency("e:e:1")]))),
        ("e:e:1", pom("e:e:1", None, "")),
    ])
    .await;

    let resolver = resolver(client);
    let mut stream = resolver.resolve("a:a:1");

    assert_eq!(stream.next().await.unwrap().unwrap(), "a:a:1");
    stream.cancel();
    assert!(stream.next().await.is_none());

    tokio::time::sleep(Duration::from_millis(50)).await;

    let fetches = fetched(&resolver).await;
    assert!(fetches.len() <= 3, "fetched after cancel: {:?}", fetches);
    assert!(!fetches.contains(&"e:e:1".to_string()));
}

#[tokio::test]
async fn test_unresolvable_root_passes_through() {
    let resolver = resolver(MockRepositoryClient::new());

    let outcome = resolver.resolve("not-a-coordinate").collect().await;

    assert!(outcome.is_success());
    assert_eq!(outcome.coordinates, vec!["not-a-coordinate"]);
    assert_eq!(resolver.source().fetcher().fetch_count().await, 0);
}

#[tokio::test]
async fn test_no_coordinate_emitted_twice() {
    // Child and grandchild both depend back on the root and on each other
    let client = repository(&[
        (
            "a:a:1",
            pom("a:a:1", None, &dependencies(&[dependency("b:b:1"), dependency("a:a:1")])),
        ),
        (
            "b:b:1",
            pom("b:b:1", None, &dependencies(&[dependency("a:a:1"), dependency("c:c:1")])),
        ),
        (
            "c:c:1",
            pom("c:c:1", None, &dependencies(&[dependency("b:b:1"), dependency("a:a:1")])),
        ),
    ])
    .await;

    let outcome = resolver(client).resolve("a:a:1").collect().await;

    assert!(outcome.is_success());
    assert_eq!(outcome.coordinates, vec!["a:a:1", "b:b:1", "c:c:1"]);
}
