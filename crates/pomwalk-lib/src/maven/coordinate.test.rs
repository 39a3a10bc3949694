use super::*;

#[test]
fn test_parse_valid_coordinate() {
    let coordinate = Coordinate::parse("com.google.code.gson:gson:2.8.8").unwrap();
    assert_eq!(coordinate.group(), "com.google.code.gson");
    assert_eq!(coordinate.artifact(), "gson");
    assert_eq!(coordinate.version(), "2.8.8");
    assert_eq!(coordinate.to_string(), "com.google.code.gson:gson:2.8.8");
}

#[test]
fn test_parse_rejects_wrong_segment_counts() {
    for input in ["", "a", "a:b", "a:b:c:d", "a::c", ":b:c", "a:b:"] {
        let result = Coordinate::parse(input);
        assert!(
            matches!(result, Err(ResolutionError::InvalidCoordinateFormat { .. })),
            "'{}' should be rejected, got {:?}",
            input,
            result
        );
    }
}

#[test]
fn test_equality_follows_canonical_string() {
    let a = Coordinate::parse("a:b:1").unwrap();
    let b = Coordinate::new("a", "b", "1");
    assert_eq!(a, b);
    assert_ne!(a, Coordinate::new("a", "b", "2"));
}

#[test]
fn test_is_resolvable_shape() {
    assert!(Coordinate::is_resolvable("org.slf4j:slf4j-api:2.0.9"));
    assert!(Coordinate::is_resolvable("a:b:1"));

    assert!(!Coordinate::is_resolvable("a:b:${missing.key}"));
    assert!(!Coordinate::is_resolvable("a:b:[1.0,2.0)"));
    assert!(!Coordinate::is_resolvable("a:b"));
    assert!(!Coordinate::is_resolvable("a:b:1:jar"));
    assert!(!Coordinate::is_resolvable("a_b:c:1"));
    assert!(!Coordinate::is_resolvable("a::1"));
}

#[test]
fn test_repository_path_layout() {
    let coordinate = Coordinate::parse("com.google.code.gson:gson:2.8.8").unwrap();
    assert_eq!(
        coordinate.repository_path(ArtifactKind::Pom),
        "com/google/code/gson/gson/2.8.8/gson-2.8.8.pom"
    );
    assert_eq!(
        coordinate.url(MAVEN_CENTRAL_URL, ArtifactKind::Jar),
        "https://repo1.maven.org/maven2/com/google/code/gson/gson/2.8.8/gson-2.8.8.jar"
    );
}

#[test]
fn test_serde_uses_canonical_string() {
    let coordinate = Coordinate::new("a", "b", "1");
    let json = serde_json::to_string(&coordinate).unwrap();
    assert_eq!(json, "\"a:b:1\"");

    let back: Coordinate = serde_json::from_str(&json).unwrap();
    assert_eq!(back, coordinate);

    let invalid: Result<Coordinate, _> = serde_json::from_str("\"a:b\"");
    assert!(invalid.is_err());
}
