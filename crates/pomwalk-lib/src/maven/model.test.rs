use super::*;

fn document(group: &str, artifact: &str, version: &str) -> PomDocument {
    PomDocument {
        group: group.to_string(),
        artifact: artifact.to_string(),
        version: version.to_string(),
        ..PomDocument::default()
    }
}

fn with_properties(mut doc: PomDocument, properties: &[(&str, &str)]) -> PomDocument {
    for (key, value) in properties {
        doc.properties.insert(key.to_string(), value.to_string());
    }
    doc
}

// ============================================================================
// Property substitution
// ============================================================================

#[test]
fn test_substitute_project_identity() {
    let doc = document("org.example", "lib", "2.3.0");
    assert_eq!(doc.substitute("${project.version}"), "2.3.0");
    assert_eq!(doc.substitute("${project.groupId}"), "org.example");
    assert_eq!(doc.substitute("${project.artifactId}"), "lib");
}

#[test]
fn test_substitute_declared_property() {
    let doc = with_properties(document("a", "b", "1"), &[("slf4j.version", "2.0.9")]);
    assert_eq!(doc.substitute("${slf4j.version}"), "2.0.9");
}

#[test]
fn test_substitute_leaves_unresolved_and_literal_values() {
    let doc = with_properties(document("a", "b", "1"), &[("x", "${y}"), ("y", "2")]);

    assert_eq!(doc.substitute("${missing.key}"), "${missing.key}");
    assert_eq!(doc.substitute("1.0.0"), "1.0.0");
    assert_eq!(doc.substitute("prefix-${x}"), "prefix-${x}");
    // Single level only
    assert_eq!(doc.substitute("${x}"), "${y}");
}

// ============================================================================
// Inheritance merge
// ============================================================================

#[test]
fn test_inherit_identity_from_child() {
    let mut parent = document("org.parent", "parent", "1");
    parent.parent = Some(Coordinate::new("org.root", "root", "1"));
    let mut child = document("org.parent", "child", "1");
    child.parent = Some(Coordinate::new("org.parent", "parent", "1"));

    let merged = child.inherit_from(&parent);
    assert_eq!(merged.coordinate(), Coordinate::new("org.parent", "child", "1"));
    assert_eq!(merged.parent, child.parent);
}

#[test]
fn test_child_properties_win_on_collision() {
    let parent = with_properties(
        document("p", "q", "1"),
        &[("shared", "parent"), ("parent.only", "p")],
    );
    let child = with_properties(
        document("a", "b", "1"),
        &[("shared", "child"), ("child.only", "c")],
    );

    let merged = child.inherit_from(&parent);
    assert_eq!(merged.properties["shared"], "child");
    assert_eq!(merged.properties["parent.only"], "p");
    assert_eq!(merged.properties["child.only"], "c");
}

#[test]
fn test_dependency_lists_union_by_slot() {
    let mut parent = document("p", "q", "1");
    parent.dependencies = vec![
        DependencyRef::new("g", "first", Some("1")),
        DependencyRef::new("g", "second", Some("1")),
    ];
    parent.managed_dependencies = vec![DependencyRef::new("g", "managed", Some("1"))];

    let mut child = document("a", "b", "1");
    child.dependencies = vec![
        DependencyRef::new("g", "third", Some("3")),
        DependencyRef::new("g", "first", Some("9")),
    ];
    child.managed_dependencies = vec![DependencyRef::new("g", "managed", Some("2"))];

    let merged = child.inherit_from(&parent);
    let deps: Vec<String> = merged
        .dependencies
        .iter()
        .map(DependencyRef::coordinate_string)
        .collect();
    assert_eq!(deps, vec!["g:first:9", "g:second:1", "g:third:3"]);

    assert_eq!(merged.managed_dependencies.len(), 1);
    assert_eq!(merged.managed_dependencies[0].version.as_deref(), Some("2"));
}

#[test]
fn test_effective_folds_whole_chain() {
    let root = with_properties(document("r", "root", "1"), &[("level", "root"), ("a", "1")]);
    let middle = with_properties(document("r", "middle", "1"), &[("level", "middle")]);
    let leaf = document("r", "leaf", "1");

    let effective = PomDocument::effective(&[leaf, middle, root]).unwrap();
    assert_eq!(effective.artifact, "leaf");
    assert_eq!(effective.properties["level"], "middle");
    assert_eq!(effective.properties["a"], "1");
}

#[test]
fn test_effective_of_empty_chain() {
    assert!(PomDocument::effective::<PomDocument>(&[]).is_none());
}

// ============================================================================
// Dependency derivation
// ============================================================================

#[test]
fn test_managed_version_injection() {
    let mut doc = document("a", "b", "1");
    doc.managed_dependencies = vec![DependencyRef::new("x", "y", Some("1.2.3"))];
    doc.dependencies = vec![
        DependencyRef::new("x", "y", None),
        DependencyRef::new("x", "unmanaged", None),
    ];

    let deps = doc.transitive_dependencies();
    assert_eq!(deps.len(), 1);
    assert_eq!(deps[0].coordinate_string(), "x:y:1.2.3");
}

#[test]
fn test_managed_entries_are_substituted() {
    let mut doc = with_properties(document("org.x", "bom", "4.0"), &[("y.version", "7")]);
    doc.managed_dependencies = vec![
        DependencyRef::new("${project.groupId}", "y", Some("${y.version}")),
    ];
    doc.dependencies = vec![DependencyRef::new("org.x", "y", None)];

    let deps = doc.transitive_dependencies();
    assert_eq!(deps[0].coordinate_string(), "org.x:y:7");
}

#[test]
fn test_explicit_version_beats_management() {
    let mut doc = document("a", "b", "1");
    doc.managed_dependencies = vec![DependencyRef::new("x", "y", Some("1.2.3"))];
    doc.dependencies = vec![DependencyRef::new("x", "y", Some("9.9"))];

    assert_eq!(doc.transitive_dependencies()[0].coordinate_string(), "x:y:9.9");
}

#[test]
fn test_scope_and_optional_filtering() {
    let mut doc = with_properties(document("a", "b", "1"), &[("test.scope", "test")]);
    doc.dependencies = vec![
        DependencyRef::new("g", "compile", Some("1")).with_scope("compile"),
        DependencyRef::new("g", "test", Some("1")).with_scope("test"),
        DependencyRef::new("g", "provided", Some("1")).with_scope("provided"),
        DependencyRef::new("g", "optional", Some("1")).optional(),
        DependencyRef::new("g", "runtime", Some("1")).with_scope("runtime"),
        DependencyRef::new("g", "scoped-by-property", Some("1")).with_scope("${test.scope}"),
    ];

    let kept: Vec<String> = doc
        .transitive_dependencies()
        .iter()
        .map(|d| d.artifact.clone())
        .collect();
    assert_eq!(kept, vec!["compile", "runtime"]);
}

#[test]
fn test_blank_fields_are_dropped() {
    let mut doc = document("a", "b", "1");
    doc.dependencies = vec![
        DependencyRef::new("", "no-group", Some("1")),
        DependencyRef::new("g", "", Some("1")),
        DependencyRef::new("g", "blank-version", Some("  ")),
    ];

    assert!(doc.transitive_dependencies().is_empty());
}

#[test]
fn test_project_version_dependency() {
    let mut doc = document("org.example", "core", "2.3.0");
    doc.dependencies = vec![DependencyRef::new(
        "${project.groupId}",
        "extras",
        Some("${project.version}"),
    )];

    assert_eq!(
        doc.transitive_dependencies()[0].coordinate_string(),
        "org.example:extras:2.3.0"
    );
}

#[test]
fn test_unresolved_property_round_trips() {
    let mut doc = document("a", "b", "1");
    doc.dependencies = vec![DependencyRef::new("g", "x", Some("${missing.key}"))];

    assert_eq!(
        doc.transitive_dependencies()[0].coordinate_string(),
        "g:x:${missing.key}"
    );
}
