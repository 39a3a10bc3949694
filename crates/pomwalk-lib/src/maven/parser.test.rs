use super::*;

const GSON_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd">
  <modelVersion>4.0.0</modelVersion>
  <parent>
    <groupId>com.google.code.gson</groupId>
    <artifactId>gson-parent</artifactId>
    <version>2.8.8</version>
  </parent>
  <artifactId>gson</artifactId>
  <name>Gson</name>
  <properties>
    <excludeTestCompilation>**/Java17*</excludeTestCompilation>
    <junit.version> 4.13.2 </junit.version>
  </properties>
  <dependencyManagement>
    <dependencies>
      <dependency>
        <groupId>org.example</groupId>
        <artifactId>managed</artifactId>
        <version>1.2.3</version>
      </dependency>
    </dependencies>
  </dependencyManagement>
  <dependencies>
    <dependency>
      <groupId>junit</groupId>
      <artifactId>junit</artifactId>
      <version>${junit.version}</version>
      <scope>test</scope>
    </dependency>
    <dependency>
      <groupId>org.example</groupId>
      <artifactId>managed</artifactId>
      <optional>true</optional>
      <exclusions>
        <exclusion>
          <groupId>*</groupId>
          <artifactId>*</artifactId>
        </exclusion>
      </exclusions>
    </dependency>
  </dependencies>
  <build>
    <plugins>
      <plugin>
        <artifactId>maven-compiler-plugin</artifactId>
        <dependencies>
          <dependency>
            <groupId>plugin.only</groupId>
            <artifactId>dep</artifactId>
            <version>1</version>
          </dependency>
        </dependencies>
      </plugin>
    </plugins>
  </build>
</project>"#;

#[test]
fn test_parse_inherits_group_and_version_from_parent() {
    let doc = PomParser::new().parse(GSON_POM).unwrap();

    assert_eq!(doc.group, "com.google.code.gson");
    assert_eq!(doc.artifact, "gson");
    assert_eq!(doc.version, "2.8.8");
    assert_eq!(
        doc.parent,
        Some(Coordinate::new("com.google.code.gson", "gson-parent", "2.8.8"))
    );
    assert_eq!(doc.coordinate().to_string(), "com.google.code.gson:gson:2.8.8");
}

#[test]
fn test_parse_sections() {
    let doc = PomParser::new().parse(GSON_POM).unwrap();

    assert_eq!(doc.properties.get("junit.version").map(String::as_str), Some("4.13.2"));
    assert_eq!(doc.managed_dependencies.len(), 1);
    assert_eq!(doc.managed_dependencies[0].version.as_deref(), Some("1.2.3"));

    // Plugin dependencies under <build> are not project dependencies
    assert_eq!(doc.dependencies.len(), 2);
    assert_eq!(doc.dependencies[0].scope.as_deref(), Some("test"));
    assert_eq!(doc.dependencies[0].version.as_deref(), Some("${junit.version}"));
    assert!(doc.dependencies[1].optional);
    assert_eq!(doc.dependencies[1].version, None);
}

#[test]
fn test_parse_minimal_document() {
    let xml = r#"<project>
        <groupId>a</groupId>
        <artifactId>b</artifactId>
        <version>1</version>
    </project>"#;

    let doc = PomParser::new().parse(xml).unwrap();
    assert_eq!(doc.coordinate().to_string(), "a:b:1");
    assert!(doc.parent.is_none());
    assert!(doc.properties.is_empty());
    assert!(doc.dependencies.is_empty());
    assert!(doc.managed_dependencies.is_empty());
}

#[test]
fn test_own_values_take_precedence_over_parent() {
    let xml = r#"<project>
        <parent>
            <groupId>p</groupId>
            <artifactId>parent</artifactId>
            <version>1</version>
        </parent>
        <groupId>own</groupId>
        <artifactId>child</artifactId>
        <version>2</version>
    </project>"#;

    let doc = PomParser::new().parse(xml).unwrap();
    assert_eq!(doc.coordinate().to_string(), "own:child:2");
}

#[test]
fn test_artifact_is_never_inherited() {
    let xml = r#"<project>
        <parent>
            <groupId>p</groupId>
            <artifactId>parent</artifactId>
            <version>1</version>
        </parent>
    </project>"#;

    match PomParser::new().parse(xml) {
        Err(ResolutionError::MissingRequiredFields { missing }) => {
            assert_eq!(missing, "artifactId");
        }
        other => panic!("Expected MissingRequiredFields, got {:?}", other),
    }
}

#[test]
fn test_missing_fields_without_parent() {
    let xml = r#"<project><artifactId>b</artifactId></project>"#;

    match PomParser::new().parse(xml) {
        Err(ResolutionError::MissingRequiredFields { missing }) => {
            assert_eq!(missing, "groupId, version");
        }
        other => panic!("Expected MissingRequiredFields, got {:?}", other),
    }
}

#[test]
fn test_incomplete_parent_is_rejected() {
    let xml = r#"<project>
        <parent>
            <groupId>p</groupId>
            <artifactId>parent</artifactId>
        </parent>
        <artifactId>child</artifactId>
    </project>"#;

    assert!(matches!(
        PomParser::new().parse(xml),
        Err(ResolutionError::MissingRequiredFields { .. })
    ));
}

#[test]
fn test_malformed_xml_is_parse_failure() {
    let xml = "<project><groupId>a</artifactId></project>";

    assert!(matches!(
        PomParser::new().parse(xml),
        Err(ResolutionError::ParseFailure { .. })
    ));
}
