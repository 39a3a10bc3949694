//! POM fixtures for E2E tests
//!
//! [`PomBuilder`] assembles small synthetic documents; the constants below
//! are trimmed copies of real published POMs.

/// Split `group:artifact:version`, tolerating missing parts
fn split(coordinate: &str) -> (String, String, String) {
    let mut parts = coordinate.splitn(3, ':');
    let mut next = || parts.next().unwrap_or_default().to_string();
    (next(), next(), next())
}

/// One `<dependency>` element
#[derive(Debug, Clone)]
struct DependencyFixture {
    group: String,
    artifact: String,
    version: Option<String>,
    scope: Option<String>,
    optional: bool,
}

impl DependencyFixture {
    fn render(&self) -> String {
        let mut xml = format!(
            "<dependency><groupId>{}</groupId><artifactId>{}</artifactId>",
            self.group, self.artifact
        );
        if let Some(version) = &self.version {
            xml.push_str(&format!("<version>{}</version>", version));
        }
        if let Some(scope) = &self.scope {
            xml.push_str(&format!("<scope>{}</scope>", scope));
        }
        if self.optional {
            xml.push_str("<optional>true</optional>");
        }
        xml.push_str("</dependency>");
        xml
    }
}

/// Fluent builder for POM documents
#[derive(Debug, Clone)]
pub struct PomBuilder {
    group: Option<String>,
    artifact: String,
    version: Option<String>,
    parent: Option<String>,
    properties: Vec<(String, String)>,
    managed: Vec<DependencyFixture>,
    dependencies: Vec<DependencyFixture>,
}

impl PomBuilder {
    /// Document with an explicit `group:artifact:version`
    pub fn new(coordinate: &str) -> Self {
        let (group, artifact, version) = split(coordinate);
        Self {
            group: Some(group),
            artifact,
            version: Some(version),
            parent: None,
            properties: Vec::new(),
            managed: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Document that inherits group and version from `parent`
    pub fn inheriting(artifact: &str, parent: &str) -> Self {
        Self {
            group: None,
            artifact: artifact.to_string(),
            version: None,
            parent: Some(parent.to_string()),
            properties: Vec::new(),
            managed: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn parent(mut self, coordinate: &str) -> Self {
        self.parent = Some(coordinate.to_string());
        self
    }

    pub fn property(mut self, key: &str, value: &str) -> Self {
        self.properties.push((key.to_string(), value.to_string()));
        self
    }

    /// Compile-scope dependency; the version part may be a `${...}` reference
    pub fn dependency(mut self, coordinate: &str) -> Self {
        let (group, artifact, version) = split(coordinate);
        self.dependencies.push(DependencyFixture {
            group,
            artifact,
            version: Some(version),
            scope: None,
            optional: false,
        });
        self
    }

    pub fn scoped_dependency(mut self, coordinate: &str, scope: &str) -> Self {
        let (group, artifact, version) = split(coordinate);
        self.dependencies.push(DependencyFixture {
            group,
            artifact,
            version: Some(version),
            scope: Some(scope.to_string()),
            optional: false,
        });
        self
    }

    pub fn optional_dependency(mut self, coordinate: &str) -> Self {
        let (group, artifact, version) = split(coordinate);
        self.dependencies.push(DependencyFixture {
            group,
            artifact,
            version: Some(version),
            scope: None,
            optional: true,
        });
        self
    }

    /// Dependency without a version, left to dependency management
    pub fn unversioned_dependency(mut self, group: &str, artifact: &str) -> Self {
        self.dependencies.push(DependencyFixture {
            group: group.to_string(),
            artifact: artifact.to_string(),
            version: None,
            scope: None,
            optional: false,
        });
        self
    }

    pub fn managed(mut self, coordinate: &str) -> Self {
        let (group, artifact, version) = split(coordinate);
        self.managed.push(DependencyFixture {
            group,
            artifact,
            version: Some(version),
            scope: None,
            optional: false,
        });
        self
    }

    pub fn build(&self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<project>\n");
        xml.push_str("  <modelVersion>4.0.0</modelVersion>\n");

        if let Some(parent) = &self.parent {
            let (group, artifact, version) = split(parent);
            xml.push_str(&format!(
                "  <parent><groupId>{}</groupId><artifactId>{}</artifactId><version>{}</version></parent>\n",
                group, artifact, version
            ));
        }
        if let Some(group) = &self.group {
            xml.push_str(&format!("  <groupId>{}</groupId>\n", group));
        }
        xml.push_str(&format!("  <artifactId>{}</artifactId>\n", self.artifact));
        if let Some(version) = &self.version {
            xml.push_str(&format!("  <version>{}</version>\n", version));
        }

        if !self.properties.is_empty() {
            xml.push_str("  <properties>\n");
            for (key, value) in &self.properties {
                xml.push_str(&format!("    <{0}>{1}</{0}>\n", key, value));
            }
            xml.push_str("  </properties>\n");
        }

        if !self.managed.is_empty() {
            xml.push_str("  <dependencyManagement><dependencies>\n");
            for dependency in &self.managed {
                xml.push_str(&format!("    {}\n", dependency.render()));
            }
            xml.push_str("  </dependencies></dependencyManagement>\n");
        }

        if !self.dependencies.is_empty() {
            xml.push_str("  <dependencies>\n");
            for dependency in &self.dependencies {
                xml.push_str(&format!("    {}\n", dependency.render()));
            }
            xml.push_str("  </dependencies>\n");
        }

        xml.push_str("</project>\n");
        xml
    }
}

/// `com.google.code.gson:gson-parent:2.8.8`, trimmed
pub const GSON_PARENT_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/maven-v4_0_0.xsd">
  <modelVersion>4.0.0</modelVersion>
  <groupId>com.google.code.gson</groupId>
  <artifactId>gson-parent</artifactId>
  <version>2.8.8</version>
  <packaging>pom</packaging>
  <name>Gson Parent</name>
  <modules>
    <module>gson</module>
  </modules>
  <properties>
    <project.build.sourceEncoding>UTF-8</project.build.sourceEncoding>
    <javaVersion>1.6</javaVersion>
  </properties>
  <dependencyManagement>
    <dependencies>
      <dependency>
        <groupId>junit</groupId>
        <artifactId>junit</artifactId>
        <version>4.13.2</version>
      </dependency>
    </dependencies>
  </dependencyManagement>
</project>
"#;

/// `com.google.code.gson:gson:2.8.8`, trimmed
pub const GSON_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/maven-v4_0_0.xsd">
  <modelVersion>4.0.0</modelVersion>
  <parent>
    <groupId>com.google.code.gson</groupId>
    <artifactId>gson-parent</artifactId>
    <version>2.8.8</version>
  </parent>
  <artifactId>gson</artifactId>
  <name>Gson</name>
  <dependencies>
    <dependency>
      <groupId>junit</groupId>
      <artifactId>junit</artifactId>
      <scope>test</scope>
    </dependency>
  </dependencies>
  <build>
    <plugins>
      <plugin>
        <groupId>org.apache.maven.plugins</groupId>
        <artifactId>maven-compiler-plugin</artifactId>
      </plugin>
    </plugins>
  </build>
</project>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_renders_all_sections() {
        let xml = PomBuilder::new("a:b:1")
            .parent("p:q:1")
            .property("lib.version", "2")
            .managed("m:n:3")
            .dependency("c:d:${lib.version}")
            .scoped_dependency("t:t:1", "test")
            .optional_dependency("o:o:1")
            .unversioned_dependency("m", "n")
            .build();

        assert!(xml.contains("<parent><groupId>p</groupId>"));
        assert!(xml.contains("<lib.version>2</lib.version>"));
        assert!(xml.contains("<dependencyManagement>"));
        assert!(xml.contains("<version>${lib.version}</version>"));
        assert!(xml.contains("<scope>test</scope>"));
        assert!(xml.contains("<optional>true</optional>"));
        assert!(xml.contains("<artifactId>n</artifactId></dependency>"));
    }

    #[test]
    fn inheriting_omits_group_and_version() {
        let xml = PomBuilder::inheriting("child", "p:q:1").build();
        assert!(!xml.contains("  <groupId>"));
        assert!(!xml.contains("  <version>"));
        assert!(xml.contains("<artifactId>child</artifactId>"));
    }
}
