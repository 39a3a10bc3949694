//! Maven coordinates (`group:artifact:version`)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::primitives::ResolutionError;

/// Default remote repository (Maven Central)
pub const MAVEN_CENTRAL_URL: &str = "https://repo1.maven.org/maven2/";

/// File kinds addressable under a coordinate's version directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Project object model (metadata document)
    Pom,
    /// Binary artifact
    Jar,
}

impl ArtifactKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactKind::Pom => "pom",
            ArtifactKind::Jar => "jar",
        }
    }
}

/// Canonical `group:artifact:version` identifier
///
/// Equality and hashing follow the canonical string, so a coordinate can key
/// caches and visited sets directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coordinate {
    group: String,
    artifact: String,
    version: String,
}

impl Coordinate {
    /// Build a coordinate from already-validated parts
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }

    /// Split `group:artifact:version` into exactly three non-empty parts
    pub fn parse(input: &str) -> Result<Self, ResolutionError> {
        let parts: Vec<&str> = input.split(':').collect();
        match parts.as_slice() {
            [group, artifact, version]
                if !group.is_empty() && !artifact.is_empty() && !version.is_empty() =>
            {
                Ok(Self::new(*group, *artifact, *version))
            }
            _ => Err(ResolutionError::InvalidCoordinateFormat {
                input: input.to_string(),
            }),
        }
    }

    /// Whether `input` has the strict resolvable shape: three segments of
    /// ASCII alphanumerics, dots, and hyphens.
    ///
    /// Anything else (unresolved `${...}` tokens, version ranges, extra
    /// segments) is passed through by the resolver rather than fetched.
    pub fn is_resolvable(input: &str) -> bool {
        let segments: Vec<&str> = input.split(':').collect();
        segments.len() == 3
            && segments.iter().all(|segment| {
                !segment.is_empty()
                    && segment
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
            })
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Repository-relative path, e.g. `com/google/code/gson/gson/2.8.8/gson-2.8.8.pom`
    pub fn repository_path(&self, kind: ArtifactKind) -> String {
        format!(
            "{}/{}/{}/{}-{}.{}",
            self.group.replace('.', "/"),
            self.artifact,
            self.version,
            self.artifact,
            self.version,
            kind.extension()
        )
    }

    /// Absolute URL under `base_url`, which must end with `/`
    pub fn url(&self, base_url: &str, kind: ArtifactKind) -> String {
        format!("{}{}", base_url, self.repository_path(kind))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

impl FromStr for Coordinate {
    type Err = ResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Coordinate {
    type Error = ResolutionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Coordinate> for String {
    fn from(value: Coordinate) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    include!("coordinate.test.rs");
}
