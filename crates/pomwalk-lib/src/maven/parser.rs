//! POM XML parsing
//!
//! Deserializes only the elements resolution needs; everything else in a
//! POM (build, profiles, reporting, ...) is skipped rather than rejected.

use serde::Deserialize;
use std::collections::HashMap;
use tracing::trace;

use super::coordinate::Coordinate;
use super::model::{DependencyRef, PomDocument};
use crate::primitives::ResolutionError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProject {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    parent: Option<RawParent>,
    #[serde(default)]
    properties: HashMap<String, String>,
    dependency_management: Option<RawDependencyManagement>,
    dependencies: Option<RawDependencyList>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParent {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDependencyManagement {
    dependencies: Option<RawDependencyList>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDependencyList {
    #[serde(default)]
    dependency: Vec<RawDependency>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDependency {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    scope: Option<String>,
    optional: Option<String>,
}

/// Trimmed value, with blank treated as absent
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl From<RawDependency> for DependencyRef {
    fn from(raw: RawDependency) -> Self {
        Self {
            group: clean(raw.group_id).unwrap_or_default(),
            artifact: clean(raw.artifact_id).unwrap_or_default(),
            version: clean(raw.version),
            scope: clean(raw.scope),
            optional: clean(raw.optional).is_some_and(|v| v.eq_ignore_ascii_case("true")),
        }
    }
}

impl RawDependencyList {
    fn into_refs(list: Option<Self>) -> Vec<DependencyRef> {
        list.map(|l| l.dependency.into_iter().map(DependencyRef::from).collect())
            .unwrap_or_default()
    }
}

/// Stateless POM parser
#[derive(Debug, Clone, Copy, Default)]
pub struct PomParser;

impl PomParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a POM and complete its identity from `<parent>`.
    ///
    /// `groupId` and `version` fall back to the parent's values; `artifactId`
    /// is never inherited. A document still missing any of the three is
    /// rejected with `MissingRequiredFields`.
    pub fn parse(&self, xml: &str) -> Result<PomDocument, ResolutionError> {
        let raw: RawProject = quick_xml::de::from_str(xml)?;

        let parent = raw.parent.map(Self::parent_coordinate).transpose()?;

        let group = clean(raw.group_id).or_else(|| parent.as_ref().map(|p| p.group().to_string()));
        let artifact = clean(raw.artifact_id);
        let version =
            clean(raw.version).or_else(|| parent.as_ref().map(|p| p.version().to_string()));

        let (group, artifact, version) = match (group, artifact, version) {
            (Some(group), Some(artifact), Some(version)) => (group, artifact, version),
            (group, artifact, version) => {
                let missing: Vec<&str> = [
                    ("groupId", group.is_none()),
                    ("artifactId", artifact.is_none()),
                    ("version", version.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                return Err(ResolutionError::MissingRequiredFields {
                    missing: missing.join(", "),
                });
            }
        };

        let properties = raw
            .properties
            .into_iter()
            .map(|(key, value)| (key, value.trim().to_string()))
            .collect();

        let document = PomDocument {
            group,
            artifact,
            version,
            parent,
            properties,
            managed_dependencies: RawDependencyList::into_refs(
                raw.dependency_management.and_then(|m| m.dependencies),
            ),
            dependencies: RawDependencyList::into_refs(raw.dependencies),
        };

        trace!(
            coordinate = %document.coordinate(),
            dependencies = document.dependencies.len(),
            managed = document.managed_dependencies.len(),
            "Parsed POM"
        );

        Ok(document)
    }

    fn parent_coordinate(raw: RawParent) -> Result<Coordinate, ResolutionError> {
        match (
            clean(raw.group_id),
            clean(raw.artifact_id),
            clean(raw.version),
        ) {
            (Some(group), Some(artifact), Some(version)) => {
                Ok(Coordinate::new(group, artifact, version))
            }
            _ => Err(ResolutionError::MissingRequiredFields {
                missing: "parent groupId, artifactId, or version".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    include!("parser.test.rs");
}
