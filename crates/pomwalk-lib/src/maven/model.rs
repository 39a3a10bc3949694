//! POM document model, inheritance merge, and property substitution

use std::borrow::Borrow;
use std::collections::HashMap;
use tracing::trace;

use super::coordinate::Coordinate;

/// Scopes that never propagate to consumers of a dependency
const NON_TRANSITIVE_SCOPES: [&str; 2] = ["test", "provided"];

/// A `<dependency>` entry, as declared or as managed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyRef {
    pub group: String,
    pub artifact: String,
    pub version: Option<String>,
    pub scope: Option<String>,
    pub optional: bool,
}

impl DependencyRef {
    pub fn new(group: &str, artifact: &str, version: Option<&str>) -> Self {
        Self {
            group: group.to_string(),
            artifact: artifact.to_string(),
            version: version.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn with_scope(mut self, scope: &str) -> Self {
        self.scope = Some(scope.to_string());
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Management and merge key; version is deliberately not part of it
    pub fn slot(&self) -> (&str, &str) {
        (&self.group, &self.artifact)
    }

    /// `group:artifact:version`, with an empty version segment when unset
    pub fn coordinate_string(&self) -> String {
        format!(
            "{}:{}:{}",
            self.group,
            self.artifact,
            self.version.as_deref().unwrap_or_default()
        )
    }

    /// Whether this entry propagates transitively (not test/provided, not optional)
    pub fn is_transitive(&self) -> bool {
        let excluded_scope = self
            .scope
            .as_deref()
            .is_some_and(|scope| NON_TRANSITIVE_SCOPES.contains(&scope));
        !excluded_scope && !self.optional
    }

    fn is_complete(&self) -> bool {
        !self.group.trim().is_empty()
            && !self.artifact.trim().is_empty()
            && self
                .version
                .as_deref()
                .is_some_and(|version| !version.trim().is_empty())
    }
}

/// One parsed POM with its identity already completed from `<parent>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PomDocument {
    pub group: String,
    pub artifact: String,
    pub version: String,
    /// Lookup key for the parent POM, not an ownership relation
    pub parent: Option<Coordinate>,
    pub properties: HashMap<String, String>,
    pub managed_dependencies: Vec<DependencyRef>,
    pub dependencies: Vec<DependencyRef>,
}

impl PomDocument {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(&self.group, &self.artifact, &self.version)
    }

    /// Overlay this (more specific) document on top of `ancestor`.
    ///
    /// Identity and parent come from `self`. Properties union with `self`
    /// winning on key collision. Managed and declared dependency lists union
    /// by (group, artifact): the ancestor's order is kept, an overriding
    /// entry takes the ancestor's position, new entries append.
    pub fn inherit_from(&self, ancestor: &PomDocument) -> PomDocument {
        let mut properties = ancestor.properties.clone();
        properties.extend(
            self.properties
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );

        PomDocument {
            group: self.group.clone(),
            artifact: self.artifact.clone(),
            version: self.version.clone(),
            parent: self.parent.clone(),
            properties,
            managed_dependencies: merge_slots(
                &ancestor.managed_dependencies,
                &self.managed_dependencies,
            ),
            dependencies: merge_slots(&ancestor.dependencies, &self.dependencies),
        }
    }

    /// Fold a parent chain (most specific first) into the effective document
    pub fn effective<D: Borrow<PomDocument>>(chain: &[D]) -> Option<PomDocument> {
        chain
            .iter()
            .rev()
            .map(|document| document.borrow().clone())
            .reduce(|ancestor, child| child.inherit_from(&ancestor))
    }

    /// Replace a whole-value `${key}` reference.
    ///
    /// `project.version`, `project.groupId`, and `project.artifactId` map to
    /// this document's identity; other keys are looked up in `properties`.
    /// Unknown keys and values of any other form come back unchanged.
    pub fn substitute(&self, value: &str) -> String {
        let Some(key) = value
            .strip_prefix("${")
            .and_then(|rest| rest.strip_suffix('}'))
        else {
            return value.to_string();
        };

        let resolved = match key {
            "project.version" => Some(&self.version),
            "project.groupId" => Some(&self.group),
            "project.artifactId" => Some(&self.artifact),
            other => self.properties.get(other),
        };

        match resolved {
            Some(replacement) => {
                trace!("Resolved property {} -> {}", value, replacement);
                replacement.clone()
            }
            None => {
                trace!("Unresolved property left as-is: {}", value);
                value.to_string()
            }
        }
    }

    fn substitute_ref(&self, dependency: &DependencyRef) -> DependencyRef {
        DependencyRef {
            group: self.substitute(&dependency.group),
            artifact: self.substitute(&dependency.artifact),
            version: dependency.version.as_deref().map(|v| self.substitute(v)),
            scope: dependency.scope.as_deref().map(|s| self.substitute(s)),
            optional: dependency.optional,
        }
    }

    /// Managed version for a (group, artifact) slot, after substitution
    pub fn managed_version(&self, group: &str, artifact: &str) -> Option<String> {
        self.managed_dependencies
            .iter()
            .map(|managed| self.substitute_ref(managed))
            .find(|managed| managed.slot() == (group, artifact))
            .and_then(|managed| managed.version)
    }

    /// Dependencies that propagate to consumers, in declaration order.
    ///
    /// Each entry has properties substituted, a missing version filled from
    /// dependency management, and is dropped when non-transitive or still
    /// incomplete.
    pub fn transitive_dependencies(&self) -> Vec<DependencyRef> {
        self.dependencies
            .iter()
            .map(|declared| {
                let mut dependency = self.substitute_ref(declared);
                if dependency.version.is_none() {
                    dependency.version =
                        self.managed_version(&dependency.group, &dependency.artifact);
                }
                dependency
            })
            .filter(|dependency| {
                let keep = dependency.is_transitive() && dependency.is_complete();
                if !keep {
                    trace!("Skipping dependency {}", dependency.coordinate_string());
                }
                keep
            })
            .collect()
    }
}

/// Keyed union of dependency lists, `overlay` winning per slot
fn merge_slots(base: &[DependencyRef], overlay: &[DependencyRef]) -> Vec<DependencyRef> {
    let mut merged: Vec<DependencyRef> = Vec::with_capacity(base.len() + overlay.len());
    let mut positions: HashMap<(String, String), usize> = HashMap::new();

    for dependency in base.iter().chain(overlay) {
        let key = (dependency.group.clone(), dependency.artifact.clone());
        match positions.get(&key) {
            Some(&index) => merged[index] = dependency.clone(),
            None => {
                positions.insert(key, merged.len());
                merged.push(dependency.clone());
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    include!("model.test.rs");
}
