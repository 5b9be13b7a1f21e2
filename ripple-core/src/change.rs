//! Change classification for determining affected workspaces.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::package::{WorkspaceMap, WorkspaceRecord};
use crate::path_utils::PathMatching;

/// Change state computed for one workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// A changed file lies under the workspace's own location.
    pub directly_changed: bool,
    /// A changed file lies under the location of an in-repo dependency,
    /// direct or transitive.
    pub transitively_changed: bool,
    /// Declared dependencies that are workspaces of this repository, in
    /// declaration order. Not filtered by change status.
    #[serde(serialize_with = "serialize_deps")]
    pub changed_in_repo_dependencies: SmallVec<[String; 4]>,
}

fn serialize_deps<S>(
    deps: &SmallVec<[String; 4]>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let vec: Vec<&String> = deps.iter().collect();
    vec.serialize(serializer)
}

impl Classification {
    /// Whether the workspace belongs in the build order.
    #[inline]
    pub fn qualifies(&self) -> bool {
        self.directly_changed || self.transitively_changed
    }

    #[inline]
    pub fn is_independent(&self) -> bool {
        self.directly_changed && !self.transitively_changed
    }
}

/// Classifications keyed by workspace name, in workspace order.
pub type ClassificationMap = IndexMap<String, Classification>;

/// Classifies workspaces against a list of changed files.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeClassifier {
    matching: PathMatching,
}

impl ChangeClassifier {
    pub fn new(matching: PathMatching) -> Self {
        Self { matching }
    }

    /// Computes the change state of every workspace.
    ///
    /// Calling this twice with the same inputs yields the same map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SelfDependency`] if a workspace's own location is among
    /// its resolved dependency locations, which includes any dependency cycle.
    pub fn classify(
        &self,
        workspaces: &WorkspaceMap,
        changed_files: &[String],
    ) -> Result<ClassificationMap> {
        let mut classifications = ClassificationMap::with_capacity(workspaces.len());

        for record in workspaces.values() {
            let dependency_locations = Self::dependency_locations(record, workspaces);

            if dependency_locations.contains(record.location.as_str()) {
                return Err(Error::SelfDependency {
                    name: record.name.clone(),
                });
            }

            let classification = Classification {
                directly_changed: self.has_changes([record.location.as_str()], changed_files),
                transitively_changed: self
                    .has_changes(dependency_locations.iter().copied(), changed_files),
                changed_in_repo_dependencies: in_repo_dependencies(record, workspaces),
            };
            debug!(
                name = %record.name,
                direct = classification.directly_changed,
                transitive = classification.transitively_changed,
                "classified workspace"
            );
            classifications.insert(record.name.clone(), classification);
        }

        info!(
            changed = classifications.values().filter(|c| c.qualifies()).count(),
            total = classifications.len(),
            "classified workspaces"
        );
        Ok(classifications)
    }

    /// Returns the locations of every in-repo workspace `record` depends on,
    /// directly or through other workspaces.
    ///
    /// Names without a matching workspace are external packages and are skipped.
    pub fn dependency_locations<'a>(
        record: &WorkspaceRecord,
        workspaces: &'a WorkspaceMap,
    ) -> IndexSet<&'a str> {
        let mut reached: IndexSet<&'a str> = record
            .declared_dependencies
            .iter()
            .filter_map(|dep| workspaces.get(dep))
            .map(|dep| dep.name.as_str())
            .collect();

        let mut next = 0;
        while let Some(&name) = reached.get_index(next) {
            if let Some(current) = workspaces.get(name) {
                for dep in &current.declared_dependencies {
                    if let Some(dep) = workspaces.get(dep) {
                        reached.insert(dep.name.as_str());
                    }
                }
            }
            next += 1;
        }

        reached
            .into_iter()
            .filter_map(|name| workspaces.get(name))
            .map(|dep| dep.location.as_str())
            .collect()
    }

    /// Changed files that lie under no workspace location, in input order.
    pub fn unmatched_files<'f>(
        &self,
        workspaces: &WorkspaceMap,
        changed_files: &'f [String],
    ) -> Vec<&'f str> {
        changed_files
            .iter()
            .filter(|file| {
                !workspaces
                    .values()
                    .any(|record| self.matching.contains(file, &record.location))
            })
            .map(String::as_str)
            .collect()
    }

    fn has_changes<'l>(
        &self,
        locations: impl IntoIterator<Item = &'l str> + Clone,
        changed_files: &[String],
    ) -> bool {
        changed_files.iter().any(|file| {
            locations.clone().into_iter().any(|location| {
                let hit = self.matching.contains(file, location);
                if hit {
                    debug!("hit on {} for {}", file, location);
                }
                hit
            })
        })
    }
}

/// Declared dependencies of `record` that name workspaces in `workspaces`.
pub fn in_repo_dependencies(
    record: &WorkspaceRecord,
    workspaces: &WorkspaceMap,
) -> SmallVec<[String; 4]> {
    record
        .declared_dependencies
        .iter()
        .filter(|dep| workspaces.contains_key(*dep))
        .cloned()
        .collect()
}

/// Names of qualifying workspaces, in classification order.
pub fn qualifying(classifications: &ClassificationMap) -> Vec<String> {
    classifications
        .iter()
        .filter(|(_, c)| c.qualifies())
        .map(|(name, _)| name.clone())
        .collect()
}
