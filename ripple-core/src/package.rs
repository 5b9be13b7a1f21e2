//! Manifest and workspace data models.

use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::path_utils::manifest_location;

/// The `workspaces` field of a root manifest.
///
/// Accepts both the plain list form and the object form with a `packages` list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WorkspacesField {
    Patterns(Vec<String>),
    Config {
        #[serde(default)]
        packages: Vec<String>,
    },
}

impl WorkspacesField {
    pub fn patterns(&self) -> &[String] {
        match self {
            WorkspacesField::Patterns(patterns) => patterns,
            WorkspacesField::Config { packages } => packages,
        }
    }
}

/// The subset of a `package.json` that ripple reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub name: Option<String>,
    pub dependencies: Option<IndexMap<String, Value>>,
    pub dev_dependencies: Option<IndexMap<String, Value>>,
    pub workspaces: Option<WorkspacesField>,
}

impl Manifest {
    /// Parses manifest JSON read from `path`.
    pub fn from_json(path: &Path, content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::ManifestParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Workspace glob patterns, if any are declared.
    pub fn workspace_patterns(&self) -> Option<&[String]> {
        self.workspaces
            .as_ref()
            .map(WorkspacesField::patterns)
            .filter(|patterns| !patterns.is_empty())
    }

    /// Runtime and development dependency names, in declaration order.
    pub fn dependency_names(&self) -> IndexSet<String> {
        self.dependencies
            .iter()
            .chain(self.dev_dependencies.iter())
            .flat_map(|deps| deps.keys().cloned())
            .collect()
    }
}

/// A workspace within the monorepo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceRecord {
    pub name: String,
    /// Directory of the workspace relative to the repository root, `/`-separated.
    pub location: String,
    pub declared_dependencies: IndexSet<String>,
}

impl WorkspaceRecord {
    pub fn new<I, S>(name: impl Into<String>, location: impl Into<String>, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            location: location.into(),
            declared_dependencies: deps.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a record from a workspace manifest found at `manifest_path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingName`] if the manifest has no `name`.
    pub fn from_manifest(manifest_path: &Path, manifest: &Manifest) -> Result<Self> {
        let name = manifest
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::MissingName(manifest_path.to_path_buf()))?;

        Ok(Self {
            name: name.to_string(),
            location: manifest_location(manifest_path),
            declared_dependencies: manifest.dependency_names(),
        })
    }
}

/// Workspaces keyed by name, in discovery order.
pub type WorkspaceMap = IndexMap<String, WorkspaceRecord>;
