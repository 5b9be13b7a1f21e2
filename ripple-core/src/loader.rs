//! Builds the workspace map from discovered manifest files.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::adapter::ManifestSource;
use crate::error::{Error, Result};
use crate::package::{WorkspaceMap, WorkspaceRecord};

/// Loads one [`WorkspaceRecord`] per manifest.
pub struct ManifestLoader<'a> {
    source: &'a dyn ManifestSource,
}

impl<'a> ManifestLoader<'a> {
    pub fn new(source: &'a dyn ManifestSource) -> Self {
        Self { source }
    }

    /// Reads every manifest in order and keys the records by workspace name.
    ///
    /// The map keeps the order of `manifest_paths`.
    ///
    /// # Errors
    ///
    /// Fails if a manifest cannot be read or parsed, has no name, or reuses
    /// a name already taken by an earlier manifest.
    pub fn load(&self, manifest_paths: &[PathBuf]) -> Result<WorkspaceMap> {
        let mut workspaces = WorkspaceMap::with_capacity(manifest_paths.len());

        for manifest_path in manifest_paths {
            let manifest = self.source.read_manifest(manifest_path)?;
            let record = WorkspaceRecord::from_manifest(manifest_path, &manifest)?;
            debug!(
                name = %record.name,
                location = %record.location,
                deps = record.declared_dependencies.len(),
                "loaded workspace"
            );

            if let Some(existing) = workspaces.get(&record.name) {
                return Err(Error::DuplicateWorkspace {
                    name: record.name.clone(),
                    first: existing.location.clone(),
                    second: record.location.clone(),
                });
            }
            workspaces.insert(record.name.clone(), record);
        }

        info!(count = workspaces.len(), "loaded workspaces");
        Ok(workspaces)
    }
}
