//! End-to-end run: discover, load, classify, resolve.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::adapter::{ChangeSource, ManifestSource, WorkspaceDiscovery};
use crate::change::{qualifying, ChangeClassifier};
use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::loader::ManifestLoader;
use crate::order::{BuildOrderResolver, BuildPlan};

/// Wires the collaborators to the core phases.
pub struct Pipeline<'a> {
    manifests: &'a dyn ManifestSource,
    discovery: &'a dyn WorkspaceDiscovery,
    changes: &'a dyn ChangeSource,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        manifests: &'a dyn ManifestSource,
        discovery: &'a dyn WorkspaceDiscovery,
        changes: &'a dyn ChangeSource,
    ) -> Self {
        Self {
            manifests,
            discovery,
            changes,
        }
    }

    /// Runs every phase for `config` and returns the build plan.
    ///
    /// # Errors
    ///
    /// Fails if the root manifest declares no workspaces, a manifest cannot be
    /// loaded, the reference point cannot be diffed, or the dependency graph
    /// is inconsistent.
    pub fn run(&self, config: &RunConfig) -> Result<BuildPlan> {
        let manifest_paths = self.discover_manifests(config)?;
        let workspaces = ManifestLoader::new(self.manifests).load(&manifest_paths)?;

        let commit = self
            .changes
            .resolve_commit(config.git_ref.as_deref(), &config.remote)?;
        info!(commit = %commit, "diffing against reference");
        let changed_files = self.changes.changed_files(&commit)?;
        info!(files = changed_files.len(), "collected changed files");

        let classifier = ChangeClassifier::new(config.path_matching);
        for file in classifier.unmatched_files(&workspaces, &changed_files) {
            warn!(file = %file, "changed file lies outside every workspace");
        }
        let classifications = classifier.classify(&workspaces, &changed_files)?;
        let candidates = qualifying(&classifications);

        BuildOrderResolver::new(&workspaces, &classifications).resolve(&candidates)
    }

    /// Reads the root manifest and expands its workspace patterns into
    /// manifest paths, in pattern order.
    pub fn discover_manifests(&self, config: &RunConfig) -> Result<Vec<PathBuf>> {
        let root = self.manifests.read_manifest(&config.manifest_file())?;
        let patterns = root
            .workspace_patterns()
            .ok_or_else(|| Error::NoWorkspaces(config.manifest_path.clone()))?;

        let mut manifest_paths = Vec::new();
        for pattern in patterns {
            let found = self.discovery.discover(pattern)?;
            if found.is_empty() {
                warn!(pattern = %pattern, "workspace pattern matched no manifests");
            }
            manifest_paths.extend(found);
        }
        Ok(manifest_paths)
    }
}
