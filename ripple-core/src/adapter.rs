//! Collaborator traits for reading manifests, discovering workspaces, and
//! listing changed files.
//!
//! All paths exchanged through these traits are relative to the directory
//! holding the root manifest. Implementations live in `ripple-adapters`.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::package::Manifest;

/// Reads and parses manifests.
pub trait ManifestSource {
    fn read_manifest(&self, path: &Path) -> Result<Manifest>;
}

/// Expands a workspace pattern into the manifest files it covers.
pub trait WorkspaceDiscovery {
    fn discover(&self, pattern: &str) -> Result<Vec<PathBuf>>;
}

/// Resolves a reference point and lists the files changed since it.
pub trait ChangeSource {
    /// Resolves `reference` to a commit id.
    ///
    /// When `reference` is `None`, the tip of `remote`'s default branch is used.
    fn resolve_commit(&self, reference: Option<&str>, remote: &str) -> Result<String>;

    /// Lists paths that differ between `commit` and the working tree.
    fn changed_files(&self, commit: &str) -> Result<Vec<String>>;
}

/// A change source backed by a fixed list of paths.
///
/// Used when changed files are supplied directly instead of read from git.
#[derive(Debug, Clone, Default)]
pub struct StaticChanges {
    files: Vec<String>,
}

impl StaticChanges {
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: files
                .into_iter()
                .map(Into::into)
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
                .collect(),
        }
    }
}

impl ChangeSource for StaticChanges {
    fn resolve_commit(&self, reference: Option<&str>, _remote: &str) -> Result<String> {
        Ok(reference.unwrap_or("static").to_string())
    }

    fn changed_files(&self, _commit: &str) -> Result<Vec<String>> {
        Ok(self.files.clone())
    }
}
