use std::fs;
use std::path::{Path, PathBuf};

use ripple_core::adapter::ManifestSource;
use ripple_core::error::{Error, Result};
use ripple_core::package::Manifest;

/// Reads `package.json` manifests from disk.
pub struct JsonManifestSource {
    root: PathBuf,
}

impl JsonManifestSource {
    /// `root` is the directory that manifest paths are relative to.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ManifestSource for JsonManifestSource {
    fn read_manifest(&self, path: &Path) -> Result<Manifest> {
        let full_path = self.root.join(path);
        let content = fs::read_to_string(&full_path).map_err(|e| Error::ManifestParse {
            path: path.to_path_buf(),
            message: format!("failed to read {}: {}", full_path.display(), e),
        })?;

        Manifest::from_json(path, &content)
    }
}
