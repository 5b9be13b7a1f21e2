use std::io;
use std::path::{Component, Path, PathBuf};

use glob::{glob, Pattern};
use ripple_core::adapter::WorkspaceDiscovery;
use ripple_core::error::{Error, Result};
use tracing::debug;

const MANIFEST_FILE: &str = "package.json";
const VENDORED_DIR: &str = "node_modules";

/// Expands workspace patterns with `glob`.
///
/// A pattern `p` lists `p/*` and keeps the `package.json` files it finds.
/// Anything under `node_modules` is ignored.
pub struct GlobDiscovery {
    root: PathBuf,
}

impl GlobDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn is_vendored(path: &Path) -> bool {
        path.components()
            .any(|c| matches!(c, Component::Normal(name) if name == VENDORED_DIR))
    }
}

impl WorkspaceDiscovery for GlobDiscovery {
    fn discover(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let trimmed = pattern.trim_end_matches('/');
        let root = Pattern::escape(&self.root.to_string_lossy());
        let full_pattern = format!("{}/{}/*", root.trim_end_matches('/'), trimmed);

        let entries = glob(&full_pattern).map_err(|e| Error::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        let mut manifests = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| Error::Io(io::Error::new(e.error().kind(), e.to_string())))?;
            let relative = path.strip_prefix(&self.root).unwrap_or(&path).to_path_buf();

            if Self::is_vendored(&relative) {
                continue;
            }
            if relative.file_name().is_some_and(|name| name == MANIFEST_FILE) {
                manifests.push(relative);
            }
        }

        debug!(pattern, count = manifests.len(), "discovered manifests");
        Ok(manifests)
    }
}
