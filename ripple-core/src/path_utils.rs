//! Shared path utilities for workspace locations and changed files.

use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

/// How a changed file is matched against a workspace location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathMatching {
    /// The location may appear anywhere inside the changed path.
    ///
    /// `pkg/foo` also matches `pkg/foobar/index.js`. Existing pipelines rely
    /// on this, so it stays the default.
    #[default]
    Substring,
    /// The location must equal the path or be a `/`-bounded prefix of it.
    Segment,
}

impl PathMatching {
    /// Returns true if `file` belongs under `location` according to this mode.
    pub fn contains(&self, file: &str, location: &str) -> bool {
        match self {
            PathMatching::Substring => file.contains(location),
            PathMatching::Segment => {
                location.is_empty()
                    || file == location
                    || file
                        .strip_prefix(location)
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

/// Converts a manifest path into the location of its workspace.
///
/// The manifest's own filename is dropped and the remaining components are
/// joined with `/`, so the result compares directly against VCS diff output.
/// `./` components are skipped; a manifest at the root yields `""`.
pub fn manifest_location(manifest_path: &Path) -> String {
    let parent = manifest_path.parent().unwrap_or_else(|| Path::new(""));
    to_slash(parent)
}

/// Joins the normal components of `path` with `/`.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
