//! Run configuration and `ripple.toml` parsing.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::path_utils::PathMatching;

pub const CONFIG_FILE_NAME: &str = "ripple.toml";
pub const DEFAULT_MANIFEST: &str = "./package.json";
pub const DEFAULT_REMOTE: &str = "origin";

/// Settings read from the `[ripple]` table of `ripple.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    /// Reference point to diff against.
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    /// Remote whose default branch is used when no reference is given.
    pub remote: Option<String>,
    pub path_matching: Option<PathMatching>,
    /// Path of the file this configuration was read from.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    ripple: FileConfig,
}

impl FileConfig {
    /// Parses the contents of a `ripple.toml`.
    pub fn parse(content: &str) -> Result<Self> {
        let document: ConfigDocument = toml::from_str(content)?;
        Ok(document.ripple)
    }

    /// Looks for `ripple.toml` starting at `start_dir` and walking up.
    ///
    /// The search stops at the first directory containing `.git`, or at the
    /// filesystem root. Returns `Ok(None)` when no file is found.
    pub fn discover(start_dir: &Path) -> Result<Option<Self>> {
        let mut current_dir = start_dir
            .canonicalize()
            .unwrap_or_else(|_| start_dir.to_path_buf());

        loop {
            let candidate = current_dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                debug!(path = %candidate.display(), "loading configuration");
                let content = std::fs::read_to_string(&candidate)?;
                let mut config = Self::parse(&content)?;
                config.config_path = Some(candidate);
                return Ok(Some(config));
            }

            if current_dir.join(".git").exists() {
                break;
            }

            match current_dir.parent() {
                Some(parent) if parent != current_dir && !parent.as_os_str().is_empty() => {
                    current_dir = parent.to_path_buf();
                }
                _ => break,
            }
        }

        Ok(None)
    }
}

/// Options for a single run of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub git_ref: Option<String>,
    /// Location of the root manifest.
    pub manifest_path: PathBuf,
    /// Emit full workspace records instead of names.
    pub verbose: bool,
    pub json_output: bool,
    pub table_output: bool,
    pub path_matching: PathMatching,
    pub remote: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            git_ref: None,
            manifest_path: PathBuf::from(DEFAULT_MANIFEST),
            verbose: false,
            json_output: false,
            table_output: false,
            path_matching: PathMatching::default(),
            remote: DEFAULT_REMOTE.to_string(),
        }
    }
}

impl RunConfig {
    /// Defaults overridden by whatever `file` sets.
    pub fn from_file(file: &FileConfig) -> Self {
        let defaults = Self::default();
        Self {
            git_ref: file.git_ref.clone(),
            remote: file.remote.clone().unwrap_or(defaults.remote),
            path_matching: file.path_matching.unwrap_or(defaults.path_matching),
            ..defaults
        }
    }

    /// Directory holding the root manifest; workspace paths are relative to it.
    pub fn root_dir(&self) -> PathBuf {
        match self.manifest_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Root manifest path relative to [`RunConfig::root_dir`].
    pub fn manifest_file(&self) -> PathBuf {
        self.manifest_path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("package.json"))
    }
}
