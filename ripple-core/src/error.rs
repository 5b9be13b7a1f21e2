//! Error types and result aliases.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("There aren't any workspaces to search in {0}")]
    NoWorkspaces(PathBuf),

    #[error("Failed to parse manifest {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    #[error("Manifest {0} does not declare a name")]
    MissingName(PathBuf),

    #[error("Workspace {name} is declared twice: {first} and {second}")]
    DuplicateWorkspace {
        name: String,
        first: String,
        second: String,
    },

    #[error("{name} lists itself as a dependency")]
    SelfDependency { name: String },

    #[error("Unknown workspace: {0}")]
    UnknownWorkspace(String),

    #[error("Circular dependency detected among changed workspaces: {0}")]
    DependencyCycle(String),

    #[error("Failed to resolve changes: {0}")]
    DiffResolution(String),

    #[error("Invalid workspace pattern {pattern}: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("TOML parse error in {context}: {error}")]
    Toml {
        error: toml::de::Error,
        context: String,
    },
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Error::Toml {
            error,
            context: "ripple.toml".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
