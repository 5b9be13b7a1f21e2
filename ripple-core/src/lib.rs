//! Core library for ordering changed monorepo workspaces.

pub mod adapter;
pub mod change;
pub mod config;
pub mod error;
pub mod graph;
pub mod loader;
pub mod order;
pub mod package;
pub mod path_utils;
pub mod pipeline;

pub use adapter::{ChangeSource, ManifestSource, StaticChanges, WorkspaceDiscovery};
pub use change::{ChangeClassifier, Classification, ClassificationMap};
pub use config::{FileConfig, RunConfig};
pub use error::{Error, Result};
pub use graph::DependencyGraph;
pub use loader::ManifestLoader;
pub use order::{BuildOrderResolver, BuildPlan, ResolvedWorkspace};
pub use package::{Manifest, WorkspaceMap, WorkspaceRecord, WorkspacesField};
pub use path_utils::PathMatching;
pub use pipeline::Pipeline;
