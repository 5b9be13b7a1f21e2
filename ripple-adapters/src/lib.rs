pub mod discovery;
pub mod git;
pub mod js;

pub use discovery::GlobDiscovery;
pub use git::GitChangeSource;
pub use js::JsonManifestSource;
