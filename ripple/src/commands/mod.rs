//! Command implementation for the CLI.

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use ripple_adapters::{GitChangeSource, GlobDiscovery, JsonManifestSource};
use ripple_core::{ChangeSource, FileConfig, PathMatching, Pipeline, RunConfig, StaticChanges};
use tracing::debug;

use crate::formatting::{print_info, print_json, print_plain, print_table};

/// Options collected from the command line.
pub struct RunArgs {
    pub git_ref: Option<String>,
    pub package: PathBuf,
    pub info: bool,
    pub json: bool,
    pub table: bool,
    pub strict_paths: bool,
    pub remote: Option<String>,
    pub files: Option<Vec<String>>,
    pub stdin: bool,
}

pub fn cmd_run(mut args: RunArgs) -> Result<()> {
    let supplied = if args.stdin {
        Some(read_stdin_files()?)
    } else {
        args.files.take()
    };
    let config = build_config(args)?;
    let root_dir = config.root_dir();
    debug!(root = %root_dir.display(), "resolved repository root");

    let manifests = JsonManifestSource::new(&root_dir);
    let discovery = GlobDiscovery::new(&root_dir);
    let changes: Box<dyn ChangeSource> = match supplied {
        Some(files) => {
            debug!(count = files.len(), "using supplied changed files");
            Box::new(StaticChanges::new(files))
        }
        None => Box::new(GitChangeSource::new(&root_dir)),
    };

    let plan = Pipeline::new(&manifests, &discovery, changes.as_ref()).run(&config)?;

    if config.verbose {
        print_info(&plan)?;
    } else if config.table_output {
        print_table(&plan);
    } else if config.json_output {
        print_json(&plan)?;
    } else {
        print_plain(&plan);
    }

    Ok(())
}

/// Layers command-line options over `ripple.toml` over the defaults.
fn build_config(args: RunArgs) -> Result<RunConfig> {
    let probe = RunConfig {
        manifest_path: args.package.clone(),
        ..RunConfig::default()
    };
    let file = FileConfig::discover(&probe.root_dir())?.unwrap_or_default();
    if let Some(path) = &file.config_path {
        debug!(path = %path.display(), "using configuration file");
    }

    let mut config = RunConfig::from_file(&file);
    config.manifest_path = args.package;
    config.verbose = args.info;
    config.json_output = args.json;
    config.table_output = args.table;
    if args.git_ref.is_some() {
        config.git_ref = args.git_ref;
    }
    if let Some(remote) = args.remote {
        config.remote = remote;
    }
    if args.strict_paths {
        config.path_matching = PathMatching::Segment;
    }

    Ok(config)
}

/// Reads changed files from stdin (one path per line).
fn read_stdin_files() -> Result<Vec<String>> {
    let stdin = io::stdin();
    let mut files = Vec::new();

    for line in stdin.lock().lines() {
        let line = line.context("failed to read changed files from stdin")?;
        let path = line.trim();
        if !path.is_empty() {
            files.push(path.to_string());
        }
    }

    Ok(files)
}
