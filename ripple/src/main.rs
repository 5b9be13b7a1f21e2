mod commands;
mod formatting;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ripple_core::config::DEFAULT_MANIFEST;
use tracing::Level;

use crate::commands::RunArgs;

#[derive(Parser)]
#[command(name = "ripple")]
#[command(version)]
#[command(about = "Get the ordered list of which workspaces have changed since the reference commit")]
struct Cli {
    /// Reference to compare from: a branch, a tag such as `refs/tags/<tag>`, or a commit id
    #[arg(short = 'r', long = "ref", value_name = "REF")]
    git_ref: Option<String>,

    /// Path to the root package.json
    #[arg(short, long, default_value = DEFAULT_MANIFEST)]
    package: PathBuf,

    /// Show verbose workspace info
    #[arg(short, long, action)]
    info: bool,

    /// Output as json
    #[arg(short, long, action)]
    json: bool,

    /// Output as a table
    #[arg(long, action)]
    table: bool,

    /// Match changed files on path segments instead of substrings
    #[arg(long, action)]
    strict_paths: bool,

    /// Remote whose default branch is used when no reference is given
    #[arg(long)]
    remote: Option<String>,

    /// Use these changed files instead of asking git
    #[arg(long, num_args = 1.., value_name = "FILE", conflicts_with = "stdin")]
    files: Option<Vec<String>>,

    /// Read changed files from stdin, one per line, instead of asking git
    #[arg(long, action)]
    stdin: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(short, long, action)]
    quiet: bool,
}

impl From<Cli> for RunArgs {
    fn from(cli: Cli) -> Self {
        RunArgs {
            git_ref: cli.git_ref,
            package: cli.package,
            info: cli.info,
            json: cli.json,
            table: cli.table,
            strict_paths: cli.strict_paths,
            remote: cli.remote,
            files: cli.files,
            stdin: cli.stdin,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    match commands::cmd_run(cli.into()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("error");
            println!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
