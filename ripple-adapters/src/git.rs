use std::path::{Path, PathBuf};
use std::process::Command;

use ripple_core::adapter::ChangeSource;
use ripple_core::error::{Error, Result};
use tracing::debug;

/// Lists changes with the system `git` binary.
pub struct GitChangeSource {
    repo_dir: PathBuf,
}

impl GitChangeSource {
    pub fn new(repo_dir: impl AsRef<Path>) -> Self {
        Self {
            repo_dir: repo_dir.as_ref().to_path_buf(),
        }
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        debug!(?args, "running git");
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .output()
            .map_err(|e| {
                Error::DiffResolution(format!("failed to run git {}: {}", args.join(" "), e))
            })?;

        if !output.status.success() {
            return Err(Error::DiffResolution(format!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Name of the default branch of `remote`.
    ///
    /// Prefers the locally recorded `refs/remotes/<remote>/HEAD` and falls back
    /// to asking the remote.
    pub fn default_branch(&self, remote: &str) -> Result<String> {
        let symbolic = format!("refs/remotes/{}/HEAD", remote);
        if let Ok(output) = self.git(&["symbolic-ref", "--short", &symbolic]) {
            let prefix = format!("{}/", remote);
            let branch = output.trim();
            if let Some(branch) = branch.strip_prefix(&prefix).filter(|b| !b.is_empty()) {
                return Ok(branch.to_string());
            }
        }

        let output = self.git(&["remote", "show", remote])?;
        parse_head_branch(&output).ok_or_else(|| {
            Error::DiffResolution(format!("could not determine default branch of {}", remote))
        })
    }
}

/// Extracts the branch from the `HEAD branch: <name>` line of `git remote show`.
fn parse_head_branch(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|line| line.trim().strip_prefix("HEAD branch:"))
        .map(|branch| branch.trim().to_string())
        .filter(|branch| !branch.is_empty() && branch != "(unknown)")
}

impl ChangeSource for GitChangeSource {
    fn resolve_commit(&self, reference: Option<&str>, remote: &str) -> Result<String> {
        let target = match reference {
            Some(reference) => reference.to_string(),
            None => format!("{}/{}", remote, self.default_branch(remote)?),
        };
        let sha = self.git(&["rev-parse", "--verify", &target])?;
        Ok(sha.trim().to_string())
    }

    /// Paths are relative to `repo_dir`, which may sit below the top of the
    /// repository. Changes outside it are not listed.
    fn changed_files(&self, commit: &str) -> Result<Vec<String>> {
        let output = self.git(&[
            "-c",
            "core.quotePath=false",
            "diff",
            "--name-only",
            "-z",
            "--relative",
            commit,
        ])?;
        Ok(output
            .split('\0')
            .filter(|path| !path.is_empty())
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::parse_head_branch;

    #[test]
    fn test_parse_head_branch() {
        let output = "* remote origin\n  Fetch URL: git@example.com:org/repo.git\n  HEAD branch: main\n  Remote branches:\n";
        assert_eq!(parse_head_branch(output), Some("main".to_string()));
    }

    #[test]
    fn test_parse_head_branch_unknown() {
        assert_eq!(parse_head_branch("  HEAD branch: (unknown)\n"), None);
        assert_eq!(parse_head_branch("* remote origin\n"), None);
    }
}
