//! VCS adapter (§6): `changed_files(since_marker)` and `current_marker()`,
//! ported from `git_updater.py`'s two `git` subprocess calls.

use std::path::PathBuf;
use std::process::Command;

use fenec_error::{DomainError, Result};

pub trait Vcs: Send + Sync {
    fn changed_files(&self, since_marker: &str) -> Result<Vec<String>>;
    fn current_marker(&self) -> Result<String>;
}

/// Shells out to the system `git` binary against a fixed repository root.
/// `source_extension` filters the diff the same way the original filtered to
/// `.py` files; pass `None` to keep every changed path.
pub struct GitVcs {
    pub repo_root: PathBuf,
    pub source_extension: Option<&'static str>,
}

impl GitVcs {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            source_extension: None,
        }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_root)
            .output()
            .map_err(|e| DomainError::store("git", format!("failed to spawn git: {e}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DomainError::store("git", format!("git command failed: {stderr}")).into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Vcs for GitVcs {
    fn changed_files(&self, since_marker: &str) -> Result<Vec<String>> {
        if since_marker.is_empty() {
            return Ok(Vec::new());
        }
        let stdout = self.run(&["diff", "--name-only", since_marker, "HEAD"])?;
        Ok(stdout
            .lines()
            .filter(|line| {
                self.source_extension
                    .is_none_or(|ext| line.ends_with(ext))
            })
            .map(str::to_string)
            .collect())
    }

    fn current_marker(&self) -> Result<String> {
        self.run(&["rev-parse", "HEAD"])
    }
}
