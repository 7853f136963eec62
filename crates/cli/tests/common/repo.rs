//! Scratch git repositories for integration tests

use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// A throwaway git repository with a single tracked value file.
///
/// Each `commit_value` call rewrites `value.txt` and commits, so the
/// probe `git show "$REV:value.txt"` reproduces the chain of values. A
/// churn file keyed by the subject keeps every commit non-empty even
/// when the value repeats.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    pub fn new() -> Result<Self> {
        let repo = Self {
            dir: TempDir::new()?,
        };
        repo.git(&["init", "-q", "-b", "main"])?;
        repo.git(&["config", "user.email", "test@example.com"])?;
        repo.git(&["config", "user.name", "Test"])?;
        repo.git(&["config", "commit.gpgsign", "false"])?;
        Ok(repo)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `value` to the tracked file and commit it; returns the hash
    pub fn commit_value(&self, value: &str, subject: &str) -> Result<String> {
        std::fs::write(self.path().join("value.txt"), value)?;
        std::fs::write(self.path().join("churn.txt"), subject)?;
        self.git(&["add", "-A"])?;
        self.git(&["commit", "-q", "-m", subject])?;
        self.git(&["rev-parse", "HEAD"])
    }

    /// Run git in the repository, returning trimmed stdout
    fn git(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .arg("-C")
            .arg(self.path())
            .args(args)
            .stderr(Stdio::inherit())
            .output()
            .with_context(|| format!("Failed to run git {:?}", args))?;

        anyhow::ensure!(output.status.success(), "git {:?} failed", args);
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
