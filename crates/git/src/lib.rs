//! History queries against the `git` binary
//!
//! This crate is the history provider for the bisection engine: it
//! validates ancestry between the range boundaries, lists the commits in
//! chain order, and renders one-line log descriptions for the final
//! report. Everything shells out to `git -C <dir>`; the child's stderr is
//! left connected to the terminal so git's own diagnostics stay visible.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Handle to a git repository, addressed by working directory
pub struct Repo {
    dir: PathBuf,
}

impl Repo {
    /// Open a repository at the given directory.
    ///
    /// No validation happens here; the first query surfaces any problem
    /// with the path.
    pub fn open(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn git(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.arg("-C").arg(&self.dir);
        cmd
    }

    /// Check whether `from` is an ancestor of `to`.
    ///
    /// Exit status 0 and 1 are the two answers; anything else means the
    /// check itself could not be performed (unreadable repository,
    /// unknown revision) and is an error.
    pub fn is_ancestor(&self, from: &str, to: &str) -> Result<bool> {
        let status = self
            .git()
            .args(["merge-base", "--is-ancestor", from, to])
            .status()
            .context("Failed to run git merge-base")?;

        match status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => anyhow::bail!(
                "Failed to run: git merge-base --is-ancestor {} {}",
                from,
                to
            ),
        }
    }

    /// Resolve a revision to its full commit hash
    pub fn rev_parse(&self, rev: &str) -> Result<String> {
        let output = self
            .git()
            .args(["rev-parse", rev])
            .stderr(Stdio::inherit())
            .output()
            .context("Failed to run git rev-parse")?;

        if !output.status.success() {
            anyhow::bail!("Failed to resolve revision {}", rev);
        }

        let hash = String::from_utf8(output.stdout)
            .context("git rev-parse produced non-UTF-8 output")?
            .lines()
            .next()
            .map(str::to_string)
            .context("git rev-parse produced no output")?;
        Ok(hash)
    }

    /// List the commits of `from..to` in chain order.
    ///
    /// Follows the first parent only, oldest first, so the result is a
    /// linear chain ending at `to`. `from` itself is not included.
    pub fn rev_list(&self, from: &str, to: &str) -> Result<Vec<String>> {
        let output = self
            .git()
            .args([
                "log",
                "--topo-order",
                "--reverse",
                "--first-parent",
                "--pretty=tformat:%H",
                &format!("{}..{}", from, to),
            ])
            .stderr(Stdio::inherit())
            .output()
            .context("Failed to run git log")?;

        if !output.status.success() {
            anyhow::bail!("Failed to list commits in {}..{}", from, to);
        }

        let commits = String::from_utf8(output.stdout)
            .context("git log produced non-UTF-8 output")?
            .lines()
            .map(str::to_string)
            .collect::<Vec<_>>();

        tracing::debug!(count = commits.len(), "listed commits");
        Ok(commits)
    }

    /// Print the one-line description of a revision to stdout.
    ///
    /// `options` is the user's log formatting, e.g. `--oneline
    /// --no-decorate`.
    pub fn log_line(&self, rev: &str, options: &[String]) -> Result<()> {
        let status = self
            .git()
            .arg("--no-pager")
            .args(["log", "-n1"])
            .args(options)
            .arg(rev)
            .status()
            .context("Failed to run git log")?;

        if !status.success() {
            anyhow::bail!("Failed to print log line for {}", rev);
        }
        Ok(())
    }
}
