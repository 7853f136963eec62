//! Helpers for driving the built `ms` binary
//!
//! Locates the binary next to the test executable and wraps invocations
//! with convenient assertion methods.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Builder for one `ms` invocation
pub struct MsCommand {
    binary_path: PathBuf,
    working_dir: PathBuf,
    args: Vec<String>,
}

impl MsCommand {
    /// Create a new command in the given working directory
    pub fn new(working_dir: impl AsRef<Path>) -> Self {
        Self {
            binary_path: find_ms_binary(),
            working_dir: working_dir.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    /// Add command arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Execute the command and capture its output
    pub fn execute(&self) -> Result<RunResult> {
        let output = Command::new(&self.binary_path)
            .args(&self.args)
            .current_dir(&self.working_dir)
            .output()
            .context("Failed to execute ms")?;

        Ok(RunResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }

    /// Execute and require a zero exit status
    pub fn assert_success(&self) -> Result<RunResult> {
        let result = self.execute()?;
        if !result.success() {
            anyhow::bail!(
                "Command failed (exit code: {}):\nArgs: {:?}\nStdout: {}\nStderr: {}",
                result.exit_code,
                self.args,
                result.stdout,
                result.stderr
            );
        }
        Ok(result)
    }

    /// Execute and require a non-zero exit status
    pub fn assert_failure(&self) -> Result<RunResult> {
        let result = self.execute()?;
        if result.success() {
            anyhow::bail!(
                "Command should have failed but succeeded:\nArgs: {:?}\nStdout: {}",
                self.args,
                result.stdout
            );
        }
        Ok(result)
    }
}

/// Captured result of one invocation
#[derive(Debug, Clone)]
pub struct RunResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl RunResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Find the ms binary in the target directory
fn find_ms_binary() -> PathBuf {
    let mut path = std::env::current_exe().expect("Failed to get current exe path");

    path.pop(); // Remove test binary name
    path.pop(); // Remove deps/

    let debug_bin = path.join("ms");
    if debug_bin.exists() {
        return debug_bin;
    }

    path.pop(); // Remove debug/
    let release_bin = path.join("release").join("ms");
    if release_bin.exists() {
        return release_bin;
    }

    path.join("debug").join("ms")
}
