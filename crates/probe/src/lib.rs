//! Probe command execution
//!
//! Runs the user-supplied command once per snapshot through the shell,
//! with the snapshot's revision exposed as `$REV`. Captured stdout is the
//! comparison signal; stderr stays connected to the terminal unless the
//! caller asks for it to be discarded.

use ms_core::{Probe, ProbeOutput};
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

/// Failure modes of a probe invocation. Either one aborts the search.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to launch probe command `{cmd}`: {source}")]
    Launch {
        cmd: String,
        #[source]
        source: std::io::Error,
    },

    #[error("probe command exited with {status} at revision {rev}")]
    Exited { rev: String, status: ExitStatus },
}

/// Runs the probe command through `sh -c`, binding `REV` per invocation
pub struct CommandProbe {
    cmd: String,
    revs: Vec<String>,
    hide_stderr: bool,
}

impl CommandProbe {
    /// Create a probe over the given snapshot sequence.
    ///
    /// `revs[0]` is the start boundary; the engine's index maps straight
    /// into this sequence.
    pub fn new(cmd: impl Into<String>, revs: Vec<String>, hide_stderr: bool) -> Self {
        Self {
            cmd: cmd.into(),
            revs,
            hide_stderr,
        }
    }
}

impl Probe for CommandProbe {
    fn run(&mut self, index: usize) -> anyhow::Result<ProbeOutput> {
        let rev = &self.revs[index];
        tracing::debug!(%rev, "running probe command");

        let mut command = Command::new("sh");
        command
            .arg("-c")
            .arg(&self.cmd)
            .env("REV", rev)
            .stderr(if self.hide_stderr {
                Stdio::null()
            } else {
                Stdio::inherit()
            });

        let output = command.output().map_err(|source| ProbeError::Launch {
            cmd: self.cmd.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(ProbeError::Exited {
                rev: rev.clone(),
                status: output.status,
            }
            .into());
        }

        Ok(ProbeOutput::new(output.stdout))
    }
}
