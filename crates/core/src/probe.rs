//! Probe abstraction: the externally supplied change signal

use anyhow::Result;

/// Captured output of one probe invocation.
///
/// Outputs are opaque to the engine: two outputs are only ever compared
/// for equality, never ordered or inspected.
#[derive(Clone, PartialEq, Eq)]
pub struct ProbeOutput(Vec<u8>);

impl ProbeOutput {
    /// Create an output from captured bytes
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Get the raw captured bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for ProbeOutput {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&str> for ProbeOutput {
    fn from(text: &str) -> Self {
        Self(text.as_bytes().to_vec())
    }
}

impl std::fmt::Debug for ProbeOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProbeOutput({} bytes)", self.0.len())
    }
}

/// A probe that can be run at any snapshot index.
///
/// Implementations map the index to a snapshot identifier and execute the
/// user's command against it. Probes are assumed deterministic: the cache
/// calls `run` at most once per index and replays the stored output after
/// that. Any error is fatal to the whole search.
pub trait Probe {
    /// Run the probe at the given snapshot index
    fn run(&mut self, index: usize) -> Result<ProbeOutput>;
}
