//! Memoizing wrapper around the probe executor

use crate::probe::{Probe, ProbeOutput};
use anyhow::Result;
use std::collections::HashMap;

/// Memoizing probe cache keyed by snapshot index.
///
/// Guarantees the executor is invoked at most once per distinct index,
/// no matter how many times the engine asks. Probe failures propagate
/// unchanged; nothing is stored for a failed index.
pub struct ProbeCache<P> {
    probe: P,
    outputs: HashMap<usize, ProbeOutput>,
    probes: usize,
}

impl<P: Probe> ProbeCache<P> {
    /// Create a cache around the given executor
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            outputs: HashMap::new(),
            probes: 0,
        }
    }

    /// Whether the output for an index is already cached
    pub fn contains(&self, index: usize) -> bool {
        self.outputs.contains_key(&index)
    }

    /// Get the probe output for an index, running the probe on first request
    pub fn get(&mut self, index: usize) -> Result<&ProbeOutput> {
        if !self.outputs.contains_key(&index) {
            tracing::debug!(index, "probe cache miss");
            let output = self.probe.run(index)?;
            self.probes += 1;
            self.outputs.insert(index, output);
        }
        Ok(&self.outputs[&index])
    }

    /// Look up a cached output without running the probe
    pub fn peek(&self, index: usize) -> Option<&ProbeOutput> {
        self.outputs.get(&index)
    }

    /// Number of real executor invocations so far
    pub fn probes(&self) -> usize {
        self.probes
    }
}
