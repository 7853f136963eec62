//! Interval bisection over the snapshot chain
//!
//! The engine classifies every snapshot in `1..=N` by working through a
//! stack of index ranges. A range whose endpoints produce identical probe
//! output cannot contain a net change and is discarded whole; a range
//! whose endpoints differ is either resolved (adjacent endpoints) or split
//! at its midpoint. A long constant stretch therefore costs O(log n)
//! probes instead of O(n).
//!
//! Known limitation, kept on purpose: the endpoint check detects a *net*
//! change only. If several changes inside one range cancel out across a
//! probed midpoint, the interior ones are not all reported.

use crate::cache::ProbeCache;
use crate::probe::Probe;
use anyhow::Result;
use std::collections::BTreeSet;
use std::fmt;

/// Classification counters for one search.
///
/// Every snapshot in the range ends up relevant, irrelevant, or skipped;
/// `unknown` is what is still pending and reaches zero at termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Number of snapshots in the searched range
    pub total: usize,
    /// Snapshots whose output differs from their predecessor's
    pub relevant: usize,
    /// Ranges discarded whole because their endpoints matched
    pub irrelevant: usize,
    /// Snapshots inside discarded ranges, never individually probed
    pub skipped: usize,
}

impl Stats {
    /// Fresh counters for a range of `total` snapshots
    pub fn new(total: usize) -> Self {
        Self {
            total,
            relevant: 0,
            irrelevant: 0,
            skipped: 0,
        }
    }

    /// Snapshots not yet accounted for
    pub fn unknown(&self) -> usize {
        self.total - self.relevant - self.irrelevant - self.skipped
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} total, {} relevant, {} irrelevant, {} skipped, {} unknown]",
            self.total,
            self.relevant,
            self.irrelevant,
            self.skipped,
            self.unknown()
        )
    }
}

/// Final result of a search
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Indices (in `1..=N`) whose output differs from the previous index
    pub relevant: BTreeSet<usize>,
    /// Final counters; `stats.unknown()` is zero
    pub stats: Stats,
}

/// Find every snapshot index in `1..=count` whose probe output differs
/// from the output at the previous index.
///
/// `on_probe` is called with the current counters and the index about to
/// be probed, immediately before every first probe of an index (never on
/// cache hits). The cache is left populated so the caller can replay
/// outputs afterwards.
///
/// Any probe failure aborts the search and propagates unchanged.
pub fn find_relevant<P, F>(
    count: usize,
    cache: &mut ProbeCache<P>,
    on_probe: F,
) -> Result<Outcome>
where
    P: Probe,
    F: FnMut(&Stats, usize),
{
    let mut search = Search {
        cache,
        todo: Vec::new(),
        relevant: BTreeSet::new(),
        stats: Stats::new(count),
        on_probe,
    };

    if count > 0 {
        search.add(0, count)?;
        while let Some((i, j)) = search.todo.pop() {
            // Invariant: outputs at i and j differ and j > i + 1, so the
            // midpoint is a fresh index. Both halves must be examined;
            // push order only affects traversal order, not the result.
            let k = (i + j) / 2;
            search.add(k, j)?;
            search.add(i, k)?;
        }
    }

    debug_assert_eq!(search.stats.unknown(), 0);

    Ok(Outcome {
        relevant: search.relevant,
        stats: search.stats,
    })
}

/// Working state of one search
struct Search<'c, P, F> {
    cache: &'c mut ProbeCache<P>,
    /// Ranges whose endpoints are known to differ, pending a split
    todo: Vec<(usize, usize)>,
    relevant: BTreeSet<usize>,
    stats: Stats,
    on_probe: F,
}

impl<P: Probe, F: FnMut(&Stats, usize)> Search<'_, P, F> {
    /// Probe an index through the cache, announcing first-time probes
    fn probe(&mut self, index: usize) -> Result<()> {
        if !self.cache.contains(index) {
            (self.on_probe)(&self.stats, index);
        }
        self.cache.get(index)?;
        Ok(())
    }

    fn endpoints_match(&mut self, i: usize, j: usize) -> Result<bool> {
        self.probe(i)?;
        self.probe(j)?;
        Ok(self.cache.peek(i) == self.cache.peek(j))
    }

    /// Classify a candidate range: discard it, resolve it, or queue it
    /// for splitting.
    fn add(&mut self, i: usize, j: usize) -> Result<()> {
        debug_assert!(i < j);

        if self.endpoints_match(i, j)? {
            // No net change in this range: the end index is irrelevant
            // and everything strictly inside is skipped unprobed.
            tracing::debug!(i, j, "endpoints match, discarding range");
            self.stats.irrelevant += 1;
            self.stats.skipped += j - i - 1;
        } else if j == i + 1 {
            // Adjacent endpoints differ: j is a change point.
            if self.relevant.insert(j) {
                self.stats.relevant += 1;
            }
        } else {
            self.todo.push((i, j));
        }
        Ok(())
    }
}
