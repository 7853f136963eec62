//! Progress and report output
//!
//! Progress lines go to stderr so stdout carries only the final report
//! (log lines, and probe output under --show-output).

use anyhow::Result;
use ms_core::{Probe, ProbeCache, Stats};
use owo_colors::OwoColorize;
use std::io::Write;

/// Announce a first-time probe of a revision
pub fn progress(stats: &Stats, rev: &str) {
    eprintln!(
        "{} inspecting {} ...",
        stats.dimmed(),
        short(rev).yellow()
    );
}

/// Print the final counters
pub fn done(stats: &Stats) {
    eprintln!("{} done", stats.dimmed());
}

/// Write the cached probe output for an index to stdout, verbatim
pub fn replay<P: Probe>(cache: &mut ProbeCache<P>, index: usize) -> Result<()> {
    let output = cache.get(index)?;
    std::io::stdout().write_all(output.as_bytes())?;
    Ok(())
}

/// Abbreviate a commit hash for display
pub fn short(rev: &str) -> &str {
    rev.get(..7).unwrap_or(rev)
}

/// Split user-supplied log options into arguments
pub fn split_options(options: &str) -> Vec<String> {
    options.split_whitespace().map(str::to_string).collect()
}
